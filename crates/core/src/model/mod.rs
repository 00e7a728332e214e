mod drill;
mod ids;
mod item;
mod mastery;
mod settings;
mod summary;

pub use ids::{ItemId, SessionId};

pub use drill::{DrillType, UnknownDrillType};
pub use item::{ItemDraft, ItemError, ItemKind, ItemPayload, LearningItem};
pub use mastery::{AnswerOutcome, MasteryPolicy, MasteryRecord};
pub use settings::{PracticeSettings, PracticeSettingsDraft, SettingsError};
pub use summary::{AnswerLog, PracticeSummary, SummaryError};
