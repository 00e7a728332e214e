//! Adaptive practice scheduling: drill selection, the retry queue and completion detection.

mod completion;
mod error;
mod queue;
mod recency;
mod selector;
mod tracker;

pub use completion::{CompletionDetector, CompletionObserver, is_session_complete};
pub use error::ConfigurationError;
pub use queue::{AdvanceOutcome, PracticeQueue, QueueEntry};
pub use recency::{RECENCY_CAPACITY, RecencyWindow};
pub use selector::{VARIETY_EXCLUSION, candidate_drill_types, select_drill_type};
pub use tracker::MasteryTracker;
