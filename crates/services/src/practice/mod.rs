mod progress;
mod session;
mod workflow;

// Public API of the practice subsystem.
pub use crate::error::PracticeError;
pub use progress::PracticeProgress;
pub use session::PracticeSession;
pub use workflow::PracticeLoopService;
