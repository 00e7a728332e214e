#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod logging;
pub mod practice;

pub use learn_core::Clock;

pub use config::settings_from_json;
pub use error::PracticeError;
pub use practice::{PracticeLoopService, PracticeProgress, PracticeSession};
