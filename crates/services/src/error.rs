//! Shared error types for the services crate.

use thiserror::Error;

use learn_core::model::SettingsError;
use learn_core::practice::ConfigurationError;
use storage::repository::StorageError;

/// Errors emitted by practice session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PracticeError {
    #[error("current entry was already answered; continue first")]
    AwaitingContinue,
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("invalid settings document: {0}")]
    Config(#[from] serde_json::Error),
}
