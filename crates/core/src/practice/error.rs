use thiserror::Error;

/// Caller bugs detected when a session is set up. Never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("no drill types enabled for the session")]
    NoDrillTypes,

    #[error("item catalog is empty")]
    EmptyCatalog,
}
