use crate::source::LoadError;
use thiserror::Error;

/// Application-level failures surfaced to the user. Store problems are not
/// here on purpose: malformed persisted state falls back to defaults and
/// failed saves are logged, neither is raised.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error(transparent)]
    LoadError(#[from] LoadError),
}
