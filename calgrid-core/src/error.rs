//! Error types for calgrid.

use thiserror::Error;

use crate::draft::ValidationError;

/// Errors that can occur in calgrid operations.
#[derive(Error, Debug)]
pub enum CalGridError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Calendar access has not been granted")]
    PermissionRequired,

    #[error("Calendar access was denied")]
    PermissionDenied,

    #[error("No calendar available for creating events")]
    NoCalendarAvailable,

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("Calendar '{0}' is read-only")]
    CalendarReadOnly(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for CalGridError {
    fn from(err: toml::de::Error) -> Self {
        CalGridError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for CalGridError {
    fn from(err: toml::ser::Error) -> Self {
        CalGridError::Serialization(err.to_string())
    }
}

/// Result type alias for calgrid operations.
pub type CalGridResult<T> = Result<T, CalGridError>;
