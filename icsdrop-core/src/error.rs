//! Error types for icsdrop.

use thiserror::Error;

/// Recurrence rule rejections, reported in the order the checks run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "Recurrence rrule frequency must be provided and be one of the following: 'YEARLY', 'MONTHLY', 'WEEKLY', or 'DAILY'"
    )]
    InvalidFrequency,

    #[error("Recurrence rrule 'byday' must be an array")]
    InvalidByDayType,

    #[error("Recurrence rrule 'byday' array must not be longer than the 7 days in a week")]
    InvalidByDayLength,

    #[error(
        "Recurrence rrule 'byday' values must include only the following: 'SU', 'MO', 'TU', 'WE', 'TH', 'FR', 'SA'"
    )]
    InvalidByDayValue,
}

/// Errors that can occur in icsdrop operations.
#[derive(Error, Debug)]
pub enum IcsError {
    #[error("Invalid recurrence rule: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid file name: {0:?}")]
    InvalidFilename(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for icsdrop operations.
pub type IcsResult<T> = Result<T, IcsError>;
