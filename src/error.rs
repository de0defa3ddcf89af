use chrono::NaiveDate;
use miette::Diagnostic;
use thiserror::Error;

use crate::models::Era;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(rota::config))]
    Config(String),

    #[error("Failed to load {dataset}: {reason}")]
    #[diagnostic(
        code(rota::load),
        help("Run convert_tsv to regenerate the JSON datasets")
    )]
    Load { dataset: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(rota::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(rota::serialization))]
    Serialization(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Lookup(#[from] LookupError),

    #[error("Other error: {0}")]
    #[diagnostic(code(rota::other))]
    Other(String),
}

/// Reasons a single query can fail. None of these are fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum LookupError {
    #[error("Please enter a roll number or group code.")]
    #[diagnostic(code(rota::lookup::empty_input))]
    EmptyInput,

    #[error("No matching group found for {0}")]
    #[diagnostic(code(rota::lookup::not_found))]
    NotFound(String),

    #[error("Found in the {found_in} schedule but not for the selected date (schedules switch on {pivot})")]
    #[diagnostic(
        code(rota::lookup::wrong_era),
        help("Pick a date on the other side of the schedule change")
    )]
    WrongEra { found_in: Era, pivot: NaiveDate },

    #[error("No schedule found for {date}")]
    #[diagnostic(code(rota::lookup::schedule_gap))]
    ScheduleGap { date: NaiveDate },

    #[error("Posting details not found for group {group}")]
    #[diagnostic(code(rota::lookup::incomplete_posting))]
    IncompletePosting { group: String },

    #[error("No students found for {date}")]
    #[diagnostic(code(rota::lookup::no_students))]
    NoStudents { date: NaiveDate },

    #[error("Unified site \"{0}\" not found")]
    #[diagnostic(code(rota::lookup::unknown_site))]
    UnknownUnifiedSite(String),

    #[error("No department matches \"{0}\"")]
    #[diagnostic(code(rota::lookup::unknown_department))]
    UnknownDepartment(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type RotaResult<T> = Result<T, Error>;

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create dataset load errors
pub fn load_error(dataset: &str, reason: impl ToString) -> Error {
    Error::Load {
        dataset: dataset.to_string(),
        reason: reason.to_string(),
    }
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
