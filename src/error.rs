//! Error types for todo
//!
//! The core reports failures as [`Outcome`] codes paired with a payload
//! ([`Response`]). The CLI layer lifts non-success outcomes into [`Error`].
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, missing config or database, unknown id)
//! - 4: Operation failed (read, write or decode failure)

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Exit codes for the todo CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Machine-checkable result code of a core operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    /// Creating the config directory failed
    DirectoryError,
    /// Creating or writing the config file failed
    ConfigFileError,
    /// Reading the database file failed
    ReadError,
    /// Writing the database file failed
    WriteError,
    /// The database file did not hold a valid task list
    DecodeError,
    /// No task matched the given id prefix
    IdNotFound,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    /// Stable numeric code, in declaration order.
    pub fn code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::DirectoryError => 1,
            Outcome::ConfigFileError => 2,
            Outcome::ReadError => 3,
            Outcome::WriteError => 4,
            Outcome::DecodeError => 5,
            Outcome::IdNotFound => 6,
        }
    }

    /// Human-readable description for CLI messages.
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::DirectoryError => "config directory error",
            Outcome::ConfigFileError => "config file error",
            Outcome::ReadError => "database read error",
            Outcome::WriteError => "database write error",
            Outcome::DecodeError => "json decode error",
            Outcome::IdNotFound => "to-do id not found",
        }
    }

    /// `Ok(())` on success, `Error::Operation` otherwise.
    pub fn into_result(self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(Error::Operation(self))
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A payload paired with the outcome of the operation that produced it.
///
/// The payload is always present, even on failure: reads yield an empty
/// collection, writes hand back what they were given.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    pub payload: T,
    pub outcome: Outcome,
}

impl<T> Response<T> {
    pub fn new(payload: T, outcome: Outcome) -> Self {
        Self { payload, outcome }
    }

    pub fn success(payload: T) -> Self {
        Self::new(payload, Outcome::Success)
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn into_result(self) -> Result<T> {
        self.outcome.into_result()?;
        Ok(self.payload)
    }
}

/// Main error type for the todo CLI
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Database not found: {0}")]
    DatabaseNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Core outcomes (exit code depends on the outcome)
    #[error("{0}")]
    Operation(Outcome),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ConfigNotFound(_)
            | Error::DatabaseNotFound(_)
            | Error::InvalidConfig(_)
            | Error::InvalidArgument(_)
            | Error::Operation(Outcome::IdNotFound) => exit_codes::USER_ERROR,

            Error::Operation(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// `user_error` or `operation_failed`, following the exit code.
    pub fn kind(&self) -> &'static str {
        match self.exit_code() {
            exit_codes::USER_ERROR => "user_error",
            _ => "operation_failed",
        }
    }

    /// The core outcome behind this error, if any.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Error::Operation(outcome) => Some(*outcome),
            _ => None,
        }
    }

    /// Structured details for JSON error output.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::ConfigNotFound(path) | Error::DatabaseNotFound(path) => {
                Some(serde_json::json!({ "path": path.display().to_string() }))
            }
            Error::InvalidConfig(message) | Error::InvalidArgument(message) => {
                Some(serde_json::json!({ "message": message }))
            }
            Error::Operation(outcome) => Some(serde_json::json!({
                "outcome": outcome,
                "outcome_code": outcome.code(),
            })),
            _ => None,
        }
    }
}

impl From<Outcome> for Error {
    fn from(outcome: Outcome) -> Self {
        Error::Operation(outcome)
    }
}

/// Result type alias for todo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Body of the `error` field in JSON error output
#[derive(Debug, Serialize)]
pub struct JsonError {
    pub message: String,
    pub code: i32,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            message: err.to_string(),
            code: err.exit_code(),
            kind: err.kind(),
            outcome: err.outcome(),
            details: err.details(),
        }
    }
}
