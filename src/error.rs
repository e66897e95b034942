//! Application-level error type returned by all command handlers.
//!
//! `AppError` is serialized to `{ kind, message }` JSON payloads so the
//! TypeScript frontend can pattern-match on a stable `kind` string.

use crate::breeding::ConfigError;
use crate::dataset::DatasetError;

/// Top-level error returned by command handlers.
///
/// Serialized with serde's adjacently-tagged representation:
/// `{ "kind": "<variant>", "message": "<human-readable text>" }`
///
/// The TypeScript counterpart is:
/// ```ts
/// type AppError = { kind: string; message: string };
/// ```
#[derive(Debug, thiserror::Error, serde::Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum AppError {
    /// A required file path does not exist on disk.
    #[error("file not found")]
    FileNotFound,

    /// A generic I/O error; the inner [`std::io::Error`] is converted to a
    /// string at the system boundary so it remains serializable.
    #[error("{0}")]
    Io(String),

    /// The herd file could not be parsed.
    #[error("{0}")]
    DatasetLoad(String),

    /// The file extension is not supported by any importer.
    #[error("{0}")]
    UnsupportedFormat(String),

    /// The breeding configuration could not be read or failed validation.
    #[error("{0}")]
    Config(String),

    /// The tracker file could not be loaded or parsed.
    #[error("{0}")]
    ProjectLoad(String),

    /// The tracker file could not be written.
    #[error("{0}")]
    ProjectSave(String),

    /// An edit was rejected before any change was made (e.g. empty title).
    #[error("{0}")]
    Validation(String),

    /// A requested resource (milestone, sub-milestone, document) was not found.
    #[error("{0}")]
    NotFound(String),
}

impl From<DatasetError> for AppError {
    fn from(e: DatasetError) -> Self {
        match e {
            DatasetError::FileNotFound => Self::FileNotFound,
            DatasetError::UnsupportedFormat { extension } => Self::UnsupportedFormat(extension),
            DatasetError::Parse(msg) => Self::DatasetLoad(msg),
            DatasetError::Io(io) => Self::Io(io.to_string()),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    /// Convert an [`std::io::Error`] into an [`AppError::Io`].
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
