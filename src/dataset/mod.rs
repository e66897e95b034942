//! Tabular data import.
//!
//! ```text
//! dataset/
//! ├── importer.rs: extension dispatch, CSV and JSON readers
//! └── row.rs     : header aliases and cell coercion → AnimalRecord
//! ```
//!
//! The feedlot rows share the readers and map their own columns in
//! `feedlot::row`.

pub mod importer;
pub mod row;

pub use importer::{import, read_rows, Imported, ImportedHerd};

/// Errors raised while reading a data file.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("file not found")]
    FileNotFound,
    #[error("unsupported data file format: '{extension}'")]
    UnsupportedFormat { extension: String },
    #[error("{0}")]
    Parse(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
