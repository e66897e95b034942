//! Tabular file import dispatcher.
//!
//! [`read_rows`] dispatches on file extension and yields loosely-typed
//! [`RawRow`]s. [`import`] is the herd entry point used by the `load_herd`
//! command: it maps each row through [`super::row`] and reports how many
//! rows had to be skipped. The feedlot import reuses [`read_rows`].

use std::path::Path;

use serde_json::Value;

use super::row::{normalize_header, to_record, RawRow};
use super::DatasetError;
use crate::models::AnimalRecord;

/// Records read from one data file.
#[derive(Debug, Clone, PartialEq)]
pub struct Imported<R> {
    pub records: Vec<R>,
    /// Rows dropped because they could not be mapped to a record.
    pub skipped_rows: usize,
}

/// Records read from one herd file. Skipped rows had an unknown status.
pub type ImportedHerd = Imported<AnimalRecord>;

/// Read the rows of a tabular file.
///
/// Supported extensions (case-insensitive):
///
/// | Extension | Format                                           |
/// |-----------|--------------------------------------------------|
/// | `.csv`    | header row; `;` or `,` delimiter (auto-detected) |
/// | `.json`   | array of row objects                             |
///
/// # Errors
///
/// - [`DatasetError::UnsupportedFormat`]: extension not recognised.
/// - [`DatasetError::FileNotFound`]: path does not exist.
/// - [`DatasetError::Parse`]: the file is not valid CSV / JSON rows.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, DatasetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let parse: fn(&[u8]) -> Result<Vec<RawRow>, DatasetError> = match ext.as_deref() {
        Some("csv") => parse_csv,
        Some("json") => parse_json,
        Some(ext) => {
            return Err(DatasetError::UnsupportedFormat {
                extension: ext.to_string(),
            })
        }
        None => {
            return Err(DatasetError::UnsupportedFormat {
                extension: String::new(),
            })
        }
    };

    if !path.exists() {
        return Err(DatasetError::FileNotFound);
    }
    let bytes = std::fs::read(path)?;
    parse(&bytes)
}

/// Load a herd file. See [`read_rows`] for formats and errors.
pub fn import(path: &Path) -> Result<ImportedHerd, DatasetError> {
    Ok(build(read_rows(path)?))
}

fn build(rows: Vec<RawRow>) -> ImportedHerd {
    let total = rows.len();
    let records: Vec<AnimalRecord> = rows.iter().filter_map(to_record).collect();
    let skipped_rows = total - records.len();
    if skipped_rows > 0 {
        tracing::warn!(skipped_rows, total, "herd rows with unknown status skipped");
    }
    Imported {
        records,
        skipped_rows,
    }
}

/// Parse CSV bytes. The header line decides the delimiter: `;` when present,
/// `,` otherwise.
///
/// Cells are decoded one by one. Bytes that are not UTF-8 (for example a
/// Windows-1252 export) become U+FFFD in that cell only.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<RawRow>, DatasetError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let header_line = bytes.split(|b| *b == b'\n').next().unwrap_or_default();
    let delimiter = if header_line.contains(&b';') { b';' } else { b',' };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(|e| DatasetError::Parse(format!("cannot read CSV header: {e}")))?
        .iter()
        .map(|h| normalize_header(&String::from_utf8_lossy(h)))
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in reader.byte_records().enumerate() {
        // +2: one-based, after the header line.
        let record =
            result.map_err(|e| DatasetError::Parse(format!("CSV row {}: {e}", idx + 2)))?;
        let cells: Vec<String> = record
            .iter()
            .map(|cell| String::from_utf8_lossy(cell).into_owned())
            .collect();
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row: RawRow = headers.iter().cloned().zip(cells).collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Parse a JSON array of flat row objects. Scalars are stringified; nested
/// values are ignored.
pub fn parse_json(bytes: &[u8]) -> Result<Vec<RawRow>, DatasetError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| DatasetError::Parse(format!("invalid JSON: {e}")))?;
    let Value::Array(items) = value else {
        return Err(DatasetError::Parse(
            "expected a JSON array of rows".to_string(),
        ));
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(
                map.into_iter()
                    .filter_map(|(k, v)| {
                        let text = match v {
                            Value::String(s) => s,
                            Value::Number(n) => n.to_string(),
                            Value::Bool(b) => b.to_string(),
                            _ => return None,
                        };
                        Some((normalize_header(&k), text))
                    })
                    .collect::<RawRow>(),
            ),
            _ => None,
        })
        .collect())
}
