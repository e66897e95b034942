//! Mapping of loosely-typed herd rows onto [`AnimalRecord`].
//!
//! Herd exports come from spreadsheets with Spanish headers (with or
//! without accents) or from English-keyed JSON. Missing cells default to
//! empty text or zero.

use std::collections::HashMap;

use crate::models::{AnimalRecord, StatusCode};

/// One input row: normalized header → raw cell text.
pub type RawRow = HashMap<String, String>;

const STATUS: &[&str] = &["estado", "status"];
const DAYS: &[&str] = &["dia proceso", "día proceso", "daysinprocess", "days_in_process"];
const PARITIES: &[&str] = &["partos", "parities"];
const CODE: &[&str] = &["código", "codigo", "code"];
const LOCATION: &[&str] = &["ubicación", "ubicacion", "location"];
const GENETIC: &[&str] = &["genética", "genetica", "geneticline", "genetic_line"];
const GROUP: &[&str] = &["grupo", "group"];

/// Header key used in [`RawRow`]: trimmed and lowercased.
pub fn normalize_header(header: &str) -> String {
    header.trim().trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// First non-empty trimmed cell among `aliases`, or `""`.
pub(crate) fn field<'a>(row: &'a RawRow, aliases: &[&str]) -> &'a str {
    aliases
        .iter()
        .find_map(|key| row.get(*key))
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .unwrap_or("")
}

/// Parse a count cell. Decimals are truncated, a decimal comma is accepted,
/// and negative or unreadable values become 0.
pub fn parse_count(raw: &str) -> u32 {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return n.clamp(0, i64::from(u32::MAX)) as u32;
    }
    match raw.replace(',', ".").parse::<f64>() {
        Ok(f) if f.is_finite() && f > 0.0 => f.trunc().min(f64::from(u32::MAX)) as u32,
        _ => 0,
    }
}

/// Convert a row; `None` when the status cell is not a known code.
pub fn to_record(row: &RawRow) -> Option<AnimalRecord> {
    let status = StatusCode::parse(field(row, STATUS))?;
    Some(AnimalRecord {
        code: field(row, CODE).to_string(),
        status,
        days_in_process: parse_count(field(row, DAYS)),
        parities: parse_count(field(row, PARITIES)),
        location: field(row, LOCATION).to_string(),
        genetic_line: field(row, GENETIC).to_string(),
        group: field(row, GROUP).to_string(),
    })
}
