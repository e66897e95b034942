//! Mapping of feedlot dispatch rows onto [`WeighingRecord`].
//!
//! Exports carry Spanish headers, sometimes padded with spaces
//! (`" Peso Vivo "`), and decimal commas.

use crate::dataset::row::{field, RawRow};
use crate::models::WeighingRecord;

/// Category used when a line has none.
pub const UNSPECIFIED_CATEGORY: &str = "Unspecified";

const YEAR: &[&str] = &["año", "ano", "anio", "year"];
const MONTH: &[&str] = &["mes", "month"];
const WEEK: &[&str] = &["semana", "week"];
const LOT_DAY: &[&str] = &["source.name", "dia lote", "día lote", "lotday", "lot_day"];
const SECTOR: &[&str] = &["sector"];
const SHED: &[&str] = &["pabellon", "pabellón", "shed"];
const LIVE_WEIGHT: &[&str] = &["peso vivo", "liveweightkg", "live_weight_kg", "liveweight"];
const AGE: &[&str] = &["edad", "agedays", "age_days", "age"];
const GAIN: &[&str] = &["ganancia", "gain"];
const TRIPS: &[&str] = &["viajes", "trips"];
const CATEGORY: &[&str] = &[
    "agrupacion cat liq",
    "agrupación cat liq",
    "categoria",
    "categoría",
    "category",
];

/// Parse a measure cell. A decimal comma is accepted; empty, unreadable or
/// non-finite values are `None`.
pub fn parse_measure(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.replacen(',', ".", 1)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// `true` when at least one row has a live-weight column. An empty row set
/// passes.
pub fn has_live_weight_column(rows: &[RawRow]) -> bool {
    rows.is_empty()
        || rows
            .iter()
            .any(|row| LIVE_WEIGHT.iter().any(|key| row.contains_key(*key)))
}

/// Convert a row; `None` when the live weight is missing or unreadable.
pub fn to_weighing(row: &RawRow) -> Option<WeighingRecord> {
    let live_weight_kg = parse_measure(field(row, LIVE_WEIGHT))?;
    let category = match field(row, CATEGORY) {
        "" => UNSPECIFIED_CATEGORY,
        c => c,
    };
    Some(WeighingRecord {
        year: field(row, YEAR).to_string(),
        month: field(row, MONTH).to_string(),
        week: field(row, WEEK).to_string(),
        lot_day: field(row, LOT_DAY).to_string(),
        sector: field(row, SECTOR).to_string(),
        shed: field(row, SHED).to_string(),
        live_weight_kg,
        age_days: parse_measure(field(row, AGE)),
        gain: parse_measure(field(row, GAIN)),
        trips: parse_measure(field(row, TRIPS)),
        category: category.to_string(),
    })
}
