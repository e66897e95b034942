//! Record filter: narrows the herd to the animals matching a
//! [`FilterSelection`].
//!
//! Filtering never fails. A value that matches nothing simply produces an
//! empty subset, and input order is preserved.

use std::collections::HashSet;

use crate::models::{AnimalRecord, FilterSelection, GeneticFilter, Selection};

use super::config::{normalize, GeneticCodes};

/// Raw filter values as sent by the frontend selects.
///
/// Absent fields, empty strings and the "all" tokens (`ALL`, `TODOS`,
/// `TODAS`) leave the dimension unfiltered. `parities` may arrive as a JSON
/// number or as a string.
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterInput {
    pub location: Option<String>,
    pub genetic: Option<String>,
    pub parities: Option<serde_json::Value>,
}

/// Parity values offered by the parity select.
pub const PARITY_OPTIONS: std::ops::RangeInclusive<u32> = 0..=10;

pub(crate) fn is_all_token(raw: &str) -> bool {
    matches!(normalize(raw).as_str(), "" | "ALL" | "TODOS" | "TODAS")
}

/// Resolve raw UI values into a typed [`FilterSelection`].
pub fn resolve(input: &FilterInput, codes: &GeneticCodes) -> FilterSelection {
    FilterSelection {
        location: resolve_location(input.location.as_deref()),
        genetic: resolve_genetic(input.genetic.as_deref(), codes),
        parities: resolve_parities(input.parities.as_ref()),
    }
}

fn resolve_location(raw: Option<&str>) -> Selection<String> {
    match raw {
        Some(raw) if !is_all_token(raw) => Selection::Only(raw.trim().to_string()),
        _ => Selection::All,
    }
}

fn resolve_genetic(raw: Option<&str>, codes: &GeneticCodes) -> GeneticFilter {
    let Some(raw) = raw.filter(|r| !is_all_token(r)) else {
        return GeneticFilter::All;
    };
    let key = normalize(raw);

    if key == "LINE_A_GROUP" || key == normalize(&codes.line_a) {
        GeneticFilter::LineAGroup
    } else if key == "LINE_B" || key == normalize(&codes.line_b) {
        GeneticFilter::LineB
    } else if key == "PURE_SUBLINE_ONLY"
        || key == format!("{}_ONLY", normalize(&codes.pure_subline))
    {
        GeneticFilter::PureSublineOnly
    } else {
        GeneticFilter::Unknown(raw.trim().to_string())
    }
}

fn resolve_parities(raw: Option<&serde_json::Value>) -> Selection<u32> {
    use serde_json::Value;

    match raw {
        None | Some(Value::Null) => Selection::All,
        Some(Value::Number(n)) => coerce_parity(n.as_f64()).map_or_else(
            || Selection::Invalid(n.to_string()),
            Selection::Only,
        ),
        Some(Value::String(s)) if is_all_token(s) => Selection::All,
        Some(Value::String(s)) => coerce_parity(s.trim().parse::<f64>().ok())
            .map_or_else(|| Selection::Invalid(s.clone()), Selection::Only),
        Some(other) => Selection::Invalid(other.to_string()),
    }
}

/// Only non-negative whole numbers can equal a parity count.
fn coerce_parity(value: Option<f64>) -> Option<u32> {
    let v = value?;
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) {
        Some(v as u32)
    } else {
        None
    }
}

/// `true` when `record` passes every dimension of `filter`.
pub fn matches(record: &AnimalRecord, filter: &FilterSelection, codes: &GeneticCodes) -> bool {
    let location_ok = match &filter.location {
        Selection::All => true,
        Selection::Only(loc) => normalize(&record.location) == normalize(loc),
        Selection::Invalid(_) => false,
    };

    let line = normalize(&record.genetic_line);
    let genetic_ok = match &filter.genetic {
        GeneticFilter::All => true,
        GeneticFilter::LineAGroup => {
            line == normalize(&codes.line_a) || line == normalize(&codes.pure_subline)
        }
        GeneticFilter::LineB => line == normalize(&codes.line_b),
        GeneticFilter::PureSublineOnly => line == normalize(&codes.pure_subline),
        GeneticFilter::Unknown(_) => false,
    };

    let parities_ok = match &filter.parities {
        Selection::All => true,
        Selection::Only(p) => record.parities == *p,
        Selection::Invalid(_) => false,
    };

    location_ok && genetic_ok && parities_ok
}

/// Apply `filter` to `records`, keeping input order.
pub fn apply<'a>(
    records: &'a [AnimalRecord],
    filter: &FilterSelection,
    codes: &GeneticCodes,
) -> Vec<&'a AnimalRecord> {
    records
        .iter()
        .filter(|r| matches(r, filter, codes))
        .collect()
}

/// Distinct, trimmed, non-empty locations of the full dataset, sorted.
///
/// Locations that differ only in case are one option, spelled as first seen.
pub fn location_options(records: &[AnimalRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut options: Vec<String> = records
        .iter()
        .map(|r| r.location.trim())
        .filter(|l| !l.is_empty() && seen.insert(normalize(l)))
        .map(str::to_string)
        .collect();
    options.sort();
    options
}
