//! Feedlot filter: six exact-match dimensions, plus the option lists
//! offered by the filter selects.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::breeding::filter::is_all_token;
use crate::models::WeighingRecord;

/// Current feedlot filter. `None` leaves a dimension unfiltered.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedlotFilter {
    pub year: Option<String>,
    pub month: Option<String>,
    pub week: Option<String>,
    pub lot_day: Option<String>,
    pub sector: Option<String>,
    pub shed: Option<String>,
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .filter(|v| !is_all_token(v))
        .map(|v| v.trim().to_string())
}

impl FeedlotFilter {
    /// Trim every value and turn empty strings and the "all" tokens into
    /// `None`.
    pub fn normalized(self) -> Self {
        Self {
            year: clean(self.year),
            month: clean(self.month),
            week: clean(self.week),
            lot_day: clean(self.lot_day),
            sector: clean(self.sector),
            shed: clean(self.shed),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn dimension_ok(selected: &Option<String>, value: &str) -> bool {
    selected.as_deref().map_or(true, |s| s == value)
}

/// `true` when `record` passes every dimension of `filter`.
pub fn matches(record: &WeighingRecord, filter: &FeedlotFilter) -> bool {
    dimension_ok(&filter.year, &record.year)
        && dimension_ok(&filter.month, &record.month)
        && dimension_ok(&filter.week, &record.week)
        && dimension_ok(&filter.lot_day, &record.lot_day)
        && dimension_ok(&filter.sector, &record.sector)
        && dimension_ok(&filter.shed, &record.shed)
}

/// Apply `filter` to `records`, keeping input order.
pub fn apply<'a>(records: &'a [WeighingRecord], filter: &FeedlotFilter) -> Vec<&'a WeighingRecord> {
    records.iter().filter(|r| matches(r, filter)).collect()
}

/// Values offered by each filter select.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedlotOptions {
    pub years: Vec<String>,
    pub months: Vec<String>,
    pub weeks: Vec<String>,
    pub lot_days: Vec<String>,
    pub sectors: Vec<String>,
    pub sheds: Vec<String>,
}

/// Numbers in numeric order, before any other text.
fn option_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = values
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    out.sort_by(|a, b| option_order(a, b));
    out
}

/// Distinct non-empty values of each dimension over `records`.
///
/// Fed with the filtered set, the selects only offer values that still have
/// lines under the current filter.
pub fn options(records: &[&WeighingRecord]) -> FeedlotOptions {
    FeedlotOptions {
        years: distinct(records.iter().map(|r| r.year.as_str())),
        months: distinct(records.iter().map(|r| r.month.as_str())),
        weeks: distinct(records.iter().map(|r| r.week.as_str())),
        lot_days: distinct(records.iter().map(|r| r.lot_day.as_str())),
        sectors: distinct(records.iter().map(|r| r.sector.as_str())),
        sheds: distinct(records.iter().map(|r| r.shed.as_str())),
    }
}
