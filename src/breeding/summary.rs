//! Status aggregator: per-status counts and productivity KPIs.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{AnimalRecord, StatusCode};

/// Counts and KPI percentages over one filtered record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub total_count: usize,
    /// One entry per status code, zero-filled, in chart order.
    pub counts_by_status: BTreeMap<StatusCode, usize>,
    /// Sum over `S`, `L`, `W`.
    pub productive_count: usize,
    /// Sum over `H`, `N`, `A`.
    pub problem_count: usize,
    pub productive_percent: f64,
    pub problem_percent: f64,
}

/// Chart-ready status series, always the six codes in `S L W H N A` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<&'static str>,
    pub values: Vec<usize>,
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `round1(100 * part / total)`, or `0.0` for an empty set.
pub fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(100.0 * part as f64 / total as f64)
}

pub fn summarize(records: &[&AnimalRecord]) -> StatusSummary {
    let mut counts: BTreeMap<StatusCode, usize> =
        StatusCode::ALL.iter().map(|s| (*s, 0)).collect();
    for record in records {
        *counts.entry(record.status).or_insert(0) += 1;
    }

    let total = records.len();
    let productive: usize = counts
        .iter()
        .filter(|(s, _)| s.is_productive())
        .map(|(_, n)| n)
        .sum();
    let problem: usize = counts
        .iter()
        .filter(|(s, _)| s.is_problem())
        .map(|(_, n)| n)
        .sum();

    StatusSummary {
        total_count: total,
        counts_by_status: counts,
        productive_count: productive,
        problem_count: problem,
        productive_percent: percent(productive, total),
        problem_percent: percent(problem, total),
    }
}

impl StatusSummary {
    pub fn chart(&self) -> ChartSeries {
        ChartSeries {
            labels: StatusCode::ALL.iter().map(|s| s.as_str()).collect(),
            values: StatusCode::ALL
                .iter()
                .map(|s| self.counts_by_status.get(s).copied().unwrap_or(0))
                .collect(),
        }
    }
}
