//! Breeding-status classifier.
//!
//! ```text
//! breeding/
//! ├── config.rs  : window thresholds, site and genetic codes (TOML)
//! ├── filter.rs  : record filter and filter options
//! ├── summary.rs : per-status counts and KPI percentages
//! ├── red_list.rs: problem animals and recommended actions
//! └── windows.rs : biological window violations
//! ```
//!
//! Everything here is a pure function of `(records, filter, config)`.
//! [`analyze`] runs the whole pipeline and is re-invoked in full on every
//! filter or dataset change.

pub mod config;
pub mod filter;
pub mod red_list;
pub mod summary;
pub mod windows;

use serde::Serialize;

use crate::models::{AnimalRecord, FilterSelection};

pub use config::BreedingConfig;
pub use red_list::{RecommendedAction, RedListEntry};
pub use summary::{ChartSeries, StatusSummary};
pub use windows::{ViolationType, WindowReport, WindowViolation};

/// Internal error type for configuration failures.
/// The IPC layer maps these to `AppError::Config` at the boundary.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Read(String),
    #[error("config parse error: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Every aggregate the breeding dashboard displays for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedingReport {
    pub summary: StatusSummary,
    pub chart: ChartSeries,
    pub red_list_count: usize,
    pub red_list: Vec<RedListEntry>,
    pub windows: WindowReport,
}

/// Filter `records` and compute every aggregate over the filtered subset.
pub fn analyze(
    records: &[AnimalRecord],
    filter: &FilterSelection,
    cfg: &BreedingConfig,
) -> BreedingReport {
    let filtered = filter::apply(records, filter, &cfg.genetics);
    let summary = summary::summarize(&filtered);
    let red_list = red_list::extract(&filtered);

    BreedingReport {
        chart: summary.chart(),
        summary,
        red_list_count: red_list.len(),
        red_list,
        windows: windows::validate(&filtered, cfg),
    }
}

/// Exact, case-insensitive code lookup inside the filtered set.
///
/// An empty query returns nothing.
pub fn search_by_code<'a>(
    records: &'a [AnimalRecord],
    filter: &FilterSelection,
    cfg: &BreedingConfig,
    code: &str,
) -> Vec<&'a AnimalRecord> {
    let wanted = code.trim().to_uppercase();
    if wanted.is_empty() {
        return Vec::new();
    }
    filter::apply(records, filter, &cfg.genetics)
        .into_iter()
        .filter(|r| r.code.trim().to_uppercase() == wanted)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeneticFilter, Selection, StatusCode};

    fn animal(code: &str, status: StatusCode, days: u32, line: &str) -> AnimalRecord {
        AnimalRecord {
            code: code.to_string(),
            status,
            days_in_process: days,
            parities: 2,
            location: "North".to_string(),
            genetic_line: line.to_string(),
            group: "G1".to_string(),
        }
    }

    fn herd() -> Vec<AnimalRecord> {
        vec![
            animal("c1", StatusCode::Served, 120, "LINE_A"),
            animal("c2", StatusCode::Lactating, 10, "LINE_B"),
            animal("c3", StatusCode::NotPregnant, 30, "LINE_A"),
            animal("c4", StatusCode::HeatNotServed, 2, "PURE_SUBLINE"),
        ]
    }

    #[test]
    fn analyze_combines_all_aggregates() {
        let records = herd();
        let report = analyze(&records, &FilterSelection::default(), &BreedingConfig::default());
        assert_eq!(report.summary.total_count, 4);
        assert_eq!(report.summary.productive_percent, 50.0);
        assert_eq!(report.red_list_count, 2);
        assert_eq!(report.red_list[0].record.code, "c4");
        assert_eq!(report.windows.counts.gestation_overdue, 1);
        assert_eq!(report.chart.values, [1, 1, 0, 1, 1, 0]);
    }

    #[test]
    fn analyze_respects_filter() {
        let records = herd();
        let filter = FilterSelection {
            genetic: GeneticFilter::LineB,
            ..Default::default()
        };
        let report = analyze(&records, &filter, &BreedingConfig::default());
        assert_eq!(report.summary.total_count, 1);
        assert_eq!(report.red_list_count, 0);
        assert_eq!(report.windows.counts.gestation_overdue, 0);
    }

    #[test]
    fn analyze_is_deterministic() {
        let records = herd();
        let cfg = BreedingConfig::default();
        let filter = FilterSelection::default();
        assert_eq!(analyze(&records, &filter, &cfg), analyze(&records, &filter, &cfg));
    }

    #[test]
    fn search_is_case_insensitive_within_filter() {
        let records = herd();
        let cfg = BreedingConfig::default();
        let found = search_by_code(&records, &FilterSelection::default(), &cfg, " C3 ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, "c3");

        let filter = FilterSelection {
            parities: Selection::Only(5),
            ..Default::default()
        };
        assert!(search_by_code(&records, &filter, &cfg, "c3").is_empty());
        assert!(search_by_code(&records, &FilterSelection::default(), &cfg, "  ").is_empty());
    }
}
