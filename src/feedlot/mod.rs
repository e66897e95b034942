//! Feedlot weight-gain report.
//!
//! ```text
//! feedlot/
//! ├── row.rs    : header aliases and measure parsing → WeighingRecord
//! ├── filter.rs : six-dimension filter and cascading select options
//! └── summary.rs: KPIs and the per-category live-weight breakdown
//! ```
//!
//! Like the breeding classifier, [`analyze`] is a pure function of
//! `(records, filter)` and is re-run in full on every change.

pub mod filter;
pub mod row;
pub mod summary;

use std::path::Path;

use serde::Serialize;

use crate::dataset::{self, DatasetError, Imported};
use crate::models::WeighingRecord;

pub use filter::{FeedlotFilter, FeedlotOptions};
pub use summary::{CategoryShare, FeedlotKpis};

/// Everything the feedlot dashboard displays for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedlotReport {
    pub kpis: FeedlotKpis,
    pub categories: Vec<CategoryShare>,
    /// Select options, computed over the filtered lines.
    pub options: FeedlotOptions,
}

/// Load a feedlot dispatch file (CSV or JSON).
///
/// Lines without a readable live weight are skipped and counted.
///
/// # Errors
///
/// Those of [`dataset::read_rows`], plus [`DatasetError::Parse`] when no row
/// has a live-weight column at all.
pub fn import(path: &Path) -> Result<Imported<WeighingRecord>, DatasetError> {
    let rows = dataset::read_rows(path)?;
    if !row::has_live_weight_column(&rows) {
        return Err(DatasetError::Parse(
            "no live weight column (\"Peso Vivo\") found".to_string(),
        ));
    }

    let total = rows.len();
    let records: Vec<WeighingRecord> = rows.iter().filter_map(row::to_weighing).collect();
    let skipped_rows = total - records.len();
    if skipped_rows > 0 {
        tracing::warn!(skipped_rows, total, "feedlot lines without live weight skipped");
    }
    Ok(Imported {
        records,
        skipped_rows,
    })
}

/// Filter `records` and compute every aggregate over the filtered subset.
pub fn analyze(records: &[WeighingRecord], filter: &FeedlotFilter) -> FeedlotReport {
    let filtered = filter::apply(records, filter);
    FeedlotReport {
        kpis: summary::kpis(&filtered),
        categories: summary::categories(&filtered),
        options: filter::options(&filtered),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISPATCH_CSV: &str = "Año;MES;Semana;Source.Name;Sector;Pabellon; Peso Vivo ;Edad;Ganancia;Viajes;Agrupacion CAT LIQ\n\
        2024;1;2;lote-01;Norte;P1;3000;150;90;2;Capones\n\
        2024;1;3;lote-02;Norte;P2;1000;;30;;Hembras\n\
        2024;2;6;lote-03;Sur;P3;2000;100;;1;Capones\n\
        2024;2;7;lote-04;Sur;P3;;120;40;1;Capones\n";

    fn write_fixture(name: &str, text: &str) -> std::path::PathBuf {
        let tmp = std::env::temp_dir().join(name);
        std::fs::write(&tmp, text).expect("write fixture");
        tmp
    }

    #[test]
    fn import_skips_lines_without_weight() {
        let tmp = write_fixture("agrodash_feedlot_import.csv", DISPATCH_CSV);
        let imported = import(&tmp).expect("import");
        let _ = std::fs::remove_file(&tmp);

        assert_eq!(imported.records.len(), 3);
        assert_eq!(imported.skipped_rows, 1);
        assert_eq!(imported.records[1].category, "Hembras");
        assert_eq!(imported.records[2].sector, "Sur");
    }

    #[test]
    fn import_without_weight_column_fails() {
        let tmp = write_fixture("agrodash_feedlot_no_weight.csv", "Sector;Edad\nNorte;100\n");
        let result = import(&tmp);
        let _ = std::fs::remove_file(&tmp);
        assert!(matches!(result, Err(DatasetError::Parse(msg)) if msg.contains("Peso Vivo")));
    }

    #[test]
    fn import_unknown_extension_is_unsupported() {
        let result = import(Path::new("dispatch.xlsx"));
        assert!(matches!(
            result,
            Err(DatasetError::UnsupportedFormat { extension }) if extension == "xlsx"
        ));
    }

    #[test]
    fn analyze_follows_the_filter() {
        let tmp = write_fixture("agrodash_feedlot_analyze.csv", DISPATCH_CSV);
        let records = import(&tmp).expect("import").records;
        let _ = std::fs::remove_file(&tmp);

        let all = analyze(&records, &FeedlotFilter::default());
        assert_eq!(all.kpis.total_kg, 6000.0);
        assert_eq!(all.kpis.trips, 3.0);
        assert_eq!(all.kpis.kg_per_trip, Some(2000.0));
        assert_eq!(all.categories.len(), 2);
        assert_eq!(all.categories[0].category, "Capones");
        assert_eq!(all.categories[0].kg, 5000.0);
        assert_eq!(all.categories[0].percent, 83.3);
        assert_eq!(all.options.months, ["1", "2"]);

        let north = analyze(
            &records,
            &FeedlotFilter {
                sector: Some("Norte".to_string()),
                ..FeedlotFilter::default()
            },
        );
        assert_eq!(north.kpis.line_count, 2);
        assert_eq!(north.kpis.total_kg, 4000.0);
        assert_eq!(north.options.sheds, ["P1", "P2"]);
        assert_eq!(north.options.months, ["1"]);
    }
}
