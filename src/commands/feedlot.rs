//! Feedlot dashboard command handlers.
//!
//! Mirrors the breeding handlers: loading a file or changing the filter
//! bumps `Feedlot::revision` and returns a fresh [`FeedlotSnapshot`].

use std::path::PathBuf;
use std::sync::RwLock;

use serde::Serialize;

use crate::error::AppError;
use crate::feedlot::{FeedlotFilter, FeedlotReport};
use crate::state::Feedlot;
#[cfg(feature = "desktop")]
use crate::state::AppState;

use super::herd::DatasetInfo;
use super::{read_dataset, read_feedlot, write_feedlot};

/// Everything the feedlot dashboard renders for the current store state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedlotSnapshot {
    pub revision: u64,
    /// `None` until a dispatch file has been loaded.
    pub dataset: Option<DatasetInfo>,
    pub filter: FeedlotFilter,
    pub report: FeedlotReport,
}

impl From<&Feedlot> for FeedlotSnapshot {
    fn from(f: &Feedlot) -> Self {
        Self {
            revision: f.revision,
            dataset: f.dataset.as_ref().map(DatasetInfo::from),
            filter: f.filter.clone(),
            report: f.report(),
        }
    }
}

// ── load_feedlot ──────────────────────────────────────────────────────────────

/// Testable inner logic for [`load_feedlot`].
///
/// Replaces the dispatch lines and clears the filter, whose values belong to
/// the previous file.
pub(crate) async fn load_feedlot_inner(
    path_str: &str,
    feedlot_lock: &RwLock<Feedlot>,
) -> Result<FeedlotSnapshot, AppError> {
    let dataset = read_dataset(PathBuf::from(path_str), crate::feedlot::import).await?;

    tracing::info!(
        path = %dataset.path.display(),
        records = dataset.records.len(),
        skipped_rows = dataset.skipped_rows,
        "feedlot dispatch loaded"
    );

    let mut feedlot = write_feedlot(feedlot_lock)?;
    feedlot.dataset = Some(dataset);
    feedlot.filter = FeedlotFilter::default();
    feedlot.bump();
    Ok(FeedlotSnapshot::from(&*feedlot))
}

// ── set_feedlot_filter ────────────────────────────────────────────────────────

pub(crate) fn set_feedlot_filter_inner(
    input: FeedlotFilter,
    feedlot_lock: &RwLock<Feedlot>,
) -> Result<FeedlotSnapshot, AppError> {
    let mut feedlot = write_feedlot(feedlot_lock)?;
    let filter = input.normalized();
    tracing::debug!(?filter, "feedlot filter changed");
    feedlot.filter = filter;
    feedlot.bump();
    Ok(FeedlotSnapshot::from(&*feedlot))
}

// ── get_feedlot_snapshot ──────────────────────────────────────────────────────

pub(crate) fn get_feedlot_snapshot_inner(
    feedlot_lock: &RwLock<Feedlot>,
) -> Result<FeedlotSnapshot, AppError> {
    let feedlot = read_feedlot(feedlot_lock)?;
    Ok(FeedlotSnapshot::from(&*feedlot))
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

/// Load a feedlot dispatch file (CSV or JSON) and return the snapshot.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn load_feedlot(
    path: String,
    state: tauri::State<'_, AppState>,
) -> Result<FeedlotSnapshot, AppError> {
    load_feedlot_inner(&path, &state.feedlot).await
}

/// Replace the feedlot filter; `"all"` or an empty value clears a dimension.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn set_feedlot_filter(
    input: FeedlotFilter,
    state: tauri::State<'_, AppState>,
) -> Result<FeedlotSnapshot, AppError> {
    set_feedlot_filter_inner(input, &state.feedlot)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn get_feedlot_snapshot(
    state: tauri::State<'_, AppState>,
) -> Result<FeedlotSnapshot, AppError> {
    get_feedlot_snapshot_inner(&state.feedlot)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    const DISPATCH_CSV: &str = "Año,MES,Sector,Pabellon,Peso Vivo,Viajes,Agrupacion CAT LIQ\n\
        2024,1,Norte,P1,3000,2,Capones\n\
        2024,1,Sur,P2,1000,1,Hembras\n\
        2024,2,Sur,P3,2000,1,Capones\n\
        2024,2,Sur,P3,,1,Capones\n";

    fn write_fixture(name: &str, text: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        std::fs::write(&tmp, text).expect("write fixture");
        tmp
    }

    #[test]
    fn snapshot_before_load_is_empty() {
        let state = AppState::default();
        let snap = get_feedlot_snapshot_inner(&state.feedlot).expect("snapshot");
        assert_eq!(snap.revision, 0);
        assert!(snap.dataset.is_none());
        assert_eq!(snap.report.kpis.line_count, 0);
        assert_eq!(snap.report.kpis.avg_weight_kg, None);
    }

    #[tokio::test]
    async fn load_feedlot_reports_file_and_kpis() {
        let state = AppState::default();
        let tmp = write_fixture("agrodash_cmd_feedlot_load.csv", DISPATCH_CSV);
        let snap = load_feedlot_inner(tmp.to_str().expect("utf-8 path"), &state.feedlot)
            .await
            .expect("load");
        let _ = std::fs::remove_file(&tmp);

        assert_eq!(snap.revision, 1);
        let info = snap.dataset.expect("dataset info");
        assert_eq!(info.record_count, 3);
        assert_eq!(info.skipped_rows, 1);
        assert_eq!(info.checksum.len(), 64);
        assert_eq!(snap.report.kpis.total_kg, 6000.0);
        assert_eq!(snap.report.kpis.trips, 4.0);
        assert_eq!(snap.report.kpis.kg_per_trip, Some(1500.0));
        assert_eq!(snap.report.options.sectors, ["Norte", "Sur"]);
    }

    #[tokio::test]
    async fn load_missing_file_keeps_store() {
        let state = AppState::default();
        let result = load_feedlot_inner("/nonexistent/dispatch.csv", &state.feedlot).await;
        assert!(matches!(result, Err(AppError::FileNotFound)));
        assert_eq!(state.feedlot.read().expect("read").revision, 0);
    }

    #[tokio::test]
    async fn filter_narrows_and_reload_clears_it() {
        let state = AppState::default();
        let tmp = write_fixture("agrodash_cmd_feedlot_filter.csv", DISPATCH_CSV);
        let path = tmp.to_str().expect("utf-8 path");
        load_feedlot_inner(path, &state.feedlot).await.expect("load");

        let snap = set_feedlot_filter_inner(
            FeedlotFilter {
                sector: Some(" Sur ".to_string()),
                month: Some("all".to_string()),
                ..FeedlotFilter::default()
            },
            &state.feedlot,
        )
        .expect("filter");
        assert_eq!(snap.revision, 2);
        assert_eq!(snap.filter.sector.as_deref(), Some("Sur"));
        assert_eq!(snap.filter.month, None);
        assert_eq!(snap.report.kpis.line_count, 2);
        assert_eq!(snap.report.options.sheds, ["P2", "P3"]);

        let reloaded = load_feedlot_inner(path, &state.feedlot).await.expect("reload");
        let _ = std::fs::remove_file(&tmp);
        assert_eq!(reloaded.revision, 3);
        assert_eq!(reloaded.filter, FeedlotFilter::default());
        assert_eq!(reloaded.report.kpis.line_count, 3);
    }
}
