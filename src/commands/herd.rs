//! Breeding dashboard command handlers.
//!
//! Every handler that changes the herd store (dataset, filter or
//! configuration) bumps `Herd::revision` and returns a fresh
//! [`BreedingSnapshot`] computed over the whole filtered set.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::Serialize;

use crate::breeding::filter::{self, FilterInput, PARITY_OPTIONS};
use crate::breeding::{self, BreedingReport, ViolationType, WindowViolation};
use crate::error::AppError;
use crate::models::{AnimalRecord, FilterSelection, Severity, StatusCode};
use crate::state::{Herd, LoadedDataset};
#[cfg(feature = "desktop")]
use crate::state::AppState;

use super::{read_dataset, read_herd, write_herd};

// ── Snapshot types ────────────────────────────────────────────────────────────

/// Source file of a loaded dataset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInfo {
    pub path: String,
    /// SHA-256 hex digest of the file at load time.
    pub checksum: String,
    pub loaded_at: String,
    pub record_count: usize,
    pub skipped_rows: usize,
}

impl<R> From<&LoadedDataset<R>> for DatasetInfo {
    fn from(d: &LoadedDataset<R>) -> Self {
        Self {
            path: d.path.to_string_lossy().into_owned(),
            checksum: d.checksum.clone(),
            loaded_at: d.loaded_at.clone(),
            record_count: d.records.len(),
            skipped_rows: d.skipped_rows,
        }
    }
}

/// Everything the breeding dashboard renders for the current store state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedingSnapshot {
    pub revision: u64,
    /// `None` until a herd file has been loaded.
    pub dataset: Option<DatasetInfo>,
    pub filter: FilterSelection,
    pub report: BreedingReport,
}

impl From<&Herd> for BreedingSnapshot {
    fn from(h: &Herd) -> Self {
        Self {
            revision: h.revision,
            dataset: h.dataset.as_ref().map(DatasetInfo::from),
            filter: h.filter.clone(),
            report: h.report(),
        }
    }
}

/// One entry of the genetic-line select.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneticOption {
    /// Token accepted by [`set_filter`].
    pub value: &'static str,
    pub label: String,
}

/// Status legend entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInfo {
    pub code: StatusCode,
    pub description: &'static str,
    pub severity: Severity,
}

/// Values offered by the dashboard filter selects, plus the status legend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub locations: Vec<String>,
    pub genetics: Vec<GeneticOption>,
    pub parities: Vec<u32>,
    pub statuses: Vec<StatusInfo>,
}

// ── load_herd ─────────────────────────────────────────────────────────────────

/// Testable inner logic for [`load_herd`].
///
/// 1. Offloads import + checksum computation to the blocking thread pool.
/// 2. Replaces the dataset in `herd_lock`, keeping the current filter.
/// 3. Returns the new [`BreedingSnapshot`].
pub(crate) async fn load_herd_inner(
    path_str: &str,
    herd_lock: &RwLock<Herd>,
) -> Result<BreedingSnapshot, AppError> {
    let dataset = read_dataset(PathBuf::from(path_str), crate::dataset::import).await?;

    tracing::info!(
        path = %dataset.path.display(),
        records = dataset.records.len(),
        skipped_rows = dataset.skipped_rows,
        "herd loaded"
    );

    let mut herd = write_herd(herd_lock)?;
    herd.dataset = Some(dataset);
    herd.bump();
    Ok(BreedingSnapshot::from(&*herd))
}

// ── set_filter ────────────────────────────────────────────────────────────────

/// Testable inner logic for [`set_filter`].
///
/// Raw values that cannot be coerced do not fail: they resolve to a
/// selection that matches nothing.
pub(crate) fn set_filter_inner(
    input: FilterInput,
    herd_lock: &RwLock<Herd>,
) -> Result<BreedingSnapshot, AppError> {
    let mut herd = write_herd(herd_lock)?;
    let selection = filter::resolve(&input, &herd.config.genetics);
    tracing::debug!(?selection, "filter changed");
    herd.filter = selection;
    herd.bump();
    Ok(BreedingSnapshot::from(&*herd))
}

// ── get_breeding_snapshot ─────────────────────────────────────────────────────

pub(crate) fn get_breeding_snapshot_inner(
    herd_lock: &RwLock<Herd>,
) -> Result<BreedingSnapshot, AppError> {
    let herd = read_herd(herd_lock)?;
    Ok(BreedingSnapshot::from(&*herd))
}

// ── get_window_detail ─────────────────────────────────────────────────────────

/// Testable inner logic for [`get_window_detail`].
///
/// `kind = None` returns the union of all three violation lists.
pub(crate) fn get_window_detail_inner(
    kind: Option<ViolationType>,
    herd_lock: &RwLock<Herd>,
) -> Result<Vec<WindowViolation>, AppError> {
    let herd = read_herd(herd_lock)?;
    let filtered = filter::apply(herd.records(), &herd.filter, &herd.config.genetics);
    Ok(breeding::windows::validate(&filtered, &herd.config).detail(kind))
}

// ── search_animal ─────────────────────────────────────────────────────────────

pub(crate) fn search_animal_inner(
    code: &str,
    herd_lock: &RwLock<Herd>,
) -> Result<Vec<AnimalRecord>, AppError> {
    let herd = read_herd(herd_lock)?;
    Ok(
        breeding::search_by_code(herd.records(), &herd.filter, &herd.config, code)
            .into_iter()
            .cloned()
            .collect(),
    )
}

// ── get_filter_options ────────────────────────────────────────────────────────

pub(crate) fn get_filter_options_inner(herd_lock: &RwLock<Herd>) -> Result<FilterOptions, AppError> {
    let herd = read_herd(herd_lock)?;
    let codes = &herd.config.genetics;
    Ok(FilterOptions {
        locations: filter::location_options(herd.records()),
        genetics: vec![
            GeneticOption {
                value: "ALL",
                label: "All lines".to_string(),
            },
            GeneticOption {
                value: "LINE_A_GROUP",
                label: format!("{} + {}", codes.line_a, codes.pure_subline),
            },
            GeneticOption {
                value: "LINE_B",
                label: codes.line_b.clone(),
            },
            GeneticOption {
                value: "PURE_SUBLINE_ONLY",
                label: format!("{} only", codes.pure_subline),
            },
        ],
        parities: PARITY_OPTIONS.collect(),
        statuses: StatusCode::ALL
            .iter()
            .map(|&code| StatusInfo {
                code,
                description: code.description(),
                severity: code.severity(),
            })
            .collect(),
    })
}

// ── load_breeding_config ──────────────────────────────────────────────────────

/// Testable inner logic for [`load_breeding_config`].
///
/// On error the current configuration stays in place.
pub(crate) fn load_breeding_config_inner(
    path_str: &str,
    herd_lock: &RwLock<Herd>,
) -> Result<BreedingSnapshot, AppError> {
    let cfg = breeding::config::load(&PathBuf::from(path_str))?;
    tracing::info!(path = path_str, "breeding configuration loaded");
    let mut herd = write_herd(herd_lock)?;
    herd.config = cfg;
    herd.bump();
    Ok(BreedingSnapshot::from(&*herd))
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

/// Load a herd file (CSV or JSON) and return the breeding snapshot.
///
/// Parsing runs on a blocking thread pool.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn load_herd(
    path: String,
    state: tauri::State<'_, AppState>,
) -> Result<BreedingSnapshot, AppError> {
    load_herd_inner(&path, &state.herd).await
}

/// Replace the dashboard filter and return the recomputed snapshot.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn set_filter(
    input: FilterInput,
    state: tauri::State<'_, AppState>,
) -> Result<BreedingSnapshot, AppError> {
    set_filter_inner(input, &state.herd)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn get_breeding_snapshot(
    state: tauri::State<'_, AppState>,
) -> Result<BreedingSnapshot, AppError> {
    get_breeding_snapshot_inner(&state.herd)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn get_window_detail(
    kind: Option<ViolationType>,
    state: tauri::State<'_, AppState>,
) -> Result<Vec<WindowViolation>, AppError> {
    get_window_detail_inner(kind, &state.herd)
}

/// Exact, case-insensitive code search within the filtered herd.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn search_animal(
    code: String,
    state: tauri::State<'_, AppState>,
) -> Result<Vec<AnimalRecord>, AppError> {
    search_animal_inner(&code, &state.herd)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn get_filter_options(
    state: tauri::State<'_, AppState>,
) -> Result<FilterOptions, AppError> {
    get_filter_options_inner(&state.herd)
}

/// Replace the breeding configuration from a TOML file.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn load_breeding_config(
    path: String,
    state: tauri::State<'_, AppState>,
) -> Result<BreedingSnapshot, AppError> {
    load_breeding_config_inner(&path, &state.herd)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
