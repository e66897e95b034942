//! Tauri IPC command handlers.
//!
//! Sub-modules are grouped by concern:
//! - [`herd`]: herd loading, filter, breeding snapshot, search
//! - [`feedlot`]: feedlot loading, filter, weight-gain snapshot
//! - [`file`]: tracker load / save / reset and snapshot
//! - [`milestones`]: milestone CRUD, move and reorder
//! - [`sub_milestones`]: sub-milestone CRUD
//! - [`documents`]: document CRUD
//!
//! Every handler is split into a synchronous `_inner` function that takes the
//! relevant `&RwLock<..>` (testable without Tauri) and a
//! `#[tauri::command]` wrapper compiled only with the `desktop` feature.

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use sha2::Digest as _;

use crate::dataset::{DatasetError, Imported};
use crate::error::AppError;
use crate::models::Milestone;
use crate::state::{Feedlot, Herd, LoadedDataset, Tracker};

pub mod documents;
pub mod feedlot;
pub mod file;
pub mod herd;
pub mod milestones;
pub mod sub_milestones;

pub(crate) fn read_herd(lock: &RwLock<Herd>) -> Result<RwLockReadGuard<'_, Herd>, AppError> {
    lock.read()
        .map_err(|e| AppError::Io(format!("herd lock poisoned: {e}")))
}

pub(crate) fn write_herd(lock: &RwLock<Herd>) -> Result<RwLockWriteGuard<'_, Herd>, AppError> {
    lock.write()
        .map_err(|e| AppError::Io(format!("herd lock poisoned: {e}")))
}

pub(crate) fn read_feedlot(
    lock: &RwLock<Feedlot>,
) -> Result<RwLockReadGuard<'_, Feedlot>, AppError> {
    lock.read()
        .map_err(|e| AppError::Io(format!("feedlot lock poisoned: {e}")))
}

pub(crate) fn write_feedlot(
    lock: &RwLock<Feedlot>,
) -> Result<RwLockWriteGuard<'_, Feedlot>, AppError> {
    lock.write()
        .map_err(|e| AppError::Io(format!("feedlot lock poisoned: {e}")))
}

/// Import `path` and hash its bytes on the blocking thread pool.
pub(crate) async fn read_dataset<R>(
    path: PathBuf,
    import: fn(&Path) -> Result<Imported<R>, DatasetError>,
) -> Result<LoadedDataset<R>, AppError>
where
    R: Send + 'static,
{
    let path_clone = path.clone();
    let blocking_result = tokio::task::spawn_blocking(move || {
        let imported = import(&path_clone)?;
        let bytes = std::fs::read(&path_clone)?;
        let digest = sha2::Sha256::digest(&bytes);
        Ok::<_, AppError>((imported, format!("{digest:x}")))
    })
    .await
    .map_err(|e| AppError::DatasetLoad(format!("import task panicked: {e}")))?;

    let (imported, checksum) = blocking_result?;
    Ok(LoadedDataset {
        path,
        checksum,
        loaded_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        records: imported.records,
        skipped_rows: imported.skipped_rows,
    })
}

pub(crate) fn read_tracker(
    lock: &RwLock<Tracker>,
) -> Result<RwLockReadGuard<'_, Tracker>, AppError> {
    lock.read()
        .map_err(|e| AppError::Io(format!("tracker lock poisoned: {e}")))
}

pub(crate) fn write_tracker(
    lock: &RwLock<Tracker>,
) -> Result<RwLockWriteGuard<'_, Tracker>, AppError> {
    lock.write()
        .map_err(|e| AppError::Io(format!("tracker lock poisoned: {e}")))
}

/// Trimmed, non-empty text or a [`AppError::Validation`] naming `field`.
pub(crate) fn required_text(raw: &str, field: &str) -> Result<String, AppError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(text.to_string())
}

pub(crate) fn milestone_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("milestone {id} not found"))
}

/// Result of a successful tracker mutation: the new revision plus the full
/// rolled-up tree, so the frontend can re-render in one pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerUpdate {
    pub revision: u64,
    pub milestones: Vec<Milestone>,
}

impl From<&Tracker> for TrackerUpdate {
    fn from(t: &Tracker) -> Self {
        Self {
            revision: t.revision,
            milestones: t.milestones.clone(),
        }
    }
}

/// Apply `edit` under the tracker write lock. On success the tree is rolled
/// up and the revision bumped; on error nothing is committed.
///
/// `edit` must validate before it mutates.
pub(crate) fn mutate_tracker<F>(lock: &RwLock<Tracker>, edit: F) -> Result<TrackerUpdate, AppError>
where
    F: FnOnce(&mut Tracker) -> Result<(), AppError>,
{
    let mut tracker = write_tracker(lock)?;
    edit(&mut tracker)?;
    let revision = tracker.commit();
    tracing::debug!(revision, "tracker updated");
    Ok(TrackerUpdate::from(&*tracker))
}
