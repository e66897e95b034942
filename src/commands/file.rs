//! Tracker file lifecycle command handlers.
//!
//! All handlers follow the pattern of an `_inner` function (testable without
//! Tauri) wrapped by the `#[tauri::command]` entry point that extracts the
//! managed state.
//!
//! # Error contract
//! Every fallible path returns `Result<_, AppError>`. Loading never fails on
//! file content: a missing or malformed file falls back to the default
//! milestones and the reason goes to the log.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::Serialize;

use crate::error::AppError;
use crate::models::Milestone;
use crate::state::Tracker;
#[cfg(feature = "desktop")]
use crate::state::AppState;
use crate::tracker::default_milestones;

use super::{read_tracker, write_tracker};

/// Full tracker view sent to the frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSnapshot {
    pub revision: u64,
    pub milestones: Vec<Milestone>,
    /// RFC 3339 timestamp of the last save (empty string when not yet saved).
    pub saved_at: String,
    pub source_path: Option<String>,
}

impl From<&Tracker> for TrackerSnapshot {
    fn from(t: &Tracker) -> Self {
        Self {
            revision: t.revision,
            milestones: t.milestones.clone(),
            saved_at: t.saved_at.clone(),
            source_path: t
                .source_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
        }
    }
}

// ── load_tracker ──────────────────────────────────────────────────────────────

/// Testable inner logic for [`load_tracker`].
///
/// Replaces the tree with the file's milestones (or the default set when the
/// file is unusable) and remembers `path` as the save target. A file that
/// exists but cannot be read is not remembered, so a later save without a
/// path cannot overwrite it with the default set.
pub(crate) fn load_tracker_inner(
    path_str: &str,
    tracker_lock: &RwLock<Tracker>,
) -> Result<TrackerSnapshot, AppError> {
    let path_buf = PathBuf::from(path_str);
    let outcome = crate::project::load_or_seed(&path_buf);

    let mut tracker = write_tracker(tracker_lock)?;
    tracker.source_path = outcome.save_target(&path_buf);
    tracker.milestones = outcome.milestones;
    tracker.saved_at.clear();
    tracker.commit();
    Ok(TrackerSnapshot::from(&*tracker))
}

// ── save_tracker ──────────────────────────────────────────────────────────────

/// Testable inner logic for [`save_tracker`].
///
/// Writes to `path_str`, or to the path the tracker was loaded from / last
/// saved to when `None`. Saving does not change the revision.
pub(crate) fn save_tracker_inner(
    path_str: Option<&str>,
    tracker_lock: &RwLock<Tracker>,
) -> Result<TrackerSnapshot, AppError> {
    let mut tracker = write_tracker(tracker_lock)?;
    let path_buf = match path_str {
        Some(p) => PathBuf::from(p),
        None => tracker
            .source_path
            .clone()
            .ok_or_else(|| AppError::Validation("no tracker file path to save to".to_string()))?,
    };

    crate::project::save(&tracker.milestones, &path_buf)?;
    tracker.saved_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    tracker.source_path = Some(path_buf);
    Ok(TrackerSnapshot::from(&*tracker))
}

// ── reset_tracker ─────────────────────────────────────────────────────────────

/// Testable inner logic for [`reset_tracker`].
///
/// Replaces the tree with the default milestones. The save target is kept.
pub(crate) fn reset_tracker_inner(
    tracker_lock: &RwLock<Tracker>,
) -> Result<TrackerSnapshot, AppError> {
    let mut tracker = write_tracker(tracker_lock)?;
    tracker.milestones = default_milestones();
    let revision = tracker.commit();
    tracing::info!(revision, "tracker reset to default milestones");
    Ok(TrackerSnapshot::from(&*tracker))
}

// ── get_tracker_snapshot ──────────────────────────────────────────────────────

pub(crate) fn get_tracker_snapshot_inner(
    tracker_lock: &RwLock<Tracker>,
) -> Result<TrackerSnapshot, AppError> {
    let tracker = read_tracker(tracker_lock)?;
    Ok(TrackerSnapshot::from(&*tracker))
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

/// Load a tracker file, falling back to the default milestones.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn load_tracker(
    path: String,
    state: tauri::State<'_, AppState>,
) -> Result<TrackerSnapshot, AppError> {
    load_tracker_inner(&path, &state.tracker)
}

/// Serialize the milestones to `path`, or to the current source file.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn save_tracker(
    path: Option<String>,
    state: tauri::State<'_, AppState>,
) -> Result<TrackerSnapshot, AppError> {
    save_tracker_inner(path.as_deref(), &state.tracker)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn reset_tracker(
    state: tauri::State<'_, AppState>,
) -> Result<TrackerSnapshot, AppError> {
    reset_tracker_inner(&state.tracker)
}

/// Return the current tracker tree. Acquires a read lock only.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn get_tracker_snapshot(
    state: tauri::State<'_, AppState>,
) -> Result<TrackerSnapshot, AppError> {
    get_tracker_snapshot_inner(&state.tracker)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::milestones::delete_milestone_inner;
    use crate::state::AppState;

    #[test]
    fn snapshot_of_default_tracker() {
        let state = AppState::default();
        let snap = get_tracker_snapshot_inner(&state.tracker).expect("snapshot");
        assert_eq!(snap.revision, 0);
        assert_eq!(snap.milestones.len(), 3);
        assert_eq!(snap.saved_at, "");
        assert!(snap.source_path.is_none());
    }

    #[test]
    fn save_and_load_tracker_round_trip() {
        let state = AppState::default();
        delete_milestone_inner("h2", &state.tracker).expect("delete");

        let tmp = std::env::temp_dir().join("agrodash_cmd_test_round_trip.json");
        let path = tmp.to_str().expect("utf-8 path");
        let saved = save_tracker_inner(Some(path), &state.tracker).expect("save");
        assert!(!saved.saved_at.is_empty());
        assert_eq!(saved.revision, 1);
        assert_eq!(saved.source_path.as_deref(), Some(path));

        let fresh = AppState::default();
        let loaded = load_tracker_inner(path, &fresh.tracker).expect("load");
        let _ = std::fs::remove_file(&tmp);

        assert_eq!(loaded.milestones, saved.milestones);
        assert_eq!(loaded.revision, 1);
        assert_eq!(loaded.source_path.as_deref(), Some(path));
    }

    #[test]
    fn save_without_any_path_is_rejected() {
        let state = AppState::default();
        let result = save_tracker_inner(None, &state.tracker);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn save_reuses_source_path() {
        let state = AppState::default();
        let tmp = std::env::temp_dir().join("agrodash_cmd_test_reuse_path.json");
        state.tracker.write().expect("write lock").source_path = Some(tmp.clone());

        save_tracker_inner(None, &state.tracker).expect("save");
        assert!(tmp.exists());
        let _ = std::fs::remove_file(&tmp);
    }

    #[test]
    fn load_missing_file_falls_back_to_seed() {
        let state = AppState::default();
        delete_milestone_inner("h1", &state.tracker).expect("delete");
        let snap = load_tracker_inner("/nonexistent/tracker.json", &state.tracker).expect("load");
        assert_eq!(snap.milestones, default_milestones());
        assert_eq!(snap.revision, 2);
    }

    #[test]
    fn unreadable_file_is_not_overwritten_by_implicit_save() {
        let tmp = std::env::temp_dir().join("agrodash_cmd_test_unreadable.json");
        let original = r#"[{ "id": "mine", "title": "Own work", "subMilestones": [ }]"#;
        std::fs::write(&tmp, original).expect("write fixture");
        let path = tmp.to_str().expect("utf-8 path");

        let state = AppState::default();
        let snap = load_tracker_inner(path, &state.tracker).expect("load");
        assert_eq!(snap.milestones, default_milestones());
        assert!(snap.source_path.is_none());

        let result = save_tracker_inner(None, &state.tracker);
        let after = std::fs::read_to_string(&tmp).expect("read back");
        let _ = std::fs::remove_file(&tmp);

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(after, original);
    }

    #[test]
    fn missing_file_stays_the_save_target() {
        let tmp = std::env::temp_dir().join("agrodash_cmd_test_new_tracker.json");
        let _ = std::fs::remove_file(&tmp);
        let path = tmp.to_str().expect("utf-8 path");

        let state = AppState::default();
        let snap = load_tracker_inner(path, &state.tracker).expect("load");
        assert_eq!(snap.source_path.as_deref(), Some(path));

        save_tracker_inner(None, &state.tracker).expect("save");
        assert!(tmp.exists());
        let _ = std::fs::remove_file(&tmp);
    }

    #[test]
    fn reset_restores_seed_and_bumps_revision() {
        let state = AppState::default();
        delete_milestone_inner("h1", &state.tracker).expect("delete");
        let snap = reset_tracker_inner(&state.tracker).expect("reset");
        assert_eq!(snap.milestones.len(), 3);
        assert_eq!(snap.revision, 2);
    }
}
