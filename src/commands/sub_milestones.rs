//! Sub-milestone IPC command handlers.
//!
//! Sub-milestones are addressed by `(milestone_id, sub_id)`. Their
//! completion follows from their documents; the parent milestone is rolled
//! up again after every change.

use std::sync::RwLock;

use uuid::Uuid;

use crate::error::AppError;
use crate::models::SubMilestone;
use crate::state::Tracker;
#[cfg(feature = "desktop")]
use crate::state::AppState;

use super::{milestone_not_found, mutate_tracker, required_text, TrackerUpdate};

pub(crate) fn sub_milestone_not_found(milestone_id: &str, sub_id: &str) -> AppError {
    AppError::NotFound(format!(
        "sub-milestone {sub_id} not found in milestone {milestone_id}"
    ))
}

// ── add_sub_milestone ─────────────────────────────────────────────────────────

/// Testable inner logic for [`add_sub_milestone`].
///
/// Appends an empty sub-milestone with a generated id.
pub(crate) fn add_sub_milestone_inner(
    milestone_id: &str,
    title: &str,
    tracker_lock: &RwLock<Tracker>,
) -> Result<TrackerUpdate, AppError> {
    let title = required_text(title, "title")?;
    mutate_tracker(tracker_lock, |tracker| {
        let milestone = tracker
            .milestone_mut(milestone_id)
            .ok_or_else(|| milestone_not_found(milestone_id))?;
        milestone.sub_milestones.push(SubMilestone {
            id: format!("s_{}", Uuid::new_v4().simple()),
            title,
            completion: 0,
            documents: Vec::new(),
        });
        Ok(())
    })
}

// ── edit_sub_milestone ────────────────────────────────────────────────────────

pub(crate) fn edit_sub_milestone_inner(
    milestone_id: &str,
    sub_id: &str,
    title: &str,
    tracker_lock: &RwLock<Tracker>,
) -> Result<TrackerUpdate, AppError> {
    let title = required_text(title, "title")?;
    mutate_tracker(tracker_lock, |tracker| {
        let sub = tracker
            .milestone_mut(milestone_id)
            .ok_or_else(|| milestone_not_found(milestone_id))?
            .sub_milestone_mut(sub_id)
            .ok_or_else(|| sub_milestone_not_found(milestone_id, sub_id))?;
        sub.title = title;
        Ok(())
    })
}

// ── delete_sub_milestone ──────────────────────────────────────────────────────

/// Removes the sub-milestone and its documents; the parent's completion is
/// recomputed over the remaining children (0 when none are left).
pub(crate) fn delete_sub_milestone_inner(
    milestone_id: &str,
    sub_id: &str,
    tracker_lock: &RwLock<Tracker>,
) -> Result<TrackerUpdate, AppError> {
    mutate_tracker(tracker_lock, |tracker| {
        let milestone = tracker
            .milestone_mut(milestone_id)
            .ok_or_else(|| milestone_not_found(milestone_id))?;
        let before = milestone.sub_milestones.len();
        milestone.sub_milestones.retain(|s| s.id != sub_id);
        if milestone.sub_milestones.len() == before {
            return Err(sub_milestone_not_found(milestone_id, sub_id));
        }
        Ok(())
    })
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn add_sub_milestone(
    milestone_id: String,
    title: String,
    state: tauri::State<'_, AppState>,
) -> Result<TrackerUpdate, AppError> {
    add_sub_milestone_inner(&milestone_id, &title, &state.tracker)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn edit_sub_milestone(
    milestone_id: String,
    sub_id: String,
    title: String,
    state: tauri::State<'_, AppState>,
) -> Result<TrackerUpdate, AppError> {
    edit_sub_milestone_inner(&milestone_id, &sub_id, &title, &state.tracker)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn delete_sub_milestone(
    milestone_id: String,
    sub_id: String,
    state: tauri::State<'_, AppState>,
) -> Result<TrackerUpdate, AppError> {
    delete_sub_milestone_inner(&milestone_id, &sub_id, &state.tracker)
}
