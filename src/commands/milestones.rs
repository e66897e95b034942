//! Milestone CRUD IPC command handlers.
//!
//! All handlers follow the `_inner` + `#[tauri::command]` wrapper pattern:
//! - `_inner` functions take `&RwLock<Tracker>` and contain the business logic.
//!   They are synchronous and directly testable without Tauri.
//! - `#[tauri::command]` wrappers extract managed state and delegate to `_inner`.
//!
//! Mutations go through [`super::mutate_tracker`], so a rejected edit leaves
//! the tree and its revision untouched.

use std::collections::HashSet;
use std::sync::RwLock;

use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Milestone, Priority};
use crate::state::Tracker;
#[cfg(feature = "desktop")]
use crate::state::AppState;

use super::{milestone_not_found, mutate_tracker, read_tracker, required_text, TrackerUpdate};

// ── Input type ────────────────────────────────────────────────────────────────

/// Editable milestone fields. Completion is derived and never accepted.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
}

// ── add_milestone ─────────────────────────────────────────────────────────────

/// Testable inner logic for [`add_milestone`].
///
/// Appends a milestone with a generated id and no sub-milestones.
pub(crate) fn add_milestone_inner(
    input: MilestoneInput,
    tracker_lock: &RwLock<Tracker>,
) -> Result<TrackerUpdate, AppError> {
    let title = required_text(&input.title, "title")?;
    mutate_tracker(tracker_lock, |tracker| {
        tracker.milestones.push(Milestone {
            id: format!("h_{}", Uuid::new_v4().simple()),
            title,
            description: input.description.trim().to_string(),
            priority: input.priority,
            completion: 0,
            sub_milestones: Vec::new(),
        });
        Ok(())
    })
}

// ── edit_milestone ────────────────────────────────────────────────────────────

pub(crate) fn edit_milestone_inner(
    id: &str,
    input: MilestoneInput,
    tracker_lock: &RwLock<Tracker>,
) -> Result<TrackerUpdate, AppError> {
    let title = required_text(&input.title, "title")?;
    mutate_tracker(tracker_lock, |tracker| {
        let entry = tracker
            .milestone_mut(id)
            .ok_or_else(|| milestone_not_found(id))?;
        entry.title = title;
        entry.description = input.description.trim().to_string();
        entry.priority = input.priority;
        Ok(())
    })
}

// ── delete_milestone ──────────────────────────────────────────────────────────

/// Removes the milestone together with its sub-milestones and documents.
pub(crate) fn delete_milestone_inner(
    id: &str,
    tracker_lock: &RwLock<Tracker>,
) -> Result<TrackerUpdate, AppError> {
    mutate_tracker(tracker_lock, |tracker| {
        let before = tracker.milestones.len();
        tracker.milestones.retain(|m| m.id != id);
        if tracker.milestones.len() == before {
            return Err(milestone_not_found(id));
        }
        Ok(())
    })
}

// ── move_milestone ────────────────────────────────────────────────────────────

/// Testable inner logic for [`move_milestone`].
///
/// Removes `source_id` and reinserts it at the index `target_id` occupied
/// before the removal. Moving onto itself or naming an unknown id changes
/// nothing and does not bump the revision.
pub(crate) fn move_milestone_inner(
    source_id: &str,
    target_id: &str,
    tracker_lock: &RwLock<Tracker>,
) -> Result<TrackerUpdate, AppError> {
    let positions = {
        let tracker = read_tracker(tracker_lock)?;
        let find = |id: &str| tracker.milestones.iter().position(|m| m.id == id);
        match (find(source_id), find(target_id)) {
            (Some(src), Some(target)) if src != target => Some((src, target)),
            _ => None,
        }
    };

    let Some((src, target)) = positions else {
        tracing::debug!(source_id, target_id, "milestone move ignored");
        let tracker = read_tracker(tracker_lock)?;
        return Ok(TrackerUpdate::from(&*tracker));
    };

    mutate_tracker(tracker_lock, |tracker| {
        // Positions may be stale if another writer got in between.
        if tracker.milestones.get(src).map(|m| m.id.as_str()) != Some(source_id)
            || target >= tracker.milestones.len()
        {
            return Err(milestone_not_found(source_id));
        }
        let moved = tracker.milestones.remove(src);
        tracker.milestones.insert(target, moved);
        Ok(())
    })
}

// ── reorder_milestones ────────────────────────────────────────────────────────

/// Testable inner logic for [`reorder_milestones`].
///
/// `ids` must contain exactly the current milestone ids, each once.
pub(crate) fn reorder_milestones_inner(
    ids: Vec<String>,
    tracker_lock: &RwLock<Tracker>,
) -> Result<TrackerUpdate, AppError> {
    {
        let unique: HashSet<&String> = ids.iter().collect();
        if unique.len() != ids.len() {
            return Err(AppError::Validation(
                "reorder list contains duplicate milestone IDs".to_string(),
            ));
        }
    }

    mutate_tracker(tracker_lock, |tracker| {
        if ids.len() != tracker.milestones.len() {
            return Err(AppError::Validation(format!(
                "reorder list has {} IDs but the tracker has {} milestones",
                ids.len(),
                tracker.milestones.len()
            )));
        }

        for id in &ids {
            if !tracker.milestones.iter().any(|m| &m.id == id) {
                return Err(milestone_not_found(id));
            }
        }

        // Same length, no duplicates, all present: `ids` is a permutation.
        let mut remaining = std::mem::take(&mut tracker.milestones);
        let mut reordered = Vec::with_capacity(remaining.len());
        for id in &ids {
            if let Some(pos) = remaining.iter().position(|m| &m.id == id) {
                reordered.push(remaining.swap_remove(pos));
            }
        }
        tracker.milestones = reordered;
        Ok(())
    })
}

// ── list_milestones ───────────────────────────────────────────────────────────

pub(crate) fn list_milestones_inner(
    tracker_lock: &RwLock<Tracker>,
) -> Result<TrackerUpdate, AppError> {
    let tracker = read_tracker(tracker_lock)?;
    Ok(TrackerUpdate::from(&*tracker))
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

/// Add a new milestone at the end of the list.
///
/// The milestone ID is generated server-side.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn add_milestone(
    input: MilestoneInput,
    state: tauri::State<'_, AppState>,
) -> Result<TrackerUpdate, AppError> {
    add_milestone_inner(input, &state.tracker)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn edit_milestone(
    id: String,
    input: MilestoneInput,
    state: tauri::State<'_, AppState>,
) -> Result<TrackerUpdate, AppError> {
    edit_milestone_inner(&id, input, &state.tracker)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn delete_milestone(
    id: String,
    state: tauri::State<'_, AppState>,
) -> Result<TrackerUpdate, AppError> {
    delete_milestone_inner(&id, &state.tracker)
}

/// Drag-and-drop move of one milestone onto another's position.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn move_milestone(
    source_id: String,
    target_id: String,
    state: tauri::State<'_, AppState>,
) -> Result<TrackerUpdate, AppError> {
    move_milestone_inner(&source_id, &target_id, &state.tracker)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn reorder_milestones(
    ids: Vec<String>,
    state: tauri::State<'_, AppState>,
) -> Result<TrackerUpdate, AppError> {
    reorder_milestones_inner(ids, &state.tracker)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn list_milestones(
    state: tauri::State<'_, AppState>,
) -> Result<TrackerUpdate, AppError> {
    list_milestones_inner(&state.tracker)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
