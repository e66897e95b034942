//! Document IPC command handlers.
//!
//! Documents have no id of their own; they are addressed by their position
//! in the parent sub-milestone's list.

use std::sync::RwLock;

use crate::error::AppError;
use crate::models::{Document, DocumentStatus, SubMilestone};
use crate::state::Tracker;
#[cfg(feature = "desktop")]
use crate::state::AppState;

use super::sub_milestones::sub_milestone_not_found;
use super::{milestone_not_found, mutate_tracker, required_text, TrackerUpdate};

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInput {
    pub name: String,
    #[serde(default)]
    pub status: DocumentStatus,
}

impl DocumentInput {
    fn into_document(self) -> Result<Document, AppError> {
        Ok(Document {
            name: required_text(&self.name, "document name")?,
            status: self.status,
        })
    }
}

fn locate_sub<'a>(
    tracker: &'a mut Tracker,
    milestone_id: &str,
    sub_id: &str,
) -> Result<&'a mut SubMilestone, AppError> {
    tracker
        .milestone_mut(milestone_id)
        .ok_or_else(|| milestone_not_found(milestone_id))?
        .sub_milestone_mut(sub_id)
        .ok_or_else(|| sub_milestone_not_found(milestone_id, sub_id))
}

fn document_not_found(sub_id: &str, index: usize) -> AppError {
    AppError::NotFound(format!("document #{index} not found in sub-milestone {sub_id}"))
}

// ── add_document ──────────────────────────────────────────────────────────────

pub(crate) fn add_document_inner(
    milestone_id: &str,
    sub_id: &str,
    input: DocumentInput,
    tracker_lock: &RwLock<Tracker>,
) -> Result<TrackerUpdate, AppError> {
    let document = input.into_document()?;
    mutate_tracker(tracker_lock, |tracker| {
        locate_sub(tracker, milestone_id, sub_id)?
            .documents
            .push(document);
        Ok(())
    })
}

// ── edit_document ─────────────────────────────────────────────────────────────

/// Replace the name and status of the document at `index`.
pub(crate) fn edit_document_inner(
    milestone_id: &str,
    sub_id: &str,
    index: usize,
    input: DocumentInput,
    tracker_lock: &RwLock<Tracker>,
) -> Result<TrackerUpdate, AppError> {
    let document = input.into_document()?;
    mutate_tracker(tracker_lock, |tracker| {
        let slot = locate_sub(tracker, milestone_id, sub_id)?
            .documents
            .get_mut(index)
            .ok_or_else(|| document_not_found(sub_id, index))?;
        *slot = document;
        Ok(())
    })
}

// ── delete_document ───────────────────────────────────────────────────────────

pub(crate) fn delete_document_inner(
    milestone_id: &str,
    sub_id: &str,
    index: usize,
    tracker_lock: &RwLock<Tracker>,
) -> Result<TrackerUpdate, AppError> {
    mutate_tracker(tracker_lock, |tracker| {
        let sub = locate_sub(tracker, milestone_id, sub_id)?;
        if index >= sub.documents.len() {
            return Err(document_not_found(sub_id, index));
        }
        sub.documents.remove(index);
        Ok(())
    })
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn add_document(
    milestone_id: String,
    sub_id: String,
    input: DocumentInput,
    state: tauri::State<'_, AppState>,
) -> Result<TrackerUpdate, AppError> {
    add_document_inner(&milestone_id, &sub_id, input, &state.tracker)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn edit_document(
    milestone_id: String,
    sub_id: String,
    index: usize,
    input: DocumentInput,
    state: tauri::State<'_, AppState>,
) -> Result<TrackerUpdate, AppError> {
    edit_document_inner(&milestone_id, &sub_id, index, input, &state.tracker)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn delete_document(
    milestone_id: String,
    sub_id: String,
    index: usize,
    state: tauri::State<'_, AppState>,
) -> Result<TrackerUpdate, AppError> {
    delete_document_inner(&milestone_id, &sub_id, index, &state.tracker)
}
