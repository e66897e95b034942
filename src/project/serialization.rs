//! Atomic save and validated load for the tracker file.
//!
//! # Save
//! 1. Convert the in-memory milestones to [`MilestoneEntry`] values.
//! 2. Write the pretty-printed JSON array to `<target>.tmp` (same directory
//!    so the rename stays on one filesystem).
//! 3. Atomically rename the temp file over the target.
//! On any failure the temp file is deleted and the original is left intact.
//!
//! # Load
//! [`load`] is strict and reports every problem as
//! [`AppError::ProjectLoad`]. [`load_or_seed`] never fails: a missing,
//! malformed or empty file falls back to the default seed and the reason is
//! handed back as a [`Fallback`]. Both re-derive completion on the way in.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::types::MilestoneEntry;
use crate::error::AppError;
use crate::models::Milestone;
use crate::tracker::{default_milestones, rollup};

/// Why [`load_or_seed`] used the default seed instead of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// Nothing exists at the path yet.
    Missing,
    /// The file is a valid but empty milestone array.
    Empty,
    /// The file exists but is not a readable milestone array. Its content
    /// must not be overwritten implicitly.
    Unreadable(String),
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("tracker file does not exist"),
            Self::Empty => f.write_str("tracker file holds no milestones"),
            Self::Unreadable(reason) => f.write_str(reason),
        }
    }
}

/// Result of [`load_or_seed`].
#[derive(Debug)]
pub struct LoadOutcome {
    pub milestones: Vec<Milestone>,
    /// Set when the seed was used instead of the file.
    pub fallback: Option<Fallback>,
}

impl LoadOutcome {
    /// Path that a later save without an explicit target may write to.
    ///
    /// `None` when the file at `path` could not be read, so the seed never
    /// replaces content the user can still repair.
    pub fn save_target(&self, path: &Path) -> Option<PathBuf> {
        match self.fallback {
            Some(Fallback::Unreadable(_)) => None,
            _ => Some(path.to_path_buf()),
        }
    }
}

/// Save `milestones` to `path` using an atomic write.
pub fn save(milestones: &[Milestone], path: &Path) -> Result<(), AppError> {
    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    if let Err(e) = write_json(milestones, &tmp_path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }

    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        AppError::ProjectSave(format!("rename to final path failed: {e}"))
    })?;

    tracing::info!(path = %path.display(), milestones = milestones.len(), "tracker saved");
    Ok(())
}

/// Load the milestone array at `path` with completions re-derived.
///
/// An empty array is returned as-is; callers that need a non-empty tree use
/// [`load_or_seed`].
pub fn load(path: &Path) -> Result<Vec<Milestone>, AppError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::ProjectLoad(format!("cannot open file: {e}")))?;
    parse(&text)
}

/// Parse the persisted form from text.
pub fn parse(text: &str) -> Result<Vec<Milestone>, AppError> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| AppError::ProjectLoad(format!("invalid JSON: {e}")))?;
    if !value.is_array() {
        return Err(AppError::ProjectLoad(
            "expected a JSON array of milestones".to_string(),
        ));
    }
    let entries: Vec<MilestoneEntry> = serde_json::from_value(value)
        .map_err(|e| AppError::ProjectLoad(format!("invalid milestone entry: {e}")))?;

    let mut milestones: Vec<Milestone> = entries.into_iter().map(Milestone::from).collect();
    rollup::recalculate_all(&mut milestones);
    Ok(milestones)
}

/// Load `path`, falling back to the default seed when it is missing,
/// malformed, not an array, or empty.
pub fn load_or_seed(path: &Path) -> LoadOutcome {
    let fallback = if !path.exists() {
        Fallback::Missing
    } else {
        match load(path) {
            Ok(milestones) if !milestones.is_empty() => {
                tracing::info!(path = %path.display(), milestones = milestones.len(), "tracker loaded");
                return LoadOutcome {
                    milestones,
                    fallback: None,
                };
            }
            Ok(_) => Fallback::Empty,
            Err(e) => Fallback::Unreadable(e.to_string()),
        }
    };

    tracing::warn!(path = %path.display(), reason = %fallback, "using default milestones");
    LoadOutcome {
        milestones: default_milestones(),
        fallback: Some(fallback),
    }
}

fn write_json(milestones: &[Milestone], path: &Path) -> Result<(), AppError> {
    let entries: Vec<MilestoneEntry> = milestones.iter().map(MilestoneEntry::from).collect();
    let json = serde_json::to_string_pretty(&entries)
        .map_err(|e| AppError::ProjectSave(format!("cannot serialize milestones: {e}")))?;

    let mut file = std::fs::File::create(path)
        .map_err(|e| AppError::ProjectSave(format!("cannot create temp file: {e}")))?;
    file.write_all(json.as_bytes())
        .map_err(|e| AppError::ProjectSave(format!("cannot write temp file: {e}")))?;
    file.sync_all()
        .map_err(|e| AppError::ProjectSave(format!("cannot flush temp file: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentStatus;

    #[test]
    fn round_trip_keeps_completions() {
        let milestones = default_milestones();
        let tmp = std::env::temp_dir().join("agrodash_test_round_trip.json");

        save(&milestones, &tmp).expect("save should succeed");
        let loaded = load(&tmp).expect("load should succeed");
        let _ = std::fs::remove_file(&tmp);

        assert_eq!(loaded, milestones);
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let tmp = std::env::temp_dir().join("agrodash_test_no_tmp.json");
        save(&default_milestones(), &tmp).expect("save should succeed");
        let leftover = tmp.with_file_name("agrodash_test_no_tmp.json.tmp");
        assert!(!leftover.exists());
        let _ = std::fs::remove_file(&tmp);
    }

    #[test]
    fn save_into_missing_directory_fails_with_project_save() {
        let result = save(&default_milestones(), Path::new("/nonexistent/dir/tracker.json"));
        assert!(matches!(result, Err(AppError::ProjectSave(_))));
    }

    #[test]
    fn parse_recomputes_stale_completion() {
        let text = r#"[{ "id": "h1", "title": "A", "completion": 90, "subMilestones": [
            { "id": "s1", "title": "B", "completion": 10,
              "documents": ["One [approved]", "Two [approved]", "Three [pending]"] }
        ]}]"#;
        let milestones = parse(text).expect("parse");
        assert_eq!(milestones[0].sub_milestones[0].completion, 67);
        assert_eq!(milestones[0].completion, 67);
        assert_eq!(
            milestones[0].sub_milestones[0].documents[2].status,
            DocumentStatus::Pending
        );
    }

    #[test]
    fn parse_rejects_non_array() {
        let result = parse(r#"{ "id": "h1" }"#);
        match result.expect_err("object is not a tracker file") {
            AppError::ProjectLoad(msg) => assert!(msg.contains("array"), "got: {msg}"),
            other => panic!("expected AppError::ProjectLoad, got {other:?}"),
        }
    }

    #[test]
    fn load_fails_gracefully_on_missing_file() {
        let result = load(Path::new("/nonexistent/path/tracker.json"));
        assert!(matches!(result, Err(AppError::ProjectLoad(_))));
    }

    #[test]
    fn load_or_seed_falls_back_on_missing_file() {
        let path = Path::new("/nonexistent/path/tracker.json");
        let outcome = load_or_seed(path);
        assert_eq!(outcome.milestones, default_milestones());
        assert_eq!(outcome.fallback, Some(Fallback::Missing));
        assert_eq!(outcome.save_target(path).as_deref(), Some(path));
    }

    #[test]
    fn load_or_seed_falls_back_on_empty_array() {
        let tmp = std::env::temp_dir().join("agrodash_test_empty_tracker.json");
        std::fs::write(&tmp, "[]").expect("write fixture");
        let outcome = load_or_seed(&tmp);
        let _ = std::fs::remove_file(&tmp);
        assert_eq!(outcome.milestones.len(), 3);
        assert_eq!(outcome.fallback, Some(Fallback::Empty));
        assert!(outcome.save_target(&tmp).is_some());
    }

    #[test]
    fn load_or_seed_falls_back_on_malformed_json() {
        let tmp = std::env::temp_dir().join("agrodash_test_malformed_tracker.json");
        std::fs::write(&tmp, "[{ not json").expect("write fixture");
        let outcome = load_or_seed(&tmp);
        let _ = std::fs::remove_file(&tmp);
        assert_eq!(outcome.milestones[0].id, "h1");
        match &outcome.fallback {
            Some(Fallback::Unreadable(reason)) => assert!(reason.contains("JSON"), "got: {reason}"),
            other => panic!("expected Unreadable, got {other:?}"),
        }
        assert!(outcome.save_target(&tmp).is_none());
    }
}
