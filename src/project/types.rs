//! Serializable types that mirror the persisted tracker file.
//!
//! A tracker file is a bare JSON array of milestones. These types are the
//! on-disk representation; the in-memory representation lives in
//! [`crate::models`]. Conversion between the two is done here and driven by
//! [`super::serialization`].
//!
//! Reading is lenient: legacy keys (`desc`, `avance`, `subhitos`, `docs`)
//! and legacy priority names are accepted, completion values are coerced,
//! and documents may be either `"name [status]"` strings or
//! `{ name, status }` objects. Writing always produces camelCase keys and
//! encoded document strings.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::models::{Document, DocumentStatus, Milestone, Priority, SubMilestone};
use crate::tracker::rollup;

fn lenient_completion<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(rollup::clamp_completion(&raw))
}

/// Unknown priority names read as `Medium`.
fn lenient_priority<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_default())
}

fn generated_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

/// A document as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentEntry {
    /// Legacy `"name [status]"` form; always used when writing.
    Encoded(String),
    Tagged {
        name: String,
        #[serde(default)]
        status: Option<String>,
    },
}

impl From<&Document> for DocumentEntry {
    fn from(doc: &Document) -> Self {
        Self::Encoded(doc.encode())
    }
}

impl From<DocumentEntry> for Document {
    fn from(entry: DocumentEntry) -> Self {
        match entry {
            DocumentEntry::Encoded(text) => Document::decode(&text),
            DocumentEntry::Tagged { name, status } => Document {
                name: name.trim().to_string(),
                status: status
                    .as_deref()
                    .map_or(DocumentStatus::Pending, DocumentStatus::parse),
            },
        }
    }
}

/// A sub-milestone as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubMilestoneEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "avance", deserialize_with = "lenient_completion")]
    pub completion: u8,
    #[serde(default, alias = "docs")]
    pub documents: Vec<DocumentEntry>,
}

/// A milestone as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "desc")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: Priority,
    #[serde(default, alias = "avance", deserialize_with = "lenient_completion")]
    pub completion: u8,
    #[serde(default, alias = "subhitos")]
    pub sub_milestones: Vec<SubMilestoneEntry>,
}

impl From<&SubMilestone> for SubMilestoneEntry {
    fn from(sub: &SubMilestone) -> Self {
        Self {
            id: sub.id.clone(),
            title: sub.title.clone(),
            completion: sub.completion,
            documents: sub.documents.iter().map(DocumentEntry::from).collect(),
        }
    }
}

impl From<&Milestone> for MilestoneEntry {
    fn from(m: &Milestone) -> Self {
        Self {
            id: m.id.clone(),
            title: m.title.clone(),
            description: m.description.clone(),
            priority: m.priority,
            completion: m.completion,
            sub_milestones: m.sub_milestones.iter().map(SubMilestoneEntry::from).collect(),
        }
    }
}

/// Entries without an id get a fresh one. Completion is carried over as
/// read; the caller re-derives it.
impl From<SubMilestoneEntry> for SubMilestone {
    fn from(entry: SubMilestoneEntry) -> Self {
        Self {
            id: if entry.id.trim().is_empty() {
                generated_id("s")
            } else {
                entry.id
            },
            title: entry.title,
            completion: entry.completion,
            documents: entry.documents.into_iter().map(Document::from).collect(),
        }
    }
}

impl From<MilestoneEntry> for Milestone {
    fn from(entry: MilestoneEntry) -> Self {
        Self {
            id: if entry.id.trim().is_empty() {
                generated_id("h")
            } else {
                entry.id
            },
            title: entry.title,
            description: entry.description,
            priority: entry.priority,
            completion: entry.completion,
            sub_milestones: entry
                .sub_milestones
                .into_iter()
                .map(SubMilestone::from)
                .collect(),
        }
    }
}
