//! Milestone tracker model: milestones own sub-milestones, which own
//! documents.
//!
//! Ownership is strictly nested (`Vec` inside `Vec`), so deleting a parent
//! drops its whole subtree in one removal. Completion values are derived by
//! [`crate::tracker::rollup`]; nothing outside the roll-up writes them.
//!
//! The on-disk shape (legacy keys, `"name [status]"` documents) lives in
//! [`crate::project::types`].

use serde::{Deserialize, Serialize};

/// Milestone priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    #[serde(alias = "Alta")]
    High,
    #[default]
    #[serde(alias = "Media")]
    Medium,
    #[serde(alias = "Baja")]
    Low,
}

/// Lifecycle status of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl DocumentStatus {
    /// Case-insensitive parse; anything unrecognised reads as `Pending`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// A document attached to a sub-milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub name: String,
    #[serde(default)]
    pub status: DocumentStatus,
}

impl Document {
    /// Decode the legacy `"name [status]"` form.
    ///
    /// Text without a trailing bracketed tag is taken whole as the name, with
    /// status `Pending`.
    pub fn decode(text: &str) -> Self {
        let text = text.trim();
        let tagged = text.strip_suffix(']').and_then(|body| {
            let open = body.rfind('[')?;
            let name = &body[..open];
            if !name.ends_with(char::is_whitespace) {
                return None;
            }
            Some((name.trim_end(), &body[open + 1..]))
        });

        match tagged {
            Some((name, status)) => Self {
                name: name.to_string(),
                status: DocumentStatus::parse(status),
            },
            None => Self {
                name: text.to_string(),
                status: DocumentStatus::Pending,
            },
        }
    }

    /// Encode into the legacy `"name [status]"` form.
    pub fn encode(&self) -> String {
        format!("{} [{}]", self.name, self.status.as_str())
    }
}

/// Second level of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubMilestone {
    /// Unique within the parent milestone.
    pub id: String,
    pub title: String,
    /// Percentage in `[0, 100]`, derived from `documents`.
    pub completion: u8,
    pub documents: Vec<Document>,
}

/// Top level of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Percentage in `[0, 100]`, derived from `sub_milestones`.
    pub completion: u8,
    pub sub_milestones: Vec<SubMilestone>,
}

impl Milestone {
    pub fn sub_milestone_mut(&mut self, id: &str) -> Option<&mut SubMilestone> {
        self.sub_milestones.iter_mut().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_splits_name_and_status() {
        let doc = Document::decode("Committee minutes [approved]");
        assert_eq!(doc.name, "Committee minutes");
        assert_eq!(doc.status, DocumentStatus::Approved);
    }

    #[test]
    fn decode_status_is_case_insensitive() {
        let doc = Document::decode("Site plan [APPROVED]");
        assert_eq!(doc.status, DocumentStatus::Approved);
        let doc = Document::decode("Site plan [Rejected]");
        assert_eq!(doc.status, DocumentStatus::Rejected);
    }

    #[test]
    fn decode_uses_last_bracket_group() {
        let doc = Document::decode("Form [A] copy [rejected]");
        assert_eq!(doc.name, "Form [A] copy");
        assert_eq!(doc.status, DocumentStatus::Rejected);
    }

    #[test]
    fn decode_without_tag_defaults_to_pending() {
        let doc = Document::decode("Loose paper");
        assert_eq!(doc.name, "Loose paper");
        assert_eq!(doc.status, DocumentStatus::Pending);

        // No whitespace before the bracket: not a tag.
        let doc = Document::decode("Plan[approved]");
        assert_eq!(doc.name, "Plan[approved]");
        assert_eq!(doc.status, DocumentStatus::Pending);
    }

    #[test]
    fn decode_unknown_tag_reads_as_pending() {
        let doc = Document::decode("Permit [lost]");
        assert_eq!(doc.name, "Permit");
        assert_eq!(doc.status, DocumentStatus::Pending);
    }

    #[test]
    fn encode_then_decode_keeps_name_and_status() {
        let doc = Document {
            name: "Health certificate".to_string(),
            status: DocumentStatus::Rejected,
        };
        assert_eq!(doc.encode(), "Health certificate [rejected]");
        assert_eq!(Document::decode(&doc.encode()), doc);
    }

    #[test]
    fn priority_accepts_legacy_names() {
        let p: Priority = serde_json::from_str("\"Alta\"").expect("deserialize");
        assert_eq!(p, Priority::High);
        let p: Priority = serde_json::from_str("\"Baja\"").expect("deserialize");
        assert_eq!(p, Priority::Low);
        assert_eq!(serde_json::to_value(Priority::Medium).expect("ser"), "Medium");
    }

    #[test]
    fn milestone_fields_are_camel_case() {
        let m = Milestone {
            id: "m1".to_string(),
            title: "Permits".to_string(),
            description: String::new(),
            priority: Priority::High,
            completion: 0,
            sub_milestones: vec![],
        };
        let value = serde_json::to_value(&m).expect("serialize");
        assert!(value.get("subMilestones").is_some());
        assert!(value.get("sub_milestones").is_none());
    }
}
