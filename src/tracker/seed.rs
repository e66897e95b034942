//! Default milestone set, used when no tracker file can be loaded and by
//! the "reset" action.

use crate::models::{Document, Milestone, Priority, SubMilestone};

use super::rollup;

fn sub(id: &str, title: &str, documents: &[&str]) -> SubMilestone {
    SubMilestone {
        id: id.to_string(),
        title: title.to_string(),
        completion: 0,
        documents: documents.iter().map(|d| Document::decode(d)).collect(),
    }
}

fn milestone(
    id: &str,
    title: &str,
    description: &str,
    priority: Priority,
    subs: Vec<SubMilestone>,
) -> Milestone {
    Milestone {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        priority,
        completion: 0,
        sub_milestones: subs,
    }
}

/// Build a fresh copy of the seed with completions rolled up.
pub fn default_milestones() -> Vec<Milestone> {
    let mut milestones = vec![
        milestone(
            "h1",
            "Milestone 1: Base documentation",
            "Minutes, assessments and initial collection.",
            Priority::High,
            vec![
                sub(
                    "h1s1",
                    "Background review",
                    &[
                        "Technical committee minutes [approved]",
                        "Assessment report [approved]",
                        "Updated site plan [pending]",
                    ],
                ),
                sub(
                    "h1s2",
                    "External document requests",
                    &["Building permit certificate [pending]", "Agriculture service certificate [approved]"],
                ),
            ],
        ),
        milestone(
            "h2",
            "Milestone 2: Municipal permits",
            "Requirements and submission to the municipality.",
            Priority::Medium,
            vec![
                sub(
                    "h2s1",
                    "Regulation review",
                    &["Sanitary certification [pending]", "Zoning plan [pending]"],
                ),
                sub(
                    "h2s2",
                    "Preliminary submission",
                    &["Cover letter [pending]", "Technical presentation [pending]"],
                ),
            ],
        ),
        milestone(
            "h3",
            "Milestone 3: Environmental regularisation",
            "Studies, mitigations and certificates.",
            Priority::Low,
            vec![sub("h3s1", "Impact studies", &["Preliminary study [pending]"])],
        ),
    ];
    rollup::recalculate_all(&mut milestones);
    milestones
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentStatus;

    #[test]
    fn seed_has_three_milestones_in_order() {
        let seed = default_milestones();
        let ids: Vec<&str> = seed.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["h1", "h2", "h3"]);
        assert_eq!(seed[0].priority, Priority::High);
    }

    #[test]
    fn seed_documents_are_decoded() {
        let seed = default_milestones();
        let doc = &seed[0].sub_milestones[0].documents[0];
        assert_eq!(doc.name, "Technical committee minutes");
        assert_eq!(doc.status, DocumentStatus::Approved);
    }

    #[test]
    fn seed_completions_are_rolled_up() {
        let seed = default_milestones();
        // h1s1: 2/3 -> 67, h1s2: 1/2 -> 50, h1: (67 + 50) / 2 = 58.5 -> 59
        assert_eq!(seed[0].sub_milestones[0].completion, 67);
        assert_eq!(seed[0].sub_milestones[1].completion, 50);
        assert_eq!(seed[0].completion, 59);
        assert_eq!(seed[1].completion, 0);
        assert_eq!(seed[2].completion, 0);
    }
}
