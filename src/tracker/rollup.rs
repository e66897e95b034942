//! Completion roll-up: documents → sub-milestone → milestone.
//!
//! Completion is always derived, never entered: a sub-milestone is the share
//! of approved documents, a milestone is the mean of its sub-milestones.
//! Both round half up on exact integer arithmetic, so recomputing an
//! already rolled-up tree never drifts.

use crate::models::{Document, DocumentStatus, Milestone, SubMilestone};

/// `round(numerator / denominator)` with halves rounded up.
///
/// `denominator` must be non-zero.
fn div_round_half_up(numerator: u64, denominator: u64) -> u64 {
    (2 * numerator + denominator) / (2 * denominator)
}

/// Clamp an integer percentage into `[0, 100]`.
pub fn clamp_percent(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

/// Coerce an externally supplied completion value.
///
/// Numbers and numeric strings are truncated and clamped; anything else
/// (null, booleans, garbage text) becomes 0.
pub fn clamp_completion(raw: &serde_json::Value) -> u8 {
    use serde_json::Value;

    let parsed = match raw {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    };
    parsed.map_or(0, clamp_percent)
}

/// Share of approved documents, 0 when there are none.
pub fn document_completion(documents: &[Document]) -> u8 {
    if documents.is_empty() {
        return 0;
    }
    let approved = documents
        .iter()
        .filter(|d| d.status == DocumentStatus::Approved)
        .count() as u64;
    let pct = div_round_half_up(100 * approved, documents.len() as u64);
    clamp_percent(pct as i64)
}

/// Rounded mean of the sub-milestone completions, 0 when there are none.
pub fn milestone_completion(subs: &[SubMilestone]) -> u8 {
    if subs.is_empty() {
        return 0;
    }
    let sum: u64 = subs.iter().map(|s| u64::from(s.completion.min(100))).sum();
    clamp_percent(div_round_half_up(sum, subs.len() as u64) as i64)
}

/// Recompute one milestone bottom-up.
pub fn recalculate_milestone(milestone: &mut Milestone) {
    for sub in &mut milestone.sub_milestones {
        sub.completion = document_completion(&sub.documents);
    }
    milestone.completion = milestone_completion(&milestone.sub_milestones);
}

/// Recompute every milestone in the tree.
pub fn recalculate_all(milestones: &mut [Milestone]) {
    for milestone in milestones {
        recalculate_milestone(milestone);
    }
}
