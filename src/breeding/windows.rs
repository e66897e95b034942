//! Biological window validator.
//!
//! Flags animals whose time in the current status exceeds the configured
//! window. Rules are status-exclusive, so a record matches at most one
//! violation type.

use serde::Serialize;

use crate::models::{AnimalRecord, StatusCode};

use super::config::{normalize, BreedingConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationType {
    GestationOverdue,
    LactationOverdue,
    WeaningOverdue,
}

impl ViolationType {
    /// Display label; also the primary sort key of the detail table.
    pub fn label(self, cfg: &BreedingConfig) -> String {
        match self {
            Self::GestationOverdue => {
                format!("Gestation > {} days", cfg.windows.gestation_max_days)
            }
            Self::LactationOverdue => {
                format!("Lactation > {} days", cfg.windows.lactation_max_days)
            }
            Self::WeaningOverdue => "Weaned outside window".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowViolation {
    pub record: AnimalRecord,
    pub violation_type: ViolationType,
    pub label: String,
    /// The window that was exceeded, in days.
    pub max_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowCounts {
    pub gestation_overdue: usize,
    pub lactation_overdue: usize,
    pub weaning_overdue: usize,
}

/// Per-category violation lists for one filtered record set.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowReport {
    pub counts: WindowCounts,
    pub gestation: Vec<WindowViolation>,
    pub lactation: Vec<WindowViolation>,
    pub weaning: Vec<WindowViolation>,
}

/// Weaning window that applies to `record`.
///
/// The alternate facility takes precedence; the line-B facility only
/// applies to line-B animals.
pub fn weaning_max_days(record: &AnimalRecord, cfg: &BreedingConfig) -> u32 {
    let location = normalize(&record.location);
    if location == normalize(&cfg.sites.alt_location) {
        cfg.windows.weaning_max_days_alt_location
    } else if location == normalize(&cfg.sites.line_b_location)
        && normalize(&record.genetic_line) == normalize(&cfg.genetics.line_b)
    {
        cfg.windows.weaning_max_days_alt_location_line_b
    } else {
        cfg.windows.weaning_max_days_default
    }
}

/// Evaluate the window rules for one record.
///
/// Returns the violated type and the window it exceeded, or `None` when the
/// record is inside its window (boundaries are inclusive).
pub fn classify(record: &AnimalRecord, cfg: &BreedingConfig) -> Option<(ViolationType, u32)> {
    let (kind, max) = match record.status {
        StatusCode::Served => (ViolationType::GestationOverdue, cfg.windows.gestation_max_days),
        StatusCode::Lactating => (ViolationType::LactationOverdue, cfg.windows.lactation_max_days),
        StatusCode::Weaned => (ViolationType::WeaningOverdue, weaning_max_days(record, cfg)),
        _ => return None,
    };
    (record.days_in_process > max).then_some((kind, max))
}

/// Run the validator over a filtered record set.
pub fn validate(records: &[&AnimalRecord], cfg: &BreedingConfig) -> WindowReport {
    let mut report = WindowReport::default();

    for record in records {
        let Some((kind, max_days)) = classify(record, cfg) else {
            continue;
        };
        let violation = WindowViolation {
            record: (*record).clone(),
            violation_type: kind,
            label: kind.label(cfg),
            max_days,
        };
        match kind {
            ViolationType::GestationOverdue => report.gestation.push(violation),
            ViolationType::LactationOverdue => report.lactation.push(violation),
            ViolationType::WeaningOverdue => report.weaning.push(violation),
        }
    }

    report.counts = WindowCounts {
        gestation_overdue: report.gestation.len(),
        lactation_overdue: report.lactation.len(),
        weaning_overdue: report.weaning.len(),
    };
    report
}

impl WindowReport {
    /// Detail rows for one category, or the union of all three when `kind`
    /// is `None`. Sorted by label ascending, then days descending.
    pub fn detail(&self, kind: Option<ViolationType>) -> Vec<WindowViolation> {
        let mut rows: Vec<WindowViolation> = match kind {
            Some(ViolationType::GestationOverdue) => self.gestation.clone(),
            Some(ViolationType::LactationOverdue) => self.lactation.clone(),
            Some(ViolationType::WeaningOverdue) => self.weaning.clone(),
            None => self
                .gestation
                .iter()
                .chain(&self.lactation)
                .chain(&self.weaning)
                .cloned()
                .collect(),
        };
        rows.sort_by(|a, b| {
            a.label
                .cmp(&b.label)
                .then_with(|| b.record.days_in_process.cmp(&a.record.days_in_process))
        });
        rows
    }
}
