//! Red list: animals in a problem state, with a recommended action each.

use serde::Serialize;

use crate::models::{AnimalRecord, StatusCode};

/// Recommended action for a red-list animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    CullAbortionHighParity,
    EvaluateCauseAndReservice,
    CullLongServiceFailure,
    UltrasoundDecideReservice,
    ObserveScheduleUltrasound,
    ServeThisWeek,
    ReviewHeatDetection,
    /// Status outside the red list; should not reach the advisor.
    NoAction,
}

impl RecommendedAction {
    pub fn text(self) -> &'static str {
        match self {
            Self::CullAbortionHighParity => "cull recommended (abortion, high parity)",
            Self::EvaluateCauseAndReservice => "evaluate cause + re-service",
            Self::CullLongServiceFailure => "cull recommended (failure >25 days)",
            Self::UltrasoundDecideReservice => "ultrasound / decide re-service",
            Self::ObserveScheduleUltrasound => "observe, schedule ultrasound",
            Self::ServeThisWeek => "serve this week",
            Self::ReviewHeatDetection => "review heat detection / body condition",
            Self::NoAction => "-",
        }
    }
}

/// Parities at or above which an aborted female is culled.
const CULL_ABORTION_PARITY: u32 = 7;
/// Days after which a service failure is culled.
const CULL_FAILURE_DAYS: u32 = 25;
/// Days from which a service failure needs an ultrasound decision.
const ULTRASOUND_FAILURE_DAYS: u32 = 10;
/// Heat detected within this many days is still served this week.
const SERVE_HEAT_DAYS: u32 = 7;

/// Business rule behind each red-list recommendation.
pub fn advise(status: StatusCode, days_in_process: u32, parities: u32) -> RecommendedAction {
    match status {
        StatusCode::Aborted if parities >= CULL_ABORTION_PARITY => {
            RecommendedAction::CullAbortionHighParity
        }
        StatusCode::Aborted => RecommendedAction::EvaluateCauseAndReservice,
        StatusCode::NotPregnant if days_in_process > CULL_FAILURE_DAYS => {
            RecommendedAction::CullLongServiceFailure
        }
        StatusCode::NotPregnant if days_in_process >= ULTRASOUND_FAILURE_DAYS => {
            RecommendedAction::UltrasoundDecideReservice
        }
        StatusCode::NotPregnant => RecommendedAction::ObserveScheduleUltrasound,
        StatusCode::HeatNotServed if days_in_process <= SERVE_HEAT_DAYS => {
            RecommendedAction::ServeThisWeek
        }
        StatusCode::HeatNotServed => RecommendedAction::ReviewHeatDetection,
        _ => RecommendedAction::NoAction,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedListEntry {
    pub record: AnimalRecord,
    pub status_description: &'static str,
    pub action: RecommendedAction,
    pub action_text: &'static str,
}

/// Select the problem animals, sorted by status code ascending and then by
/// days in process descending. Remaining ties keep input order.
pub fn extract(records: &[&AnimalRecord]) -> Vec<RedListEntry> {
    let mut problems: Vec<&AnimalRecord> = records
        .iter()
        .copied()
        .filter(|r| r.status.is_problem())
        .collect();

    problems.sort_by(|a, b| {
        a.status
            .as_str()
            .cmp(b.status.as_str())
            .then_with(|| b.days_in_process.cmp(&a.days_in_process))
    });

    problems
        .into_iter()
        .map(|r| {
            let action = advise(r.status, r.days_in_process, r.parities);
            RedListEntry {
                record: r.clone(),
                status_description: r.status.description(),
                action,
                action_text: action.text(),
            }
        })
        .collect()
}
