use serde::{Deserialize, Serialize};

/// One feedlot dispatch line: animals of one category shipped from a shed,
/// with the live weight delivered.
///
/// Period and place columns are kept as read (trimmed) and compared exactly.
/// Optional measures are `None` when the cell was empty or unreadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeighingRecord {
    pub year: String,
    pub month: String,
    pub week: String,
    /// Source batch of the line (the lot day).
    pub lot_day: String,
    pub sector: String,
    pub shed: String,
    pub live_weight_kg: f64,
    pub age_days: Option<f64>,
    pub gain: Option<f64>,
    pub trips: Option<f64>,
    pub category: String,
}

impl WeighingRecord {
    /// `gain / age` when both are known and the age is positive.
    pub fn daily_gain(&self) -> Option<f64> {
        match (self.gain, self.age_days) {
            (Some(gain), Some(age)) if age > 0.0 => Some(gain / age),
            _ => None,
        }
    }
}
