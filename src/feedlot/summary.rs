//! Feedlot KPIs and the per-category live-weight breakdown.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::breeding::summary::round1;
use crate::models::WeighingRecord;

/// Headline figures over the filtered lines. Averages are `None` for an
/// empty set, `kgPerTrip` when no trips were recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedlotKpis {
    pub line_count: usize,
    pub total_kg: f64,
    /// Sum of recorded trips; lines without a trip count add nothing.
    pub trips: f64,
    pub kg_per_trip: Option<f64>,
    pub avg_weight_kg: Option<f64>,
    /// Missing ages count as 0.
    pub avg_age_days: Option<f64>,
    /// Missing gains count as 0.
    pub avg_gain: Option<f64>,
    /// Mean of `gain / age` over the lines where both are known.
    pub avg_daily_gain: Option<f64>,
}

/// Live weight shipped under one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub kg: f64,
    /// Share of the total live weight, one decimal; 0 when the total is 0.
    pub percent: f64,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

pub fn kpis(records: &[&WeighingRecord]) -> FeedlotKpis {
    let total_kg: f64 = records.iter().map(|r| r.live_weight_kg).sum();
    let trips: f64 = records.iter().filter_map(|r| r.trips).sum();

    FeedlotKpis {
        line_count: records.len(),
        total_kg,
        trips,
        kg_per_trip: (trips > 0.0).then(|| total_kg / trips),
        avg_weight_kg: mean(records.iter().map(|r| r.live_weight_kg)),
        avg_age_days: mean(records.iter().map(|r| r.age_days.unwrap_or(0.0))),
        avg_gain: mean(records.iter().map(|r| r.gain.unwrap_or(0.0))),
        avg_daily_gain: mean(records.iter().filter_map(|r| r.daily_gain())),
    }
}

/// Live weight per category, sorted by category name.
pub fn categories(records: &[&WeighingRecord]) -> Vec<CategoryShare> {
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
    for r in records {
        *by_category.entry(r.category.as_str()).or_default() += r.live_weight_kg;
    }
    let total: f64 = by_category.values().sum();

    by_category
        .into_iter()
        .map(|(category, kg)| CategoryShare {
            category: category.to_string(),
            kg,
            percent: if total > 0.0 {
                round1(kg * 100.0 / total)
            } else {
                0.0
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(
        kg: f64,
        age_days: Option<f64>,
        gain: Option<f64>,
        trips: Option<f64>,
        category: &str,
    ) -> WeighingRecord {
        WeighingRecord {
            year: "2024".to_string(),
            month: "1".to_string(),
            week: "1".to_string(),
            lot_day: "lot-1".to_string(),
            sector: "North".to_string(),
            shed: "P1".to_string(),
            live_weight_kg: kg,
            age_days,
            gain,
            trips,
            category: category.to_string(),
        }
    }

    #[test]
    fn kpis_over_mixed_lines() {
        let records = vec![
            line(3000.0, Some(150.0), Some(90.0), Some(2.0), "Finisher"),
            line(1000.0, None, Some(30.0), None, "Sow"),
            line(2000.0, Some(100.0), None, Some(1.0), "Finisher"),
        ];
        let refs: Vec<&WeighingRecord> = records.iter().collect();
        let k = kpis(&refs);

        assert_eq!(k.line_count, 3);
        assert_eq!(k.total_kg, 6000.0);
        assert_eq!(k.trips, 3.0);
        assert_eq!(k.kg_per_trip, Some(2000.0));
        assert_eq!(k.avg_weight_kg, Some(2000.0));
        // (150 + 0 + 100) / 3
        assert!((k.avg_age_days.expect("age") - 250.0 / 3.0).abs() < 1e-9);
        // (90 + 30 + 0) / 3
        assert_eq!(k.avg_gain, Some(40.0));
        // only the first line has both gain and age: 90 / 150
        assert_eq!(k.avg_daily_gain, Some(0.6));
    }

    #[test]
    fn kpis_of_empty_set_are_unavailable() {
        let k = kpis(&[]);
        assert_eq!(k.line_count, 0);
        assert_eq!(k.total_kg, 0.0);
        assert_eq!(k.trips, 0.0);
        assert_eq!(k.kg_per_trip, None);
        assert_eq!(k.avg_weight_kg, None);
        assert_eq!(k.avg_age_days, None);
        assert_eq!(k.avg_gain, None);
        assert_eq!(k.avg_daily_gain, None);
    }

    #[test]
    fn no_trips_means_no_kg_per_trip() {
        let records = vec![line(500.0, None, None, Some(0.0), "Finisher")];
        let refs: Vec<&WeighingRecord> = records.iter().collect();
        assert_eq!(kpis(&refs).kg_per_trip, None);
    }

    #[test]
    fn categories_are_sorted_with_shares() {
        let records = vec![
            line(1000.0, None, None, None, "Sow"),
            line(1500.0, None, None, None, "Finisher"),
            line(500.0, None, None, None, "Finisher"),
        ];
        let refs: Vec<&WeighingRecord> = records.iter().collect();
        let shares = categories(&refs);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category, "Finisher");
        assert_eq!(shares[0].kg, 2000.0);
        assert_eq!(shares[0].percent, 66.7);
        assert_eq!(shares[1].category, "Sow");
        assert_eq!(shares[1].percent, 33.3);
    }

    #[test]
    fn zero_total_gives_zero_percent() {
        let records = vec![line(0.0, None, None, None, "Sow")];
        let refs: Vec<&WeighingRecord> = records.iter().collect();
        let shares = categories(&refs);
        assert_eq!(shares[0].percent, 0.0);
        assert!(categories(&[]).is_empty());
    }
}
