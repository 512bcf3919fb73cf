//! Composite score and ranking.
//!
//! `score = points * W_POINTS - avg_finish * W_AVG_FINISH - track_avg * W_TRACK_AVG`
//!
//! A fixed linear formula: lower finishing positions raise the score.

use crate::aggregation::{MeanPositions, PointsTable};
use crate::models::{DriverId, DriverSeasonStats, PredictionRow};
use std::collections::BTreeMap;

/// Fallback for position-like metrics with no measured value.
pub const DEFAULT_POSITION: f64 = 20.0;

/// Fallback for drivers that never scored.
pub const DEFAULT_POINTS: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub points: f64,
    pub avg_finish: f64,
    pub track_avg: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            points: 20.0,
            avg_finish: 25.0,
            track_avg: 25.0,
        }
    }
}

impl Weights {
    pub fn score(&self, stats: &DriverSeasonStats) -> f64 {
        stats.cumulative_points * self.points
            + (-stats.mean_finish_position) * self.avg_finish
            + (-stats.track_mean_finish_position) * self.track_avg
    }
}

/// Drivers of the target season: id -> full name.
pub type Roster = BTreeMap<DriverId, String>;

/// The three aggregates a ranking is built from.
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    pub points: PointsTable,
    pub avg_finish: MeanPositions<DriverId>,
    /// Keyed by driver full name
    pub track_avg: MeanPositions<String>,
}

/// Join aggregates onto the roster, applying defaults for missing values.
pub fn join(roster: &Roster, aggregates: &Aggregates) -> Vec<DriverSeasonStats> {
    roster
        .iter()
        .map(|(driver_id, full_name)| DriverSeasonStats {
            driver_id: driver_id.clone(),
            full_name: full_name.clone(),
            cumulative_points: aggregates.points.get(driver_id).unwrap_or(DEFAULT_POINTS),
            mean_finish_position: aggregates
                .avg_finish
                .mean(driver_id)
                .unwrap_or(DEFAULT_POSITION),
            track_mean_finish_position: aggregates
                .track_avg
                .mean(full_name.as_str())
                .unwrap_or(DEFAULT_POSITION),
        })
        .collect()
}

/// Rank the roster by composite score, highest first.
///
/// Ranks are dense 1..=N. Equal scores are ordered by driver id so the
/// output does not depend on iteration order.
pub fn rank(roster: &Roster, aggregates: &Aggregates, weights: &Weights) -> Vec<PredictionRow> {
    let mut scored: Vec<(DriverSeasonStats, f64)> = join(roster, aggregates)
        .into_iter()
        .map(|stats| {
            let score = weights.score(&stats);
            (stats, score)
        })
        .collect();

    scored.sort_by(|(a, score_a), (b, score_b)| {
        score_b
            .total_cmp(score_a)
            .then_with(|| a.driver_id.cmp(&b.driver_id))
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (stats, score))| PredictionRow {
            predicted_rank: i + 1,
            driver_id: stats.driver_id,
            driver_full_name: stats.full_name,
            cumulative_points: stats.cumulative_points,
            mean_finish_position: stats.mean_finish_position,
            track_mean_finish_position: stats.track_mean_finish_position,
            composite_score: score,
        })
        .collect()
}

/// Round to 2 decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{race, sprint, ALO, HAM, PER, VER};

    fn roster(drivers: &[(&str, &str)]) -> Roster {
        drivers
            .iter()
            .map(|(id, name)| (DriverId::from(*id), name.to_string()))
            .collect()
    }

    #[test]
    fn test_score_formula() {
        let stats = DriverSeasonStats {
            driver_id: DriverId::from("x"),
            full_name: "X".to_string(),
            cumulative_points: 10.0,
            mean_finish_position: 4.0,
            track_mean_finish_position: 2.0,
        };
        assert_eq!(Weights::default().score(&stats), 200.0 - 100.0 - 50.0);
    }

    #[test]
    fn test_defaults_for_missing_aggregates() {
        let stats = join(&roster(&[ALO]), &Aggregates::default());
        assert_eq!(stats[0].cumulative_points, DEFAULT_POINTS);
        assert_eq!(stats[0].mean_finish_position, DEFAULT_POSITION);
        assert_eq!(stats[0].track_mean_finish_position, DEFAULT_POSITION);
        assert_eq!(Weights::default().score(&stats[0]), -1000.0);
    }

    #[test]
    fn test_track_history_joins_on_full_name() {
        let mut aggregates = Aggregates::default();
        aggregates.track_avg.record(HAM.1.to_string(), 3);
        // Same person under a differently formatted name gets no history
        aggregates.track_avg.record("HAMILTON Lewis".to_string(), 1);

        let stats = join(&roster(&[HAM]), &aggregates);
        assert_eq!(stats[0].track_mean_finish_position, 3.0);
    }

    #[test]
    fn test_rank_is_dense_and_descending() {
        let mut aggregates = Aggregates::default();
        aggregates.points.fold_session(&race(2023, 1, &[VER, PER, HAM, ALO]));
        aggregates.points.fold_session(&sprint(2023, 1, &[PER, VER]));
        for (i, d) in [VER, PER, HAM, ALO].iter().enumerate() {
            aggregates.avg_finish.record(DriverId::from(d.0), i as u32 + 1);
        }

        let rows = rank(&roster(&[ALO, HAM, PER, VER]), &aggregates, &Weights::default());
        let ranks: Vec<usize> = rows.iter().map(|r| r.predicted_rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert_eq!(rows[0].driver_id.as_str(), VER.0);
        assert!(rows.windows(2).all(|w| w[0].composite_score >= w[1].composite_score));
    }

    #[test]
    fn test_ties_break_by_driver_id() {
        let rows = rank(&roster(&[VER, ALO, HAM]), &Aggregates::default(), &Weights::default());
        let ids: Vec<&str> = rows.iter().map(|r| r.driver_id.as_str()).collect();
        assert_eq!(ids, vec!["alonso", "hamilton", "max_verstappen"]);
    }

    #[test]
    fn test_empty_roster_ranks_nothing() {
        let rows = rank(&Roster::new(), &Aggregates::default(), &Weights::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(-462.499), -462.5);
        assert_eq!(round2(2.0), 2.0);
    }
}
