//! Championship points from race and sprint classifications.

use crate::models::{DriverId, RoundNumber, Season, SessionKind, SessionResult};
use crate::providers::ResultsProvider;
use std::collections::BTreeMap;
use tracing::debug;

/// Points for race ranks 1..=10
pub const RACE_POINTS: [f64; 10] = [25.0, 18.0, 15.0, 12.0, 10.0, 8.0, 6.0, 4.0, 2.0, 1.0];

/// Points for sprint ranks 1..=8
pub const SPRINT_POINTS: [f64; 8] = [8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];

/// Points awarded for a 1-based rank in a session of `kind`.
pub fn points_for_rank(kind: SessionKind, rank: usize) -> f64 {
    let table: &[f64] = match kind {
        SessionKind::Race => &RACE_POINTS,
        SessionKind::Sprint => &SPRINT_POINTS,
    };
    rank.checked_sub(1)
        .and_then(|i| table.get(i))
        .copied()
        .unwrap_or(0.0)
}

/// Cumulative points per driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointsTable {
    totals: BTreeMap<DriverId, f64>,
}

impl PointsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one session's points. Rank is the entry's place in the
    /// classification order; drivers outside the scoring places get nothing.
    pub fn fold_session(&mut self, result: &SessionResult) {
        for (i, entry) in result.entries.iter().enumerate() {
            let points = points_for_rank(result.kind, i + 1);
            if points > 0.0 {
                *self.totals.entry(entry.driver_id.clone()).or_insert(0.0) += points;
            }
        }
    }

    /// Fetch and fold both sessions of a round. Either session may be missing.
    pub async fn fold_round<P>(&mut self, provider: &P, season: Season, round: RoundNumber)
    where
        P: ResultsProvider + ?Sized,
    {
        for kind in [SessionKind::Race, SessionKind::Sprint] {
            match provider.get_session_result(season, round, kind).await {
                Ok(result) => self.fold_session(&result),
                Err(e) => debug!("No {} points for {} round {}: {}", kind, season, round, e),
            }
        }
    }

    pub fn get(&self, driver: &DriverId) -> Option<f64> {
        self.totals.get(driver).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DriverId, f64)> {
        self.totals.iter().map(|(id, pts)| (id, *pts))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Cumulative points over `rounds` of `season`, fetched one round at a time.
pub async fn accumulate_points<P>(provider: &P, season: Season, rounds: &[RoundNumber]) -> PointsTable
where
    P: ResultsProvider + ?Sized,
{
    let mut table = PointsTable::new();
    for &round in rounds {
        table.fold_round(provider, season, round).await;
    }
    debug!(
        "Accumulated points for {} drivers over {} rounds of {}",
        table.len(),
        rounds.len(),
        season
    );
    table
}
