//! Per-driver aggregates folded over completed rounds.
//!
//! Each aggregator scans its rounds one at a time and treats an unavailable
//! session as contributing nothing. Absence of a driver from an aggregate is
//! kept distinct from a zero value; defaults are applied by the scorer.

pub mod finish;
pub mod points;
pub mod track;

pub use finish::average_finish_positions;
pub use points::{accumulate_points, PointsTable, RACE_POINTS, SPRINT_POINTS};
pub use track::track_history;

use std::collections::BTreeMap;

/// Running sum/count of finishing positions per key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeanPositions<K: Ord> {
    tallies: BTreeMap<K, (u64, u32)>,
}

impl<K: Ord> Default for MeanPositions<K> {
    fn default() -> Self {
        Self {
            tallies: BTreeMap::new(),
        }
    }
}

impl<K: Ord> MeanPositions<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: K, position: u32) {
        let tally = self.tallies.entry(key).or_insert((0, 0));
        tally.0 += u64::from(position);
        tally.1 += 1;
    }

    /// Mean position, or `None` if the key never finished.
    pub fn mean<Q>(&self, key: &Q) -> Option<f64>
    where
        K: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tallies
            .get(key)
            .map(|(sum, count)| *sum as f64 / f64::from(*count))
    }

    /// Number of recorded finishes for a key.
    pub fn samples<Q>(&self, key: &Q) -> u32
    where
        K: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tallies.get(key).map(|(_, count)| *count).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }
}
