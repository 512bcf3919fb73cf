//! Shared data model for race prediction.
//!
//! This module provides:
//! - Season/round identifiers and session kinds
//! - Event schedule entries
//! - Per-session classified results
//! - Aggregated driver statistics and prediction output rows

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Competition year (e.g. 2023).
pub type Season = i32;

/// Round number within a season, starting at 1.
pub type RoundNumber = u32;

/// First season with retrievable historical data.
pub const EARLIEST_DATA_SEASON: Season = 2018;

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque driver identifier, stable across rounds within a season.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(String);

impl DriverId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DriverId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Competitive format within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Race,
    Sprint,
}

impl SessionKind {
    /// Short lowercase slug, used for cache file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Race => "race",
            SessionKind::Sprint => "sprint",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Schedule
// ============================================================================

/// A scheduled event (one round) of a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event name as published, e.g. "Italian Grand Prix"
    pub name: String,
    /// Round number within the season
    pub round: RoundNumber,
    /// Calendar date of the event
    pub date: NaiveDate,
}

impl Event {
    pub fn new(name: impl Into<String>, round: RoundNumber, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            round,
            date,
        }
    }

    /// Start of the event day in UTC.
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.date.and_time(NaiveTime::MIN).and_utc()
    }

    /// True when the event day began strictly before `now`.
    pub fn has_occurred(&self, now: DateTime<Utc>) -> bool {
        self.starts_at() < now
    }

    /// Case-insensitive substring match of `query` against the event name.
    pub fn matches_circuit(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

// ============================================================================
// Results
// ============================================================================

/// One classified driver in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub driver_id: DriverId,
    pub full_name: String,
    /// Finishing position, 1 = winner
    pub position: u32,
}

impl ResultEntry {
    pub fn new(driver_id: impl Into<String>, full_name: impl Into<String>, position: u32) -> Self {
        Self {
            driver_id: DriverId::new(driver_id),
            full_name: full_name.into(),
            position,
        }
    }
}

/// Ordered results of a single session (race or sprint) of a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub season: Season,
    pub round: RoundNumber,
    pub kind: SessionKind,
    /// Entries in classification order
    pub entries: Vec<ResultEntry>,
}

impl SessionResult {
    pub fn new(
        season: Season,
        round: RoundNumber,
        kind: SessionKind,
        entries: Vec<ResultEntry>,
    ) -> Self {
        Self {
            season,
            round,
            kind,
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Derived output
// ============================================================================

/// Joined per-driver statistics for one season, defaults already applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverSeasonStats {
    pub driver_id: DriverId,
    pub full_name: String,
    pub cumulative_points: f64,
    pub mean_finish_position: f64,
    pub track_mean_finish_position: f64,
}

/// A single ranked line of a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRow {
    pub predicted_rank: usize,
    pub driver_id: DriverId,
    pub driver_full_name: String,
    pub cumulative_points: f64,
    pub mean_finish_position: f64,
    pub track_mean_finish_position: f64,
    /// Unrounded composite score used for ranking
    pub composite_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn monza() -> Event {
        Event::new(
            "Italian Grand Prix",
            16,
            NaiveDate::from_ymd_opt(2023, 9, 3).unwrap(),
        )
    }

    #[test]
    fn test_event_has_occurred_is_strict() {
        let event = monza();
        let day_start = Utc.with_ymd_and_hms(2023, 9, 3, 0, 0, 0).unwrap();

        assert!(!event.has_occurred(day_start));
        assert!(event.has_occurred(day_start + chrono::Duration::seconds(1)));
        assert!(!event.has_occurred(Utc.with_ymd_and_hms(2023, 9, 2, 23, 59, 59).unwrap()));
    }

    #[test]
    fn test_matches_circuit_case_insensitive() {
        let event = monza();
        assert!(event.matches_circuit("italian"));
        assert!(event.matches_circuit("ITALIAN GRAND"));
        assert!(!event.matches_circuit("Monaco"));
    }

    #[test]
    fn test_session_kind_serialization() {
        let json = serde_json::to_string(&SessionKind::Sprint).unwrap();
        assert_eq!(json, "\"sprint\"");
        assert_eq!(SessionKind::Race.as_str(), "race");
    }

    #[test]
    fn test_driver_id_is_transparent_in_json() {
        let entry = ResultEntry::new("max_verstappen", "Max Verstappen", 1);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["driver_id"], "max_verstappen");
    }
}
