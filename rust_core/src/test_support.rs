//! Fixture builders shared by unit tests.

use crate::models::{Event, ResultEntry, RoundNumber, Season, SessionKind, SessionResult};
use chrono::NaiveDate;

/// Session classified in the given order, positions 1..=n.
pub fn session(
    season: Season,
    round: RoundNumber,
    kind: SessionKind,
    drivers: &[(&str, &str)],
) -> SessionResult {
    let entries = drivers
        .iter()
        .enumerate()
        .map(|(i, (id, name))| ResultEntry::new(*id, *name, i as u32 + 1))
        .collect();
    SessionResult::new(season, round, kind, entries)
}

pub fn race(season: Season, round: RoundNumber, drivers: &[(&str, &str)]) -> SessionResult {
    session(season, round, SessionKind::Race, drivers)
}

pub fn sprint(season: Season, round: RoundNumber, drivers: &[(&str, &str)]) -> SessionResult {
    session(season, round, SessionKind::Sprint, drivers)
}

pub fn event(name: &str, round: RoundNumber, y: i32, m: u32, d: u32) -> Event {
    Event::new(name, round, NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

pub const VER: (&str, &str) = ("max_verstappen", "Max Verstappen");
pub const PER: (&str, &str) = ("perez", "Sergio Pérez");
pub const HAM: (&str, &str) = ("hamilton", "Lewis Hamilton");
pub const ALO: (&str, &str) = ("alonso", "Fernando Alonso");
