//! Deterministic 2023-style season fixtures.

use chrono::{Duration, NaiveDate};
use gridcast_rust_core::models::{Event, ResultEntry, RoundNumber, Season, SessionKind, SessionResult};
use gridcast_rust_core::providers::InMemoryProvider;

pub const GRID: [(&str, &str); 6] = [
    ("max_verstappen", "Max Verstappen"),
    ("perez", "Sergio Pérez"),
    ("alonso", "Fernando Alonso"),
    ("hamilton", "Lewis Hamilton"),
    ("sainz", "Carlos Sainz"),
    ("leclerc", "Charles Leclerc"),
];

pub const MONZA_ROUND: RoundNumber = 16;

/// 22 weekly events from 2023-05-21; round 16 (Monza) lands on 2023-09-03.
pub fn schedule(season: Season) -> Vec<Event> {
    let monza = NaiveDate::from_ymd_opt(season, 9, 3).unwrap();
    (1..=22)
        .map(|round: RoundNumber| {
            let date = monza + Duration::weeks(i64::from(round) - i64::from(MONZA_ROUND));
            let name = if round == MONZA_ROUND {
                "Italian Grand Prix at Monza".to_string()
            } else {
                format!("Round {} Grand Prix", round)
            };
            Event::new(name, round, date)
        })
        .collect()
}

/// Grid rotated by `shift`, classified in that order.
pub fn rotated(season: Season, round: RoundNumber, kind: SessionKind, shift: usize) -> SessionResult {
    let entries = (0..GRID.len())
        .map(|i| {
            let (id, name) = GRID[(i + shift) % GRID.len()];
            ResultEntry::new(id, name, i as u32 + 1)
        })
        .collect();
    SessionResult::new(season, round, kind, entries)
}

/// A season with a race every round and sprints on rounds divisible by 4.
pub fn season_provider(season: Season) -> InMemoryProvider {
    let mut provider = InMemoryProvider::new().with_schedule(season, schedule(season));
    for round in 1..=22 {
        provider.insert_session(rotated(season, round, SessionKind::Race, (round as usize) % 3));
        if round % 4 == 0 {
            provider.insert_session(rotated(season, round, SessionKind::Sprint, 1));
        }
    }
    provider
}

/// Adds past Monza races for track history.
pub fn with_history(mut provider: InMemoryProvider, seasons: &[Season]) -> InMemoryProvider {
    for &season in seasons {
        provider = provider.with_schedule(season, schedule(season));
        provider.insert_session(rotated(season, MONZA_ROUND, SessionKind::Race, 3));
    }
    provider
}
