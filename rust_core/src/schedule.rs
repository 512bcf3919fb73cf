//! Round selection over a season's event schedule.

use crate::models::{Event, RoundNumber, Season, EARLIEST_DATA_SEASON};
use chrono::{DateTime, Utc};

/// Number of prior seasons consulted for circuit history.
pub const LOOKBACK_SEASONS: i32 = 3;

/// Minimum similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.6;

/// First event whose name contains `query`, ignoring case.
pub fn resolve_event<'a>(events: &'a [Event], query: &str) -> Option<&'a Event> {
    events.iter().find(|e| e.matches_circuit(query))
}

/// Rounds whose event date lies strictly before `now`, in schedule order.
pub fn completed_rounds(events: &[Event], now: DateTime<Utc>) -> Vec<RoundNumber> {
    events
        .iter()
        .filter(|e| e.has_occurred(now))
        .map(|e| e.round)
        .collect()
}

/// Closest event name to a query that matched nothing.
///
/// Scores the whole name and each of its words with normalized Levenshtein
/// similarity and keeps the best event above the threshold.
pub fn suggest_event<'a>(events: &'a [Event], query: &str) -> Option<&'a Event> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    events
        .iter()
        .map(|event| {
            let name = event.name.to_lowercase();
            let best_word = name
                .split_whitespace()
                .map(|word| strsim::normalized_levenshtein(&query, word))
                .fold(0.0_f64, f64::max);
            let score = strsim::normalized_levenshtein(&query, &name).max(best_word);
            (event, score)
        })
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.round.cmp(&a.0.round)))
        .map(|(event, _)| event)
}

/// Prior seasons `[target-3, target-1]` with retrievable data, oldest first.
pub fn lookback_seasons(target: Season) -> Vec<Season> {
    ((target - LOOKBACK_SEASONS)..target)
        .filter(|season| *season >= EARLIEST_DATA_SEASON)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn calendar() -> Vec<Event> {
        vec![
            Event::new("Bahrain Grand Prix", 1, NaiveDate::from_ymd_opt(2023, 3, 5).unwrap()),
            Event::new("Emilia Romagna Grand Prix", 2, NaiveDate::from_ymd_opt(2023, 5, 21).unwrap()),
            Event::new("Italian Grand Prix", 3, NaiveDate::from_ymd_opt(2023, 9, 3).unwrap()),
            Event::new("Abu Dhabi Grand Prix", 4, NaiveDate::from_ymd_opt(2023, 11, 26).unwrap()),
        ]
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let events = calendar();
        assert_eq!(resolve_event(&events, "grand prix").unwrap().round, 1);
        assert_eq!(resolve_event(&events, "ITALIAN").unwrap().round, 3);
        assert!(resolve_event(&events, "Monaco").is_none());
    }

    #[test]
    fn test_completed_rounds_excludes_today_and_future() {
        let events = calendar();
        let now = Utc.with_ymd_and_hms(2023, 9, 3, 0, 0, 0).unwrap();
        assert_eq!(completed_rounds(&events, now), vec![1, 2]);

        let later = Utc.with_ymd_and_hms(2023, 9, 3, 15, 0, 0).unwrap();
        assert_eq!(completed_rounds(&events, later), vec![1, 2, 3]);
    }

    #[test]
    fn test_suggestion_for_typo() {
        let events = calendar();
        assert_eq!(suggest_event(&events, "Itallian").unwrap().round, 3);
        assert_eq!(suggest_event(&events, "baharin").unwrap().round, 1);
        assert!(suggest_event(&events, "zzzz").is_none());
        assert!(suggest_event(&events, "  ").is_none());
    }

    #[test]
    fn test_lookback_window() {
        assert_eq!(lookback_seasons(2023), vec![2020, 2021, 2022]);
        assert_eq!(lookback_seasons(2020), vec![2018, 2019]);
        assert_eq!(lookback_seasons(2018), Vec::<Season>::new());
        assert_eq!(lookback_seasons(2010), Vec::<Season>::new());
    }
}
