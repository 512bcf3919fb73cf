//! Circuit-specific finishing history from prior seasons.

use super::MeanPositions;
use crate::models::{Season, SessionKind};
use crate::providers::{ResultsProvider, ScheduleProvider};
use crate::schedule::{lookback_seasons, resolve_event};
use tracing::debug;

/// Mean race finishing position per driver full name at the circuit matching
/// `query`, over the lookback window before `target_season`.
///
/// Keyed by full name: driver identifiers are not assumed stable across
/// seasons. A season contributes nothing if its schedule is unavailable, no
/// event matches, or the race result is unavailable.
pub async fn track_history<P>(provider: &P, query: &str, target_season: Season) -> MeanPositions<String>
where
    P: ResultsProvider + ScheduleProvider + ?Sized,
{
    let mut history = MeanPositions::new();

    for season in lookback_seasons(target_season) {
        let events = match provider.get_event_schedule(season).await {
            Ok(events) => events,
            Err(e) => {
                debug!("Skipping {} track history: {}", season, e);
                continue;
            }
        };

        let Some(event) = resolve_event(&events, query) else {
            debug!("No event matching '{}' in {}", query, season);
            continue;
        };

        match provider
            .get_session_result(season, event.round, SessionKind::Race)
            .await
        {
            Ok(result) => {
                for entry in &result.entries {
                    history.record(entry.full_name.clone(), entry.position);
                }
            }
            Err(e) => debug!(
                "Skipping {} {} (round {}): {}",
                season, event.name, event.round, e
            ),
        }
    }

    history
}
