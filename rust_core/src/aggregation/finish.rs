//! Season-to-date average finishing position.

use super::MeanPositions;
use crate::models::{DriverId, RoundNumber, Season, SessionKind};
use crate::providers::ResultsProvider;
use tracing::warn;

/// Mean race finishing position per driver over `rounds` of `season`.
///
/// A round whose race result is unavailable is skipped for everyone; drivers
/// with no finishes are absent rather than zero.
pub async fn average_finish_positions<P>(
    provider: &P,
    season: Season,
    rounds: &[RoundNumber],
) -> MeanPositions<DriverId>
where
    P: ResultsProvider + ?Sized,
{
    let mut finishes = MeanPositions::new();
    for &round in rounds {
        match provider
            .get_session_result(season, round, SessionKind::Race)
            .await
        {
            Ok(result) => {
                for entry in &result.entries {
                    finishes.record(entry.driver_id.clone(), entry.position);
                }
            }
            Err(e) => warn!("Couldn't get average from round {} of {}: {}", round, season, e),
        }
    }
    finishes
}
