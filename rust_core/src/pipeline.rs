//! End-to-end race prediction.
//!
//! Resolves the target event, works out which rounds have already happened,
//! runs the three aggregators one after another and ranks the season's
//! drivers. Nothing is carried over between requests.

use crate::aggregation::{accumulate_points, average_finish_positions, track_history};
use crate::clock::Clock;
use crate::error::ForecastError;
use crate::models::{Event, PredictionRow, RoundNumber, Season, SessionKind};
use crate::providers::{ResultsProvider, ScheduleProvider};
use crate::schedule::{completed_rounds, resolve_event, suggest_event};
use crate::scoring::{rank, Aggregates, Roster, Weights};
use serde::Serialize;
use tracing::{debug, info};

/// First world championship season.
pub const FIRST_SEASON: Season = 1950;

#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub season: Season,
    pub query: String,
    /// Event the query resolved to
    pub event: Event,
    /// Rounds whose data fed the aggregates
    pub completed_rounds: Vec<RoundNumber>,
    pub rows: Vec<PredictionRow>,
}

/// Parse a user-entered season year.
pub fn parse_season(input: &str) -> Result<Season, ForecastError> {
    let trimmed = input.trim();
    let season: Season = trimmed
        .parse()
        .map_err(|_| ForecastError::InvalidSeason(format!("'{}' is not a year", trimmed)))?;
    if season < FIRST_SEASON {
        return Err(ForecastError::InvalidSeason(format!(
            "{} is before the first season ({})",
            season, FIRST_SEASON
        )));
    }
    Ok(season)
}

/// Drivers with a race classification in any of `rounds`, with the full name
/// from their latest appearance.
pub async fn season_roster<P>(provider: &P, season: Season, rounds: &[RoundNumber]) -> Roster
where
    P: ResultsProvider + ?Sized,
{
    let mut roster = Roster::new();
    for &round in rounds {
        match provider
            .get_session_result(season, round, SessionKind::Race)
            .await
        {
            Ok(result) => {
                for entry in result.entries {
                    roster.insert(entry.driver_id, entry.full_name);
                }
            }
            Err(e) => debug!("Round {} of {} not in roster: {}", round, season, e),
        }
    }
    roster
}

pub struct RacePredictor<P, C> {
    provider: P,
    clock: C,
    weights: Weights,
}

impl<P, C> RacePredictor<P, C>
where
    P: ResultsProvider + ScheduleProvider,
    C: Clock,
{
    pub fn new(provider: P, clock: C) -> Self {
        Self {
            provider,
            clock,
            weights: Weights::default(),
        }
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Events of `season`, for listing to the user.
    pub async fn list_events(&self, season: Season) -> Result<Vec<Event>, ForecastError> {
        self.provider
            .get_event_schedule(season)
            .await
            .map_err(|source| ForecastError::ScheduleUnavailable { season, source })
    }

    pub async fn predict(&self, season: Season, query: &str) -> Result<Prediction, ForecastError> {
        let events = self.list_events(season).await?;

        let event = match resolve_event(&events, query) {
            Some(event) => event.clone(),
            None => {
                return Err(ForecastError::NoMatch {
                    query: query.to_string(),
                    season,
                    suggestion: suggest_event(&events, query).map(|e| e.name.clone()),
                })
            }
        };

        let now = self.clock.now();
        let rounds = completed_rounds(&events, now);
        info!(
            "Predicting {} ({}, round {}) from {} completed rounds via {}",
            event.name,
            season,
            event.round,
            rounds.len(),
            self.provider.provider_name()
        );

        let aggregates = Aggregates {
            points: accumulate_points(&self.provider, season, &rounds).await,
            avg_finish: average_finish_positions(&self.provider, season, &rounds).await,
            track_avg: track_history(&self.provider, query, season).await,
        };
        let roster = season_roster(&self.provider, season, &rounds).await;

        let rows = rank(&roster, &aggregates, &self.weights);
        if rows.is_empty() {
            return Err(ForecastError::NoDrivers { season });
        }

        Ok(Prediction {
            season,
            query: query.to_string(),
            event,
            completed_rounds: rounds,
            rows,
        })
    }
}
