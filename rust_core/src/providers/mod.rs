//! Historical data provider abstractions.
//!
//! The aggregators only see these two traits. Every failure, whatever its
//! cause, reaches them as [`DataUnavailable`](crate::error::DataUnavailable).

use crate::error::ProviderResult;
use crate::models::{Event, RoundNumber, Season, SessionKind, SessionResult};
use async_trait::async_trait;

pub mod jolpica;
pub mod memory;

pub use jolpica::JolpicaProvider;
pub use memory::{InMemoryProvider, ProviderQuery};

/// Per-round session classifications.
#[async_trait]
pub trait ResultsProvider: Send + Sync {
    async fn get_session_result(
        &self,
        season: Season,
        round: RoundNumber,
        kind: SessionKind,
    ) -> ProviderResult<SessionResult>;

    /// Provider name for logging and debugging
    fn provider_name(&self) -> &str;
}

/// Season event calendars.
#[async_trait]
pub trait ScheduleProvider: Send + Sync {
    /// Events of `season`, ordered by round number
    async fn get_event_schedule(&self, season: Season) -> ProviderResult<Vec<Event>>;
}
