//! In-memory provider serving fixed schedules and results.
//!
//! Anything not registered is reported unavailable, like a missing session
//! upstream. Every query is recorded so callers can assert which seasons and
//! rounds were touched.

use super::{ResultsProvider, ScheduleProvider};
use crate::error::{DataUnavailable, ProviderResult};
use crate::models::{Event, RoundNumber, Season, SessionKind, SessionResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderQuery {
    Schedule(Season),
    Session(Season, RoundNumber, SessionKind),
}

impl ProviderQuery {
    pub fn season(&self) -> Season {
        match self {
            ProviderQuery::Schedule(season) | ProviderQuery::Session(season, _, _) => *season,
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProvider {
    schedules: HashMap<Season, Vec<Event>>,
    sessions: HashMap<(Season, RoundNumber, SessionKind), SessionResult>,
    failing: HashSet<ProviderQuery>,
    queries: Mutex<Vec<ProviderQuery>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedule(mut self, season: Season, events: Vec<Event>) -> Self {
        self.schedules.insert(season, events);
        self
    }

    pub fn with_session(mut self, result: SessionResult) -> Self {
        self.insert_session(result);
        self
    }

    /// Make a registered (or unregistered) query fail.
    pub fn failing(mut self, query: ProviderQuery) -> Self {
        self.failing.insert(query);
        self
    }

    pub fn insert_session(&mut self, result: SessionResult) {
        self.sessions
            .insert((result.season, result.round, result.kind), result);
    }

    /// All queries received so far, in order.
    pub fn queries(&self) -> Vec<ProviderQuery> {
        self.queries.lock().clone()
    }

    pub fn queried_seasons(&self) -> Vec<Season> {
        let mut seasons: Vec<Season> = self.queries.lock().iter().map(|q| q.season()).collect();
        seasons.sort_unstable();
        seasons.dedup();
        seasons
    }

    pub fn clear_queries(&self) {
        self.queries.lock().clear();
    }

    fn record(&self, query: ProviderQuery) -> ProviderResult<()> {
        self.queries.lock().push(query);
        if self.failing.contains(&query) {
            return Err(DataUnavailable::new(format!("{:?} forced to fail", query)));
        }
        Ok(())
    }
}

#[async_trait]
impl ResultsProvider for InMemoryProvider {
    async fn get_session_result(
        &self,
        season: Season,
        round: RoundNumber,
        kind: SessionKind,
    ) -> ProviderResult<SessionResult> {
        self.record(ProviderQuery::Session(season, round, kind))?;
        self.sessions
            .get(&(season, round, kind))
            .cloned()
            .ok_or_else(|| {
                DataUnavailable::new(format!("no {} for {} round {}", kind, season, round))
            })
    }

    fn provider_name(&self) -> &str {
        "in-memory"
    }
}

#[async_trait]
impl ScheduleProvider for InMemoryProvider {
    async fn get_event_schedule(&self, season: Season) -> ProviderResult<Vec<Event>> {
        self.record(ProviderQuery::Schedule(season))?;
        self.schedules
            .get(&season)
            .cloned()
            .ok_or_else(|| DataUnavailable::new(format!("no schedule for {}", season)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResultEntry;

    #[tokio::test]
    async fn test_unregistered_session_is_unavailable() {
        let provider = InMemoryProvider::new();
        let result = provider.get_session_result(2023, 1, SessionKind::Race).await;
        assert!(result.is_err());
        assert_eq!(
            provider.queries(),
            vec![ProviderQuery::Session(2023, 1, SessionKind::Race)]
        );
    }

    #[tokio::test]
    async fn test_forced_failure_overrides_registered_data() {
        let provider = InMemoryProvider::new()
            .with_session(SessionResult::new(
                2023,
                1,
                SessionKind::Race,
                vec![ResultEntry::new("alonso", "Fernando Alonso", 3)],
            ))
            .failing(ProviderQuery::Session(2023, 1, SessionKind::Race));

        assert!(provider
            .get_session_result(2023, 1, SessionKind::Race)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_queried_seasons_are_deduplicated() {
        let provider = InMemoryProvider::new();
        let _ = provider.get_event_schedule(2021).await;
        let _ = provider.get_event_schedule(2020).await;
        let _ = provider.get_session_result(2021, 4, SessionKind::Race).await;
        assert_eq!(provider.queried_seasons(), vec![2020, 2021]);

        provider.clear_queries();
        assert!(provider.queries().is_empty());
    }
}
