//! Jolpica Results Provider
//!
//! Implements the provider traits on top of the Jolpica API client, reading
//! through the on-disk response cache.

use super::{ResultsProvider, ScheduleProvider};
use crate::clients::jolpica::{JolpicaClient, JolpicaConfig};
use crate::error::ProviderResult;
use crate::models::{Event, RoundNumber, Season, SessionKind, SessionResult};
use crate::response_cache::{CacheKey, ResponseCache};
use async_trait::async_trait;
use tracing::warn;

pub struct JolpicaProvider {
    client: JolpicaClient,
    cache: ResponseCache,
}

impl JolpicaProvider {
    pub fn new(config: JolpicaConfig, cache: ResponseCache) -> Self {
        Self {
            client: JolpicaClient::with_config(config),
            cache,
        }
    }

    pub fn client(&self) -> &JolpicaClient {
        &self.client
    }

    fn remember<T: serde::Serialize>(&self, key: &CacheKey, value: &T) {
        if let Err(e) = self.cache.store(key, value) {
            warn!("Failed to write cache entry {:?}: {}", key, e);
        }
    }
}

#[async_trait]
impl ResultsProvider for JolpicaProvider {
    async fn get_session_result(
        &self,
        season: Season,
        round: RoundNumber,
        kind: SessionKind,
    ) -> ProviderResult<SessionResult> {
        let key = CacheKey::Session {
            season,
            round,
            kind,
        };
        if let Some(result) = self.cache.load::<SessionResult>(&key) {
            return Ok(result);
        }

        let result = self.client.get_session_result(season, round, kind).await?;
        self.remember(&key, &result);
        Ok(result)
    }

    fn provider_name(&self) -> &str {
        "Jolpica"
    }
}

#[async_trait]
impl ScheduleProvider for JolpicaProvider {
    async fn get_event_schedule(&self, season: Season) -> ProviderResult<Vec<Event>> {
        let key = CacheKey::Schedule { season };
        if let Some(events) = self.cache.load::<Vec<Event>>(&key) {
            return Ok(events);
        }

        let events = self.client.get_schedule(season).await?;
        self.remember(&key, &events);
        Ok(events)
    }
}
