//! Jolpica F1 API client (Ergast-compatible).
//!
//! Fetches season schedules and per-round race/sprint classifications from
//! the `MRData.RaceTable` endpoints and converts them into model types.

use crate::circuit_breaker::{ApiCircuitBreaker, ApiCircuitBreakerConfig, ApiCircuitState};
use crate::clients::pacer::RequestPacer;
use crate::error::{DataUnavailable, ProviderResult};
use crate::models::{Event, ResultEntry, RoundNumber, Season, SessionKind, SessionResult};
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.jolpi.ca/ergast/f1";

#[derive(Debug, Clone)]
pub struct JolpicaConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Minimum gap between two requests
    pub min_request_interval: Duration,
    /// Value of the `limit` query parameter (rows per page)
    pub page_limit: u32,
    pub circuit_breaker: ApiCircuitBreakerConfig,
}

impl Default for JolpicaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            min_request_interval: Duration::from_millis(300),
            page_limit: 100,
            circuit_breaker: ApiCircuitBreakerConfig::default(),
        }
    }
}

pub struct JolpicaClient {
    client: Client,
    base_url: String,
    page_limit: u32,
    pacer: RequestPacer,
    circuit_breaker: Arc<ApiCircuitBreaker>,
}

impl std::fmt::Debug for JolpicaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JolpicaClient")
            .field("base_url", &self.base_url)
            .field("circuit_breaker_state", &self.circuit_breaker.state())
            .finish()
    }
}

// ============================================================================
// Response shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct ErgastResponse {
    #[serde(rename = "MRData")]
    mr_data: MrData,
}

#[derive(Debug, Deserialize)]
struct MrData {
    #[serde(rename = "RaceTable")]
    race_table: RaceTable,
}

#[derive(Debug, Deserialize)]
struct RaceTable {
    #[serde(rename = "Races", default)]
    races: Vec<RaceDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RaceDto {
    round: String,
    race_name: String,
    date: String,
    #[serde(rename = "Results", default)]
    results: Vec<ResultDto>,
    #[serde(rename = "SprintResults", default)]
    sprint_results: Vec<ResultDto>,
}

#[derive(Debug, Deserialize)]
struct ResultDto {
    position: String,
    #[serde(rename = "Driver")]
    driver: DriverDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriverDto {
    driver_id: String,
    given_name: String,
    family_name: String,
}

impl JolpicaClient {
    pub fn new() -> Self {
        Self::with_config(JolpicaConfig::default())
    }

    pub fn with_config(config: JolpicaConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_limit: config.page_limit,
            pacer: RequestPacer::new(config.min_request_interval),
            circuit_breaker: Arc::new(ApiCircuitBreaker::new("jolpica", config.circuit_breaker)),
        }
    }

    pub fn circuit_state(&self) -> ApiCircuitState {
        self.circuit_breaker.state()
    }

    pub async fn get_schedule(&self, season: Season) -> ProviderResult<Vec<Event>> {
        let url = format!("{}/{}.json?limit={}", self.base_url, season, self.page_limit);
        let response = self.fetch(&url).await?;
        let events = events_from_response(response);
        if events.is_empty() {
            return Err(DataUnavailable::new(format!("no events listed for {}", season)));
        }
        Ok(events)
    }

    pub async fn get_session_result(
        &self,
        season: Season,
        round: RoundNumber,
        kind: SessionKind,
    ) -> ProviderResult<SessionResult> {
        let endpoint = match kind {
            SessionKind::Race => "results",
            SessionKind::Sprint => "sprint",
        };
        let url = format!(
            "{}/{}/{}/{}.json?limit={}",
            self.base_url, season, round, endpoint, self.page_limit
        );
        let response = self.fetch(&url).await?;
        session_from_response(response, season, round, kind)
    }

    /// GET + decode, feeding transport and server failures into the breaker.
    async fn fetch(&self, url: &str) -> ProviderResult<ErgastResponse> {
        if !self.circuit_breaker.is_available() {
            return Err(DataUnavailable::new(format!(
                "circuit breaker '{}' is open",
                self.circuit_breaker.name()
            )));
        }

        self.pacer.wait().await;
        debug!("GET {}", url);

        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                self.circuit_breaker.record_failure();
                return Err(DataUnavailable::new(format!("request failed: {}", e)));
            }
        };

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            self.circuit_breaker.record_success();
            return Err(DataUnavailable::new(format!("not found: {}", url)));
        }
        if !status.is_success() {
            self.circuit_breaker.record_failure();
            return Err(DataUnavailable::new(format!("HTTP {} from {}", status, url)));
        }

        match resp.json::<ErgastResponse>().await {
            Ok(body) => {
                self.circuit_breaker.record_success();
                Ok(body)
            }
            Err(e) => {
                self.circuit_breaker.record_failure();
                Err(DataUnavailable::new(format!("invalid response body: {}", e)))
            }
        }
    }
}

impl Default for JolpicaClient {
    fn default() -> Self {
        Self::new()
    }
}

fn events_from_response(response: ErgastResponse) -> Vec<Event> {
    let mut events: Vec<Event> = response
        .mr_data
        .race_table
        .races
        .into_iter()
        .filter_map(|race| {
            let round = race.round.parse::<RoundNumber>().ok()?;
            let date = NaiveDate::parse_from_str(&race.date, "%Y-%m-%d").ok()?;
            Some(Event::new(race.race_name, round, date))
        })
        .collect();
    events.sort_by_key(|e| e.round);
    events
}

fn session_from_response(
    response: ErgastResponse,
    season: Season,
    round: RoundNumber,
    kind: SessionKind,
) -> ProviderResult<SessionResult> {
    let race = response
        .mr_data
        .race_table
        .races
        .into_iter()
        .next()
        .ok_or_else(|| {
            DataUnavailable::new(format!("no {} session for {} round {}", kind, season, round))
        })?;

    let rows = match kind {
        SessionKind::Race => race.results,
        SessionKind::Sprint => race.sprint_results,
    };

    let mut entries: Vec<ResultEntry> = rows
        .into_iter()
        .filter_map(|row| match row.position.parse::<u32>() {
            Ok(position) if position > 0 => Some(ResultEntry::new(
                row.driver.driver_id,
                format!("{} {}", row.driver.given_name, row.driver.family_name),
                position,
            )),
            _ => {
                debug!(
                    "Dropping {} row with position '{}' ({} round {})",
                    kind, row.position, season, round
                );
                None
            }
        })
        .collect();

    if entries.is_empty() {
        return Err(DataUnavailable::new(format!(
            "empty {} classification for {} round {}",
            kind, season, round
        )));
    }

    entries.sort_by_key(|e| e.position);
    Ok(SessionResult::new(season, round, kind, entries))
}
