//! Circuit breaker for the upstream results API.
//!
//! Once the API has failed `failure_threshold` times in a row the breaker
//! opens and callers fail fast instead of waiting on a dead service for every
//! remaining round. After `recovery_timeout` one probe is let through
//! (half-open); `success_threshold` successes close the breaker again.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// States for the API circuit breaker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCircuitState {
    /// Requests are allowed
    Closed,
    /// Requests are rejected without being sent
    Open,
    /// Probing whether the API recovered
    HalfOpen,
}

#[derive(Debug, Clone)]
pub struct ApiCircuitBreakerConfig {
    /// Consecutive failures that trip the breaker
    pub failure_threshold: u32,
    /// How long to stay open before probing
    pub recovery_timeout: Duration,
    /// Successes needed in half-open to close
    pub success_threshold: u32,
}

impl Default for ApiCircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            recovery_timeout: Duration::from_secs(30),
            success_threshold: 2,
        }
    }
}

#[derive(Debug)]
struct BreakerState {
    state: ApiCircuitState,
    consecutive_failures: u32,
    half_open_successes: u32,
    opened_at: Option<Instant>,
}

#[derive(Debug)]
pub struct ApiCircuitBreaker {
    name: String,
    config: ApiCircuitBreakerConfig,
    inner: Mutex<BreakerState>,
}

impl ApiCircuitBreaker {
    pub fn new(name: &str, config: ApiCircuitBreakerConfig) -> Self {
        Self {
            name: name.to_string(),
            config,
            inner: Mutex::new(BreakerState {
                state: ApiCircuitState::Closed,
                consecutive_failures: 0,
                half_open_successes: 0,
                opened_at: None,
            }),
        }
    }

    /// Whether a request may be sent now. Moves Open -> HalfOpen once the
    /// recovery timeout has elapsed.
    pub fn is_available(&self) -> bool {
        let mut inner = self.inner.lock();
        let state = inner.state;
        match state {
            ApiCircuitState::Closed | ApiCircuitState::HalfOpen => true,
            ApiCircuitState::Open => {
                let elapsed = inner
                    .opened_at
                    .map(|t| t.elapsed() >= self.config.recovery_timeout)
                    .unwrap_or(true);
                if elapsed {
                    inner.state = ApiCircuitState::HalfOpen;
                    inner.half_open_successes = 0;
                    tracing::debug!("API circuit breaker '{}' half-open", self.name);
                }
                elapsed
            }
        }
    }

    pub fn record_success(&self) {
        let mut inner = self.inner.lock();
        inner.consecutive_failures = 0;
        if inner.state == ApiCircuitState::HalfOpen {
            inner.half_open_successes += 1;
            if inner.half_open_successes < self.config.success_threshold {
                return;
            }
            tracing::info!(
                "API circuit breaker '{}' closed after {} successful calls",
                self.name,
                inner.half_open_successes
            );
        }
        inner.state = ApiCircuitState::Closed;
        inner.opened_at = None;
    }

    pub fn record_failure(&self) {
        let mut inner = self.inner.lock();
        inner.consecutive_failures += 1;
        let state = inner.state;
        match state {
            ApiCircuitState::Closed
                if inner.consecutive_failures >= self.config.failure_threshold =>
            {
                tracing::warn!(
                    "API circuit breaker '{}' OPENED after {} consecutive failures",
                    self.name,
                    inner.consecutive_failures
                );
                inner.state = ApiCircuitState::Open;
                inner.opened_at = Some(Instant::now());
            }
            ApiCircuitState::HalfOpen => {
                tracing::warn!(
                    "API circuit breaker '{}' re-OPENED during half-open probe",
                    self.name
                );
                inner.state = ApiCircuitState::Open;
                inner.opened_at = Some(Instant::now());
            }
            _ => {}
        }
    }

    pub fn state(&self) -> ApiCircuitState {
        self.inner.lock().state
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.state = ApiCircuitState::Closed;
        inner.consecutive_failures = 0;
        inner.half_open_successes = 0;
        inner.opened_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker(failures: u32, recovery_ms: u64, successes: u32) -> ApiCircuitBreaker {
        ApiCircuitBreaker::new(
            "test_api",
            ApiCircuitBreakerConfig {
                failure_threshold: failures,
                recovery_timeout: Duration::from_millis(recovery_ms),
                success_threshold: successes,
            },
        )
    }

    #[test]
    fn test_opens_after_threshold() {
        let cb = breaker(3, 1_000, 2);
        assert!(cb.is_available());

        cb.record_failure();
        cb.record_failure();
        assert!(cb.is_available());

        cb.record_failure();
        assert_eq!(cb.state(), ApiCircuitState::Open);
        assert!(!cb.is_available());
    }

    #[test]
    fn test_success_resets_failure_streak() {
        let cb = breaker(2, 1_000, 1);
        cb.record_failure();
        cb.record_success();
        cb.record_failure();
        assert_eq!(cb.state(), ApiCircuitState::Closed);
    }

    #[test]
    fn test_recovery_through_half_open() {
        let cb = breaker(2, 10, 2);
        cb.record_failure();
        cb.record_failure();
        assert_eq!(cb.state(), ApiCircuitState::Open);

        std::thread::sleep(Duration::from_millis(20));
        assert!(cb.is_available());
        assert_eq!(cb.state(), ApiCircuitState::HalfOpen);

        cb.record_success();
        assert_eq!(cb.state(), ApiCircuitState::HalfOpen);
        cb.record_success();
        assert_eq!(cb.state(), ApiCircuitState::Closed);
    }

    #[test]
    fn test_half_open_failure_reopens() {
        let cb = breaker(1, 10, 1);
        cb.record_failure();
        std::thread::sleep(Duration::from_millis(20));
        assert!(cb.is_available());

        cb.record_failure();
        assert_eq!(cb.state(), ApiCircuitState::Open);
    }

    #[test]
    fn test_reset() {
        let cb = breaker(1, 60_000, 1);
        cb.record_failure();
        assert!(!cb.is_available());
        cb.reset();
        assert!(cb.is_available());
    }
}
