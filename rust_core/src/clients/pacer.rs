//! Minimum spacing between outgoing requests.
//!
//! The public results API enforces a short burst limit, so sequential scans
//! over a whole season wait out the remainder of the interval before each
//! request instead of getting throttled mid-scan.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct RequestPacer {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestPacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// How long a request issued at `now` would have to wait.
    pub fn delay_at(&self, now: Instant) -> Duration {
        match *self.last_request.lock() {
            Some(last) => (last + self.min_interval).saturating_duration_since(now),
            None => Duration::ZERO,
        }
    }

    /// Wait until the next request is allowed, then claim the slot.
    pub async fn wait(&self) {
        let delay = self.delay_at(Instant::now());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        *self.last_request.lock() = Some(Instant::now());
    }
}
