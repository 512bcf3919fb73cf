//! Gridcast Core - race finishing-order prediction from historical results.
//!
//! This module provides:
//! - Provider traits for season schedules and per-round classifications
//! - A Jolpica (Ergast-compatible) HTTP client with an on-disk response cache
//! - Points, average-finish and circuit-history aggregators
//! - A fixed linear composite score and deterministic ranking
//! - The prediction pipeline tying them together

pub mod aggregation;
pub mod circuit_breaker;
pub mod clients;
pub mod clock;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod response_cache;
pub mod schedule;
pub mod scoring;

#[cfg(test)]
mod test_support;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DataUnavailable, ForecastError, ProviderResult};
pub use models::*;
pub use pipeline::{parse_season, Prediction, RacePredictor};
pub use scoring::Weights;
