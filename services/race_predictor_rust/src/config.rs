use anyhow::{anyhow, Context, Result};
use gridcast_rust_core::circuit_breaker::ApiCircuitBreakerConfig;
use gridcast_rust_core::clients::jolpica::{JolpicaConfig, DEFAULT_BASE_URL};
use gridcast_rust_core::response_cache::CacheConfig;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default cache directory, relative to the working directory
pub const DEFAULT_CACHE_DIR: &str = "f1_cache";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub http_timeout: Duration,
    pub min_request_interval: Duration,

    pub cache_dir: PathBuf,
    pub cache_enabled: bool,

    pub circuit_failure_threshold: u32,
    pub circuit_recovery_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_base_url =
            env::var("GRIDCAST_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(anyhow!(
                "Invalid GRIDCAST_API_BASE_URL: {api_base_url} (expected http:// or https:// URL)"
            ));
        }

        let http_timeout = Duration::from_secs(
            parse_u64_env("GRIDCAST_HTTP_TIMEOUT_SECS", 10).context("GRIDCAST_HTTP_TIMEOUT_SECS")?,
        );
        let min_request_interval = Duration::from_millis(
            parse_u64_env("GRIDCAST_MIN_REQUEST_INTERVAL_MS", 300)
                .context("GRIDCAST_MIN_REQUEST_INTERVAL_MS")?,
        );

        let cache_dir = env::var("GRIDCAST_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CACHE_DIR));
        let cache_enabled = parse_bool_env("GRIDCAST_CACHE_ENABLED", true)?;

        let circuit_failure_threshold = parse_threshold_env("GRIDCAST_CIRCUIT_FAILURE_THRESHOLD", 5)?;
        let circuit_recovery_timeout = Duration::from_secs(
            parse_u64_env("GRIDCAST_CIRCUIT_RECOVERY_SECS", 30)
                .context("GRIDCAST_CIRCUIT_RECOVERY_SECS")?,
        );

        Ok(Self {
            api_base_url,
            http_timeout,
            min_request_interval,
            cache_dir,
            cache_enabled,
            circuit_failure_threshold,
            circuit_recovery_timeout,
        })
    }

    pub fn jolpica(&self) -> JolpicaConfig {
        JolpicaConfig {
            base_url: self.api_base_url.clone(),
            timeout: self.http_timeout,
            min_request_interval: self.min_request_interval,
            circuit_breaker: ApiCircuitBreakerConfig {
                failure_threshold: self.circuit_failure_threshold,
                recovery_timeout: self.circuit_recovery_timeout,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn cache(&self) -> CacheConfig {
        CacheConfig {
            dir: self.cache_dir.clone(),
            enabled: self.cache_enabled,
        }
    }
}

fn parse_bool_env(key: &str, default: bool) -> Result<bool> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(anyhow!("Invalid {key}: {raw} (expected true or false)")),
    }
}

/// Failure threshold: an integer that fits `u32`, at least 1.
fn parse_threshold_env(key: &str, default: u32) -> Result<u32> {
    let value = parse_u64_env(key, u64::from(default)).context(key.to_string())?;
    let threshold = u32::try_from(value)
        .with_context(|| format!("Invalid {key}: {value} (too large)"))?;
    Ok(threshold.max(1))
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse::<u64>()
        .with_context(|| format!("Invalid {key}: {raw} (expected non-negative integer)"))
}
