//! Race Predictor
//!
//! Interactive CLI: asks for a season and an event, then prints the
//! predicted finishing order from season form and circuit history.

use anyhow::{Context, Result};
use dotenv::dotenv;
use gridcast_rust_core::providers::JolpicaProvider;
use gridcast_rust_core::response_cache::ResponseCache;
use gridcast_rust_core::{RacePredictor, SystemClock};
use log::{error, info};
use race_predictor_rust::config::Config;
use race_predictor_rust::session::run_session;
use std::io;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Failures are reported, not propagated, so the exit status stays zero
    if let Err(e) = run().await {
        error!("Prediction failed: {:#}", e);
        println!("\nError: {}", e);
    }
    Ok(())
}

async fn run() -> Result<()> {
    let config = Config::from_env()?;
    info!(
        "Starting race predictor (api: {}, cache: {})",
        config.api_base_url,
        if config.cache_enabled {
            config.cache_dir.display().to_string()
        } else {
            "disabled".to_string()
        }
    );

    let cache = ResponseCache::open(&config.cache())
        .with_context(|| format!("Failed to open cache at {}", config.cache_dir.display()))?;
    let provider = JolpicaProvider::new(config.jolpica(), cache);
    let predictor = RacePredictor::new(provider, SystemClock);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_session(&predictor, &mut input, &mut output).await
}
