//! One interactive prediction session: season, event listing, track, table.

use crate::formatters::{format_event_list, format_fetching, format_prediction};
use crate::prompt::{ask_season, ask_track};
use anyhow::Result;
use gridcast_rust_core::providers::{ResultsProvider, ScheduleProvider};
use gridcast_rust_core::schedule::resolve_event;
use gridcast_rust_core::{Clock, RacePredictor};
use log::info;
use std::io::{BufRead, Write};

pub async fn run_session<P, C, R, W>(
    predictor: &RacePredictor<P, C>,
    input: &mut R,
    output: &mut W,
) -> Result<()>
where
    P: ResultsProvider + ScheduleProvider,
    C: Clock,
    R: BufRead,
    W: Write,
{
    let season = ask_season(input, output)?;
    let events = predictor.list_events(season).await?;
    write!(output, "\n{}\n", format_event_list(&events))?;

    let query = ask_track(input, output)?;
    if let Some(event) = resolve_event(&events, &query) {
        writeln!(output, "\n{}", format_fetching(&query, event, season))?;
    }

    let prediction = predictor.predict(season, &query).await?;
    info!(
        "Ranked {} drivers for {} {}",
        prediction.rows.len(),
        season,
        prediction.event.name
    );
    write!(output, "\n{}", format_prediction(&prediction))?;
    output.flush()?;
    Ok(())
}
