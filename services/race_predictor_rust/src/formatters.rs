use gridcast_rust_core::models::{Event, PredictionRow};
use gridcast_rust_core::scoring::round2;
use gridcast_rust_core::Prediction;

const COLUMNS: [&str; 6] = [
    "PredictedRank",
    "Driver",
    "Points",
    "AvgFinishPos",
    "TrackAvgPos",
    "CustomScore",
];

/// Numbered event listing, 1-based.
pub fn format_event_list(events: &[Event]) -> String {
    let mut out = String::from("Available Events:\n");
    for (i, event) in events.iter().enumerate() {
        out.push_str(&format!("{:2}. {}\n", i + 1, event.name));
    }
    out
}

pub fn format_fetching(query: &str, event: &Event, season: i32) -> String {
    format!("Fetching data for {} ({}, Round {})...", query, season, event.round)
}

/// Heading plus right-aligned ranking table.
pub fn format_prediction(prediction: &Prediction) -> String {
    let mut out = format!(
        "Predicted Race Rankings for {}:\n",
        title_case(&prediction.query)
    );
    out.push_str(&format_table(&prediction.rows));
    out
}

pub fn format_table(rows: &[PredictionRow]) -> String {
    let cells: Vec<[String; 6]> = rows.iter().map(row_cells).collect();

    let mut widths = COLUMNS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &COLUMNS.map(String::from), &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn row_cells(row: &PredictionRow) -> [String; 6] {
    [
        row.predicted_rank.to_string(),
        row.driver_full_name.clone(),
        format!("{:.2}", round2(row.cumulative_points)),
        format!("{:.2}", round2(row.mean_finish_position)),
        format!("{:.2}", round2(row.track_mean_finish_position)),
        format!("{:.2}", round2(row.composite_score)),
    ]
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", " ".repeat(pad), cell)
        })
        .collect();
    out.push_str(&line.join(" "));
    out.push('\n');
}

/// Capitalise the first letter of every alphabetic run, lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
