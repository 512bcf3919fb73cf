//! Line-oriented prompts over any reader and writer.

use anyhow::{anyhow, Result};
use gridcast_rust_core::{parse_season, Season};
use std::io::{BufRead, Write};

pub const SEASON_PROMPT: &str = "Enter the F1 season year (e.g., 2023): ";
pub const TRACK_PROMPT: &str = "Enter the track or event name from the list above: ";

/// Print `prompt`, then read one line with surrounding whitespace removed.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(anyhow!("no input"));
    }
    Ok(line.trim().to_string())
}

pub fn ask_season<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Season> {
    let answer = ask(input, output, SEASON_PROMPT)?;
    Ok(parse_season(&answer)?)
}

/// An empty answer is passed through; it matches the first listed event.
pub fn ask_track<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    ask(input, output, TRACK_PROMPT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_season() {
        let mut input = Cursor::new("2023\n");
        let mut output = Vec::new();
        assert_eq!(ask_season(&mut input, &mut output).unwrap(), 2023);
        assert_eq!(String::from_utf8(output).unwrap(), SEASON_PROMPT);
    }

    #[test]
    fn test_ask_season_rejects_garbage() {
        let mut input = Cursor::new("next year\n");
        let err = ask_season(&mut input, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("next year"));
    }

    #[test]
    fn test_ask_track_trims() {
        let mut input = Cursor::new("  Monza \r\n");
        assert_eq!(ask_track(&mut input, &mut Vec::new()).unwrap(), "Monza");
    }

    #[test]
    fn test_eof_is_an_error() {
        assert!(ask(&mut Cursor::new(""), &mut Vec::new(), "> ").is_err());
        assert!(ask_track(&mut Cursor::new(""), &mut Vec::new()).is_err());
    }

    #[test]
    fn test_blank_track_is_passed_through() {
        assert_eq!(ask_track(&mut Cursor::new("  \n"), &mut Vec::new()).unwrap(), "");
    }
}
