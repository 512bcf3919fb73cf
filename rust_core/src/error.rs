use crate::models::Season;
use thiserror::Error;

/// The only failure a provider reports: the requested data could not be
/// obtained, whatever the underlying cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("data unavailable: {reason}")]
pub struct DataUnavailable {
    pub reason: String,
}

impl DataUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

pub type ProviderResult<T> = Result<T, DataUnavailable>;

/// Failures that abort a single prediction request.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("No circuit found for '{query}' in {season}{}", suggestion_hint(.suggestion))]
    NoMatch {
        query: String,
        season: Season,
        suggestion: Option<String>,
    },

    #[error("Event schedule for {season} is unavailable: {source}")]
    ScheduleUnavailable {
        season: Season,
        #[source]
        source: DataUnavailable,
    },

    #[error("Invalid season: {0}")]
    InvalidSeason(String),

    #[error("No drivers with completed results in {season}")]
    NoDrivers { season: Season },
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(". Did you mean '{}'?", name),
        None => ". Check spelling.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_message_with_suggestion() {
        let err = ForecastError::NoMatch {
            query: "Itallian".to_string(),
            season: 2023,
            suggestion: Some("Italian Grand Prix".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "No circuit found for 'Itallian' in 2023. Did you mean 'Italian Grand Prix'?"
        );
    }

    #[test]
    fn test_no_match_message_without_suggestion() {
        let err = ForecastError::NoMatch {
            query: "zzz".to_string(),
            season: 2023,
            suggestion: None,
        };
        assert!(err.to_string().ends_with("Check spelling."));
    }

    #[test]
    fn test_schedule_unavailable_keeps_source() {
        let err = ForecastError::ScheduleUnavailable {
            season: 2031,
            source: DataUnavailable::new("HTTP 404"),
        };
        assert!(err.to_string().contains("HTTP 404"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
