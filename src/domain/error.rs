//! Error types for the survey-lens core.
//!
//! This module defines the centralized error type [`SurveyError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Errors are `Clone` so that a single dataset load failure can be handed to every
//! caller that was coalesced onto the same load (see [`crate::data::DataCache`]).

use thiserror::Error;

/// A single failed attempt against one dataset source candidate.
///
/// Collected while walking the candidate list so that an exhausted load can
/// report every location it tried, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    /// Display form of the candidate location (path or URL).
    pub location: String,
    /// Why this candidate was rejected.
    pub reason: String,
}

impl std::fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location, self.reason)
    }
}

/// The main error type for survey-lens operations.
///
/// Only the dataset cache and the configuration loaders produce errors. Topic
/// resolution and search never fail; an unmatched query degrades to a default
/// value instead.
///
/// # Examples
///
/// ```
/// use survey_lens::domain::SurveyError;
///
/// fn read_config() -> Result<(), SurveyError> {
///     Err(SurveyError::Config("missing data_file".to_string()))
/// }
///
/// assert!(read_config().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurveyError {
    /// One source candidate could not be fetched.
    ///
    /// Non-fatal on its own: the cache logs it and moves to the next candidate.
    #[error("Source error at {location}: {reason}")]
    Source {
        /// Display form of the candidate location.
        location: String,
        /// Transport, status, or filesystem failure description.
        reason: String,
    },

    /// Every source candidate failed.
    ///
    /// The only error a dataset load surfaces to callers. The cache is left
    /// retryable, so the next load walks the whole candidate list again.
    #[error("All {} dataset sources failed", attempts.len())]
    SourcesExhausted {
        /// Each failed attempt, in the order it was tried.
        attempts: Vec<SourceFailure>,
    },

    /// A payload could not be parsed as delimited text.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Stored as a message so the error stays `Clone`.
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when a configuration, registry, or navigation file cannot be
    /// read or deserialized.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for SurveyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for SurveyError {
    fn from(err: csv::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for SurveyError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A specialized `Result` type for survey-lens operations.
pub type Result<T> = std::result::Result<T, SurveyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_message_counts_attempts() {
        let err = SurveyError::SourcesExhausted {
            attempts: vec![
                SourceFailure {
                    location: "a.csv".to_string(),
                    reason: "not found".to_string(),
                },
                SourceFailure {
                    location: "https://example.org/b.csv".to_string(),
                    reason: "HTTP 404".to_string(),
                },
            ],
        };
        assert_eq!(err.to_string(), "All 2 dataset sources failed");
    }

    #[test]
    fn io_errors_convert_to_messages() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SurveyError = io.into();
        assert_eq!(err, SurveyError::Io("gone".to_string()));
    }
}
