//! Sentio error types

use std::time::Duration;

/// Message shown to the user for any failed batch.
///
/// The underlying cause is logged, never shown.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to analyze text. Please check your API key and try again.";

/// Sentio error types
#[derive(Debug, thiserror::Error)]
pub enum SentioError {
    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("model not found: {0}")]
    ModelNotFound(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The structured payload parsed as JSON but violates the response schema.
    #[error("schema violation: {0}")]
    Schema(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    // Soft errors
    #[error("empty response from model")]
    EmptyResponse,

    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    // Session errors
    #[error("an analysis is already in progress")]
    AnalysisInProgress,
}

impl SentioError {
    /// The text to present to a user for this failure.
    ///
    /// Every classification failure collapses into one generic message;
    /// only re-entrancy and bad local input are reported as themselves.
    pub fn user_message(&self) -> String {
        match self {
            SentioError::AnalysisInProgress | SentioError::InvalidInput(_) => self.to_string(),
            _ => ANALYSIS_FAILED_MESSAGE.to_string(),
        }
    }
}

/// Result type alias for Sentio operations
pub type Result<T> = std::result::Result<T, SentioError>;
