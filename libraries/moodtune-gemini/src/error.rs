//! Error types for the Gemini client.

use moodtune_core::MoodError;
use thiserror::Error;

/// Errors that can occur when calling the model.
#[derive(Error, Debug)]
pub enum GeminiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-success status
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// No API key configured
    #[error("Gemini API key is not configured")]
    MissingApiKey,

    /// The model answered without any text
    #[error("Model returned no text")]
    EmptyResponse,

    /// Invalid base URL or model name
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

impl From<GeminiError> for MoodError {
    fn from(err: GeminiError) -> Self {
        MoodError::upstream(err.to_string())
    }
}
