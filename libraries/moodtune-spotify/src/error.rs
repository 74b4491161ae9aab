//! Error types for the Spotify client.

use moodtune_core::MoodError;
use thiserror::Error;

/// Errors that can occur when talking to Spotify.
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Spotify returned a non-success status
    #[error("Spotify API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The bearer token was rejected
    #[error("Access token rejected")]
    Unauthorized,

    /// The token endpoint refused the client credentials
    #[error("Token request failed ({status}): {message}")]
    TokenRequestFailed { status: u16, message: String },

    /// Client id or secret not configured
    #[error("Spotify client credentials are not configured")]
    MissingCredentials,

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Result type for Spotify client operations.
pub type Result<T> = std::result::Result<T, SpotifyError>;

impl From<SpotifyError> for MoodError {
    fn from(err: SpotifyError) -> Self {
        match err {
            SpotifyError::Unauthorized => MoodError::Unauthorized(err.to_string()),
            other => MoodError::upstream(other.to_string()),
        }
    }
}
