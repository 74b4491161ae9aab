/// Core error types for Moodtune
use thiserror::Error;

/// Result type alias using `MoodError`
pub type Result<T> = std::result::Result<T, MoodError>;

/// Core error type for Moodtune
#[derive(Error, Debug)]
pub enum MoodError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An upstream service rejected our credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// An upstream service failed or returned garbage
    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl MoodError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an upstream error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Whether this error means the caller's credential went stale
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for MoodError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
