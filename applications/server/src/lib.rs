//! Moodtune Server Library
//!
//! Mood log, playlist recommendations, mood heatmap and a chat assistant
//! behind a small JSON API.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{ChatAssistant, ChatReply, MoodAggregator, PlaylistRecommender, Recommendation};
pub use state::AppState;
