/// Traits for the external services Moodtune talks to
use crate::error::Result;
use crate::types::{PlaylistSummary, PlaylistTrack};
use async_trait::async_trait;

/// External playlist catalog (Spotify in production)
///
/// Implementations report a stale credential as
/// [`MoodError::Unauthorized`](crate::MoodError::Unauthorized) so callers
/// can refresh and retry.
#[async_trait]
pub trait PlaylistCatalog: Send + Sync {
    /// Search for playlists; malformed hits are already dropped
    async fn search_playlists(&self, query: &str, limit: u32) -> Result<Vec<PlaylistSummary>>;

    /// First `limit` resolvable tracks of a playlist
    async fn playlist_tracks(&self, playlist_id: &str, limit: u32) -> Result<Vec<PlaylistTrack>>;

    /// Drop the cached credential and fetch a new one
    async fn refresh_credentials(&self) -> Result<()>;
}

/// Hosted text-completion model
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete `prompt` and return the generated text
    async fn generate(&self, prompt: &str) -> Result<String>;
}
