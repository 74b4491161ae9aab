//! Storage trait consumed by the services

use crate::error::Result;
use crate::types::{MoodEntry, MoodLevel, NewMoodEntry};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage context providing access to database operations
///
/// Implemented by the `SQLite` layer; services only ever see this trait.
#[async_trait]
pub trait StorageContext: Send + Sync {
    // ========================================================================
    // Mood entries
    // ========================================================================

    /// Persist a new mood entry and return it with its id
    async fn create_mood_entry(&self, entry: NewMoodEntry) -> Result<MoodEntry>;

    /// Most recent entries, newest first
    async fn get_recent_mood_entries(&self, limit: u32) -> Result<Vec<MoodEntry>>;

    /// Every stored entry, newest first
    async fn get_all_mood_entries(&self) -> Result<Vec<MoodEntry>>;

    /// Entries created at or after `since`, newest first, at most `limit`
    async fn get_mood_entries_since(
        &self,
        since: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<MoodEntry>>;

    // ========================================================================
    // Playlist history
    // ========================================================================

    /// Playlist ids handed out for `mood` at or after `since`, newest first
    async fn get_recent_playlist_ids(
        &self,
        mood: MoodLevel,
        since: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<String>>;

    /// Append a history record, then delete all but the newest `keep` for that mood
    ///
    /// The two steps are separate statements; a failure between them can
    /// leave more than `keep` rows until the next successful call.
    async fn record_playlist_selection(
        &self,
        mood: MoodLevel,
        playlist_id: &str,
        at: DateTime<Utc>,
        keep: u32,
    ) -> Result<()>;
}
