use crate::{mood_entries, playlist_history};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use moodtune_core::{error::Result, storage::StorageContext, MoodEntry, MoodLevel, NewMoodEntry};
use sqlx::SqlitePool;

/// Local storage context using `SQLite`
#[derive(Clone)]
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) and migrate the database at `database_url`
    pub async fn connect(database_url: &str) -> std::result::Result<Self, crate::StorageError> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl StorageContext for LocalStorageContext {
    // Mood entries
    async fn create_mood_entry(&self, entry: NewMoodEntry) -> Result<MoodEntry> {
        mood_entries::create(&self.pool, entry).await
    }

    async fn get_recent_mood_entries(&self, limit: u32) -> Result<Vec<MoodEntry>> {
        mood_entries::get_recent(&self.pool, limit).await
    }

    async fn get_all_mood_entries(&self) -> Result<Vec<MoodEntry>> {
        mood_entries::get_all(&self.pool).await
    }

    async fn get_mood_entries_since(
        &self,
        since: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<MoodEntry>> {
        mood_entries::get_since(&self.pool, since, limit).await
    }

    // Playlist history
    async fn get_recent_playlist_ids(
        &self,
        mood: MoodLevel,
        since: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<String>> {
        playlist_history::get_recent_ids(&self.pool, mood, since, limit).await
    }

    async fn record_playlist_selection(
        &self,
        mood: MoodLevel,
        playlist_id: &str,
        at: DateTime<Utc>,
        keep: u32,
    ) -> Result<()> {
        playlist_history::record(&self.pool, mood, playlist_id, at).await?;

        let removed = playlist_history::prune(&self.pool, mood, keep).await?;
        if removed > 0 {
            tracing::debug!(%mood, removed, "Pruned playlist history");
        }

        Ok(())
    }
}
