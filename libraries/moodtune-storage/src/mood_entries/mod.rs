//! Mood entries vertical slice
//!
//! Entries are append-only; every read returns newest first.

use crate::{from_millis, StorageError};
use chrono::{DateTime, Utc};
use moodtune_core::{error::Result, MoodEntry, MoodError, MoodLevel, NewMoodEntry};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const TABLE: &str = "mood_entries";

fn from_row(row: &SqliteRow) -> std::result::Result<MoodEntry, StorageError> {
    let mood = MoodLevel::try_from(row.get::<i64, _>("mood"))
        .map_err(|e| StorageError::invalid_row(TABLE, e.to_string()))?;

    Ok(MoodEntry {
        id: row.get("id"),
        mood,
        mood_emoji: row.get("mood_emoji"),
        created_at: from_millis(TABLE, row.get("created_at"))?,
    })
}

fn from_rows(rows: &[SqliteRow]) -> Result<Vec<MoodEntry>> {
    rows.iter()
        .map(|row| from_row(row).map_err(MoodError::from))
        .collect()
}

/// Insert a new entry
pub async fn create(pool: &SqlitePool, entry: NewMoodEntry) -> Result<MoodEntry> {
    let created_at = entry.created_at.timestamp_millis();

    let result = sqlx::query(
        "INSERT INTO mood_entries (mood, mood_emoji, created_at) VALUES (?, ?, ?)",
    )
    .bind(i64::from(entry.mood))
    .bind(&entry.mood_emoji)
    .bind(created_at)
    .execute(pool)
    .await?;

    Ok(MoodEntry {
        id: result.last_insert_rowid(),
        mood: entry.mood,
        mood_emoji: entry.mood_emoji,
        created_at: from_millis(TABLE, created_at)?,
    })
}

/// Get the `limit` most recent entries
pub async fn get_recent(pool: &SqlitePool, limit: u32) -> Result<Vec<MoodEntry>> {
    let rows = sqlx::query(
        r#"
        SELECT id, mood, mood_emoji, created_at
        FROM mood_entries
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    from_rows(&rows)
}

/// Get every entry
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<MoodEntry>> {
    let rows = sqlx::query(
        r#"
        SELECT id, mood, mood_emoji, created_at
        FROM mood_entries
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    from_rows(&rows)
}

/// Get up to `limit` entries created at or after `since`
pub async fn get_since(
    pool: &SqlitePool,
    since: DateTime<Utc>,
    limit: u32,
) -> Result<Vec<MoodEntry>> {
    let rows = sqlx::query(
        r#"
        SELECT id, mood, mood_emoji, created_at
        FROM mood_entries
        WHERE created_at >= ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(since.timestamp_millis())
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    from_rows(&rows)
}
