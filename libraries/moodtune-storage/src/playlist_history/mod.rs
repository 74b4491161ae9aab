//! Playlist history vertical slice
//!
//! Short-lived record of which playlist was handed out for which mood.
//! Only the recommender reads it, as a recency filter.

use crate::{from_millis, StorageError};
use chrono::{DateTime, Utc};
use moodtune_core::{error::Result, MoodLevel, PlaylistHistoryRecord};
use sqlx::{Row, SqlitePool};

const TABLE: &str = "playlist_history";

/// Default number of records kept per mood
pub const DEFAULT_RETENTION: u32 = 20;

/// Append a record, returning its id
pub async fn record(
    pool: &SqlitePool,
    mood: MoodLevel,
    playlist_id: &str,
    at: DateTime<Utc>,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO playlist_history (mood, playlist_id, created_at) VALUES (?, ?, ?)",
    )
    .bind(i64::from(mood))
    .bind(playlist_id)
    .bind(at.timestamp_millis())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Playlist ids used for `mood` at or after `since`, newest first
pub async fn get_recent_ids(
    pool: &SqlitePool,
    mood: MoodLevel,
    since: DateTime<Utc>,
    limit: u32,
) -> Result<Vec<String>> {
    let rows = sqlx::query(
        r#"
        SELECT playlist_id
        FROM playlist_history
        WHERE mood = ? AND created_at >= ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(i64::from(mood))
    .bind(since.timestamp_millis())
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(|row| row.get::<String, _>("playlist_id")).collect())
}

/// Delete all but the newest `keep` records for `mood`; returns rows removed
pub async fn prune(pool: &SqlitePool, mood: MoodLevel, keep: u32) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM playlist_history
        WHERE mood = ?
          AND id NOT IN (
              SELECT id FROM playlist_history
              WHERE mood = ?
              ORDER BY created_at DESC, id DESC
              LIMIT ?
          )
        "#,
    )
    .bind(i64::from(mood))
    .bind(i64::from(mood))
    .bind(i64::from(keep))
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Number of records held for `mood`
pub async fn count_for_mood(pool: &SqlitePool, mood: MoodLevel) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS total FROM playlist_history WHERE mood = ?")
        .bind(i64::from(mood))
        .fetch_one(pool)
        .await?;

    Ok(row.get("total"))
}

/// All records for `mood`, newest first
pub async fn get_for_mood(pool: &SqlitePool, mood: MoodLevel) -> Result<Vec<PlaylistHistoryRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT id, mood, playlist_id, created_at
        FROM playlist_history
        WHERE mood = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(i64::from(mood))
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<PlaylistHistoryRecord> {
            let record = PlaylistHistoryRecord {
                id: row.get("id"),
                mood: MoodLevel::try_from(row.get::<i64, _>("mood"))
                    .map_err(|e| StorageError::invalid_row(TABLE, e.to_string()))?,
                playlist_id: row.get("playlist_id"),
                created_at: from_millis(TABLE, row.get("created_at"))?,
            };
            Ok(record)
        })
        .collect()
}
