/// Playlist history domain types
use crate::types::MoodLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One playlist handed out for a mood; used as a recency filter only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistHistoryRecord {
    pub id: i64,
    pub mood: MoodLevel,
    pub playlist_id: String,
    pub created_at: DateTime<Utc>,
}
