/// Mood API routes
use crate::{error::Result, state::AppState};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use moodtune_core::{HeatmapBucket, MoodEntry, MoodLevel, NewMoodEntry, Playlist};
use serde::{Deserialize, Serialize};

/// Entries returned by GET /mood/recent without a limit
pub const DEFAULT_RECENT_LIMIT: u32 = 10;

/// Upper bound for GET /mood/recent
pub const MAX_RECENT_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodRequest {
    pub mood: i64,
    #[serde(default)]
    pub mood_emoji: String,
}

impl MoodRequest {
    fn level(&self) -> Result<MoodLevel> {
        Ok(MoodLevel::try_from(self.mood)?)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    /// `None` when saving the entry failed; the playlist is still returned
    pub mood_entry: Option<MoodEntry>,
    pub playlist: Playlist,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<u32>,
}

/// POST /mood
/// Record a mood entry
pub async fn create_mood(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<MoodRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MoodEntry>)> {
    let Json(req) = payload?;
    let entry = app_state
        .storage
        .create_mood_entry(NewMoodEntry {
            mood: req.level()?,
            mood_emoji: req.mood_emoji,
            created_at: app_state.clock.now(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// POST /mood/recommend
/// Record a mood entry and recommend a playlist for it
pub async fn recommend(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<MoodRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecommendResponse>)> {
    let Json(req) = payload?;
    let mood = req.level()?;

    let mood_entry = match app_state
        .storage
        .create_mood_entry(NewMoodEntry {
            mood,
            mood_emoji: req.mood_emoji,
            created_at: app_state.clock.now(),
        })
        .await
    {
        Ok(entry) => Some(entry),
        Err(e) => {
            tracing::warn!(%mood, error = %e, "Failed to save mood entry alongside recommendation");
            None
        }
    };

    let recommendation = app_state.recommender.recommend(mood).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecommendResponse {
            mood_entry,
            playlist: recommendation.playlist,
        }),
    ))
}

/// GET /mood/heatmap
/// Mean mood per calendar day
pub async fn heatmap(State(app_state): State<AppState>) -> Result<Json<Vec<HeatmapBucket>>> {
    Ok(Json(app_state.aggregator.heatmap().await?))
}

/// GET /mood/recent?limit=<n>
/// Most recent entries, newest first
pub async fn recent(
    State(app_state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<MoodEntry>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .min(MAX_RECENT_LIMIT);

    Ok(Json(app_state.storage.get_recent_mood_entries(limit).await?))
}
