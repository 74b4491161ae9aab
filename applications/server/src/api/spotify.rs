/// Playlist API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use moodtune_core::{MoodLevel, Playlist};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PlaylistQuery {
    pub mood: Option<String>,
}

/// GET /spotify/playlist?mood=<int>
/// Recommend a playlist without recording a mood entry
pub async fn playlist(
    State(app_state): State<AppState>,
    Query(query): Query<PlaylistQuery>,
) -> Result<Json<Playlist>> {
    let raw = query
        .mood
        .ok_or_else(|| ServerError::BadRequest("mood query parameter is required".to_string()))?;
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("mood must be an integer, got {raw:?}")))?;
    let mood = MoodLevel::try_from(value)?;

    let recommendation = app_state.recommender.recommend(mood).await?;
    Ok(Json(recommendation.playlist))
}
