/// Chat assistant API routes
use crate::{
    error::{Result, ServerError},
    services::ChatReply,
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Accepted for compatibility; answers are not personalised yet
    #[serde(default)]
    pub user_id: Option<String>,
}

/// POST /chatbot/chat
/// Ask the assistant a question
pub async fn chat(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ChatReply>)> {
    let Json(req) = payload?;
    let message = req
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest("Message cannot be empty".to_string()))?;

    let reply = app_state.assistant.ask(&message).await?;
    Ok((StatusCode::CREATED, Json(reply)))
}
