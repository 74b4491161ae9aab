/// API route modules
pub mod chatbot;
pub mod health;
pub mod mood;
pub mod spotify;

use crate::{
    config::ServerSettings,
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, TraceLayer},
};

/// API routes with request tracing
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        // Mood log
        .route("/mood", post(mood::create_mood))
        .route("/mood/recommend", post(mood::recommend))
        .route("/mood/heatmap", get(mood::heatmap))
        .route("/mood/recent", get(mood::recent))
        // Playlists
        .route("/spotify/playlist", get(spotify::playlist))
        // Assistant
        .route("/chatbot/chat", post(chatbot::chat))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .with_state(app_state)
}

/// Browser CORS policy for the configured origins
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| ServerError::Config(format!("Invalid CORS origin: {origin}")))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

/// Full application: API routes, CORS and, if configured, the web UI.
///
/// Paths the API does not handle fall through to `web_dir`; unknown paths
/// there get `index.html` so client-side routing works.
pub fn app(app_state: AppState, settings: &ServerSettings) -> Result<Router> {
    let mut app = router(app_state);

    if let Some(web_dir) = &settings.web_dir {
        let index = web_dir.join("index.html");
        if index.is_file() {
            tracing::info!("Serving web UI from {}", web_dir.display());
            app = app.fallback_service(ServeDir::new(web_dir).fallback(ServeFile::new(index)));
        } else {
            tracing::warn!(
                "No index.html in {}, web UI disabled",
                web_dir.display()
            );
        }
    }

    Ok(app.layer(cors_layer(&settings.cors_origins)?))
}
