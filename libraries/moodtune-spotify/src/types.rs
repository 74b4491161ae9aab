//! Configuration and Spotify Web API payloads.

use moodtune_core::{PlaylistSummary, PlaylistTrack};
use serde::Deserialize;

/// Production API root
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Production client-credentials endpoint
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

pub(crate) const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Configuration for talking to Spotify.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    /// Application client id
    pub client_id: String,
    /// Application client secret
    pub client_secret: String,
    /// API root, e.g. `https://api.spotify.com/v1`
    pub api_base_url: String,
    /// Token endpoint
    pub token_url: String,
}

impl SpotifyConfig {
    /// Config pointing at the production endpoints.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }

    /// Override the API root (tests, proxies).
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Override the token endpoint.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Both halves of the client credentials are present.
    pub fn has_credentials(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

// =============================================================================
// Token endpoint
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    /// Token validity in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
}

// =============================================================================
// Search
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub playlists: Option<Page>,
}

/// Items stay untyped so one malformed entry does not sink the whole page
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Page {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawPlaylist {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    images: Option<Vec<RawImage>>,
    external_urls: Option<RawExternalUrls>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawExternalUrls {
    spotify: Option<String>,
}

/// Turn one search hit into a summary; `None` for null or id-less hits
pub(crate) fn playlist_from_item(item: serde_json::Value) -> Option<PlaylistSummary> {
    if item.is_null() {
        return None;
    }
    let raw: RawPlaylist = serde_json::from_value(item).ok()?;
    let id = raw.id.filter(|id| !id.is_empty())?;

    Some(PlaylistSummary {
        id,
        name: raw.name.unwrap_or_default(),
        description: raw.description,
        image: raw
            .images
            .and_then(|images| images.into_iter().next())
            .and_then(|image| image.url),
        external_url: raw.external_urls.and_then(|urls| urls.spotify),
    })
}

// =============================================================================
// Playlist tracks
// =============================================================================

#[derive(Debug, Deserialize)]
struct RawPlaylistItem {
    track: Option<RawTrack>,
}

#[derive(Debug, Deserialize)]
struct RawTrack {
    name: Option<String>,
    #[serde(default)]
    artists: Vec<RawArtist>,
    preview_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawArtist {
    name: Option<String>,
}

/// Turn one playlist item into a track; `None` when there is no resolvable track
pub(crate) fn track_from_item(item: serde_json::Value) -> Option<PlaylistTrack> {
    if item.is_null() {
        return None;
    }
    let raw: RawPlaylistItem = serde_json::from_value(item).ok()?;
    let track = raw.track?;
    let name = track.name.filter(|name| !name.is_empty())?;

    let artist = track
        .artists
        .into_iter()
        .next()
        .and_then(|artist| artist.name)
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    Some(PlaylistTrack {
        name,
        artist,
        preview_url: track.preview_url,
    })
}
