//! Spotify Web API client.

use crate::error::{Result, SpotifyError};
use crate::token::{AccessToken, TokenCache};
use crate::types::{
    playlist_from_item, track_from_item, Page, SearchResponse, SpotifyConfig, TokenResponse,
};
use moodtune_core::{Clock, PlaylistSummary, PlaylistTrack, SystemClock};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Client for the Spotify Web API using the client-credentials flow.
///
/// Cheap to share behind an `Arc`; the bearer token lives in a
/// [`TokenCache`] shared by every request made through this client.
pub struct SpotifyClient {
    http: Client,
    config: SpotifyConfig,
    api_base: Url,
    token_url: Url,
    tokens: TokenCache,
}

fn parse_base(raw: &str) -> Result<Url> {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(SpotifyError::InvalidUrl("URL cannot be empty".into()));
    }
    let url = Url::parse(trimmed).map_err(|e| SpotifyError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(SpotifyError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }
    Ok(url)
}

fn map_send_error(e: reqwest::Error) -> SpotifyError {
    if e.is_connect() || e.is_timeout() {
        warn!(error = %e, "Spotify unreachable");
    }
    SpotifyError::Request(e)
}

impl SpotifyClient {
    /// Create a client that uses the system clock.
    pub fn new(config: SpotifyConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a client whose token expiry is judged by `clock`.
    pub fn with_clock(config: SpotifyConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let api_base = parse_base(&config.api_base_url)?;
        let token_url = parse_base(&config.token_url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Moodtune/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config,
            api_base,
            token_url,
            tokens: TokenCache::new(clock),
        })
    }

    /// Get the cached token, fetching one if needed.
    pub async fn access_token(&self) -> Result<String> {
        self.tokens.get_or_refresh(|| self.request_token()).await
    }

    /// Drop the cached token and fetch a new one.
    pub async fn refresh_access_token(&self) -> Result<String> {
        info!("Refreshing Spotify access token");
        self.tokens.invalidate().await;
        self.access_token().await
    }

    async fn request_token(&self) -> Result<AccessToken> {
        if !self.config.has_credentials() {
            return Err(SpotifyError::MissingCredentials);
        }

        debug!(url = %self.token_url, "Requesting client-credentials token");

        let response = self
            .http
            .post(self.token_url.clone())
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, "Spotify token request rejected");
            return Err(SpotifyError::TokenRequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            SpotifyError::ParseError(format!("Failed to parse token response: {e}"))
        })?;

        info!("Spotify access token obtained");
        Ok(AccessToken::issued(
            body.access_token,
            self.tokens.now(),
            body.expires_in,
        ))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| SpotifyError::InvalidUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Authenticated GET; a 401 drops the token that was used.
    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        let token = self.access_token().await?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!(what, "Spotify rejected access token");
            self.tokens.invalidate_if(&token).await;
            return Err(SpotifyError::Unauthorized);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(what, status = %status, body = %message, "Spotify API error");
            return Err(SpotifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SpotifyError::ParseError(format!("Failed to parse {what}: {e}")))
    }

    /// Search playlists matching `query`.
    ///
    /// Null entries and entries without an id are dropped.
    pub async fn search_playlists(&self, query: &str, limit: u32) -> Result<Vec<PlaylistSummary>> {
        let mut url = self.endpoint(&["search"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("type", "playlist")
            .append_pair("limit", &limit.to_string());

        let response: SearchResponse = self.get_json(url, "search response").await?;
        let items = response.playlists.unwrap_or_default().items;
        let total = items.len();

        let playlists: Vec<_> = items.into_iter().filter_map(playlist_from_item).collect();
        debug!(query, total, valid = playlists.len(), "Playlist search finished");

        Ok(playlists)
    }

    /// First `limit` tracks of a playlist that resolve to a named track.
    pub async fn playlist_tracks(&self, playlist_id: &str, limit: u32) -> Result<Vec<PlaylistTrack>> {
        let mut url = self.endpoint(&["playlists", playlist_id, "tracks"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());

        let page: Page = self.get_json(url, "playlist tracks").await?;
        let tracks: Vec<_> = page.items.into_iter().filter_map(track_from_item).collect();
        debug!(playlist_id, tracks = tracks.len(), "Fetched playlist tracks");

        Ok(tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        let ok = SpotifyConfig::new("id", "secret");
        assert!(SpotifyClient::new(ok.clone()).is_ok());
        assert!(SpotifyClient::new(ok.clone().with_api_base_url("http://localhost:8080/")).is_ok());

        assert!(SpotifyClient::new(ok.clone().with_api_base_url("")).is_err());
        assert!(SpotifyClient::new(ok.clone().with_api_base_url("not a url")).is_err());
        assert!(SpotifyClient::new(ok.with_token_url("ftp://example.com")).is_err());
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = SpotifyClient::new(SpotifyConfig::new("id", "secret")).unwrap();
        let url = client.endpoint(&["playlists", "abc", "tracks"]).unwrap();
        assert_eq!(url.as_str(), "https://api.spotify.com/v1/playlists/abc/tracks");
    }

    #[test]
    fn test_endpoint_on_bare_host() {
        let config = SpotifyConfig::new("id", "secret").with_api_base_url("http://127.0.0.1:9000/");
        let client = SpotifyClient::new(config).unwrap();
        let url = client.endpoint(&["search"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/search");
    }
}
