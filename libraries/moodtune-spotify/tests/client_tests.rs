//! Tests for the Spotify client against a mock Web API.

use moodtune_core::{MoodError, PlaylistCatalog};
use moodtune_spotify::{SpotifyClient, SpotifyConfig, SpotifyError};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SpotifyClient {
    let config = SpotifyConfig::new("client-id", "client-secret")
        .with_api_base_url(format!("{}/v1", server.uri()))
        .with_token_url(format!("{}/api/token", server.uri()));
    SpotifyClient::new(config).unwrap()
}

async fn mount_token(server: &MockServer, token: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header_exists("authorization"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

// =============================================================================
// Token Tests
// =============================================================================

mod token {
    use super::*;

    #[tokio::test]
    async fn test_token_is_cached() {
        let server = MockServer::start().await;
        mount_token(&server, "tok-1", 1).await;

        let client = client_for(&server);
        assert_eq!(client.access_token().await.unwrap(), "tok-1");
        assert_eq!(client.access_token().await.unwrap(), "tok-1");
    }

    #[tokio::test]
    async fn test_basic_auth_header_sent() {
        let server = MockServer::start().await;

        // base64("client-id:client-secret")
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .and(header(
                "authorization",
                "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=",
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.access_token().await.unwrap(), "tok");
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_client"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        match client.access_token().await.unwrap_err() {
            SpotifyError::TokenRequestFailed { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("invalid_client"));
            }
            other => panic!("Expected TokenRequestFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_skip_network() {
        let server = MockServer::start().await;
        mount_token(&server, "unused", 0).await;

        let config = SpotifyConfig::new("", "")
            .with_token_url(format!("{}/api/token", server.uri()));
        let client = SpotifyClient::new(config).unwrap();

        assert!(matches!(
            client.access_token().await,
            Err(SpotifyError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn test_refresh_fetches_new_token() {
        let server = MockServer::start().await;
        mount_token(&server, "tok", 2).await;

        let client = client_for(&server);
        client.access_token().await.unwrap();
        client.refresh_access_token().await.unwrap();
    }
}

// =============================================================================
// Search Tests
// =============================================================================

mod search {
    use super::*;

    #[tokio::test]
    async fn test_search_filters_malformed_items() {
        let server = MockServer::start().await;
        mount_token(&server, "tok", 1).await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("q", "chill pop indie"))
            .and(query_param("type", "playlist"))
            .and(query_param("limit", "50"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "playlists": {
                    "items": [
                        null,
                        { "name": "no id" },
                        {
                            "id": "p1",
                            "name": "Chill Mix",
                            "description": "easy",
                            "images": [{ "url": "https://img/p1" }],
                            "external_urls": { "spotify": "https://open.spotify.com/playlist/p1" }
                        }
                    ]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let hits = client.search_playlists("chill pop indie", 50).await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p1");
        assert_eq!(hits[0].image.as_deref(), Some("https://img/p1"));
    }

    #[tokio::test]
    async fn test_search_without_playlists_key() {
        let server = MockServer::start().await;
        mount_token(&server, "tok", 1).await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.search_playlists("anything", 50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_unauthorized_drops_token() {
        let server = MockServer::start().await;
        mount_token(&server, "tok", 2).await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.search_playlists("sad", 50).await.unwrap_err();
        assert!(matches!(err, SpotifyError::Unauthorized));

        // Next call has to fetch a fresh token
        let _ = client.search_playlists("sad", 50).await;
    }

    #[tokio::test]
    async fn test_search_server_error() {
        let server = MockServer::start().await;
        mount_token(&server, "tok", 1).await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        match client.search_playlists("x", 50).await.unwrap_err() {
            SpotifyError::Api { status, .. } => assert_eq!(status, 503),
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_invalid_json() {
        let server = MockServer::start().await;
        mount_token(&server, "tok", 1).await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.search_playlists("x", 50).await,
            Err(SpotifyError::ParseError(_))
        ));
    }
}

// =============================================================================
// Playlist Track Tests
// =============================================================================

mod tracks {
    use super::*;

    #[tokio::test]
    async fn test_tracks_skip_missing_entries() {
        let server = MockServer::start().await;
        mount_token(&server, "tok", 1).await;

        Mock::given(method("GET"))
            .and(path("/v1/playlists/p1/tracks"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "track": null },
                    {
                        "track": {
                            "name": "Song A",
                            "artists": [{ "name": "Artist A" }, { "name": "Guest" }],
                            "preview_url": "https://p.scdn.co/a"
                        }
                    },
                    { "track": { "name": "Song B", "artists": [], "preview_url": null } }
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let tracks = client.playlist_tracks("p1", 10).await.unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].artist, "Artist A");
        assert_eq!(tracks[0].preview_url.as_deref(), Some("https://p.scdn.co/a"));
        assert_eq!(tracks[1].artist, "Unknown Artist");
    }

    #[tokio::test]
    async fn test_tracks_not_found() {
        let server = MockServer::start().await;
        mount_token(&server, "tok", 1).await;

        Mock::given(method("GET"))
            .and(path("/v1/playlists/gone/tracks"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.playlist_tracks("gone", 10).await,
            Err(SpotifyError::Api { status: 404, .. })
        ));
    }
}

// =============================================================================
// Catalog Trait Tests
// =============================================================================

mod catalog {
    use super::*;

    #[tokio::test]
    async fn test_unauthorized_maps_to_mood_error() {
        let server = MockServer::start().await;
        mount_token(&server, "tok", 1).await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let catalog: &dyn PlaylistCatalog = &client;
        let err = catalog.search_playlists("x", 50).await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_other_failures_are_upstream() {
        let server = MockServer::start().await;
        mount_token(&server, "tok", 1).await;

        Mock::given(method("GET"))
            .and(path("/v1/playlists/p1/tracks"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let catalog: &dyn PlaylistCatalog = &client;
        assert!(matches!(
            catalog.playlist_tracks("p1", 10).await,
            Err(MoodError::Upstream(_))
        ));
    }
}
