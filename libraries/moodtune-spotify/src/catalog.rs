use crate::client::SpotifyClient;
use async_trait::async_trait;
use moodtune_core::{MoodError, PlaylistCatalog, PlaylistSummary, PlaylistTrack};

#[async_trait]
impl PlaylistCatalog for SpotifyClient {
    async fn search_playlists(
        &self,
        query: &str,
        limit: u32,
    ) -> moodtune_core::Result<Vec<PlaylistSummary>> {
        SpotifyClient::search_playlists(self, query, limit)
            .await
            .map_err(MoodError::from)
    }

    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
    ) -> moodtune_core::Result<Vec<PlaylistTrack>> {
        SpotifyClient::playlist_tracks(self, playlist_id, limit)
            .await
            .map_err(MoodError::from)
    }

    async fn refresh_credentials(&self) -> moodtune_core::Result<()> {
        self.refresh_access_token()
            .await
            .map(|_| ())
            .map_err(MoodError::from)
    }
}
