/// Playlist types returned by the catalog and the recommender
use serde::{Deserialize, Serialize};

/// A playlist as found by a catalog search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    /// Catalog identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Free-text description (may contain HTML from the catalog)
    pub description: Option<String>,

    /// Cover image URL
    pub image: Option<String>,

    /// Link to open the playlist in the catalog's own player
    pub external_url: Option<String>,
}

impl PlaylistSummary {
    /// Attach resolved tracks
    pub fn with_tracks(self, tracks: Vec<PlaylistTrack>) -> Playlist {
        Playlist {
            id: self.id,
            name: self.name,
            description: self.description,
            image: self.image,
            external_url: self.external_url,
            tracks,
        }
    }
}

/// A recommended playlist with a sample of its tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Catalog identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Free-text description
    pub description: Option<String>,

    /// Cover image URL
    pub image: Option<String>,

    /// Link to open the playlist in the catalog's own player
    pub external_url: Option<String>,

    /// First few resolvable tracks
    pub tracks: Vec<PlaylistTrack>,
}

/// Track inside a recommended playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistTrack {
    /// Track title
    pub name: String,

    /// Primary artist
    pub artist: String,

    /// 30 second preview clip, when the catalog offers one
    pub preview_url: Option<String>,
}
