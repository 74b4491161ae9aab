//! Moodtune Spotify Client
//!
//! HTTP client for the parts of the Spotify Web API that Moodtune uses.
//!
//! # Features
//!
//! - **Client credentials**: app-level token exchange, no user login
//! - **Token cache**: one shared bearer token, refreshed lazily and after a 401
//! - **Search**: playlist search with malformed hits filtered out
//! - **Tracks**: first few resolvable tracks of a playlist
//!
//! # Example
//!
//! ```ignore
//! use moodtune_spotify::{SpotifyClient, SpotifyConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SpotifyClient::new(SpotifyConfig::new("client-id", "client-secret"))?;
//!
//!     let hits = client.search_playlists("chill pop indie", 50).await?;
//!     if let Some(first) = hits.first() {
//!         let tracks = client.playlist_tracks(&first.id, 10).await?;
//!         println!("{} has {} tracks", first.name, tracks.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod catalog;
mod client;
mod error;
mod token;
mod types;

pub use client::SpotifyClient;
pub use error::{Result, SpotifyError};
pub use token::{AccessToken, TokenCache};
pub use types::{SpotifyConfig, DEFAULT_API_BASE_URL, DEFAULT_TOKEN_URL};
