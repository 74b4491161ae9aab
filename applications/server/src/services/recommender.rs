//! Playlist selection for a mood.
//!
//! Each mood band owns six search phrases. They are tried in random order
//! and the first search that turns up a playlist not handed out for the same
//! mood in the last three days wins. When every phrase comes back empty or
//! fully used, one broad search on the first word of the band's first phrase
//! decides, accepting a repeat if it has to.

use chrono::Duration;
use moodtune_core::{
    error::Result, storage::StorageContext, Clock, MoodError, MoodLevel, Playlist,
    PlaylistCatalog, PlaylistSummary,
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Playlists requested per search
pub const SEARCH_LIMIT: u32 = 50;

/// Tracks returned with a recommendation
pub const TRACK_LIMIT: u32 = 10;

/// How far back a playlist counts as recently shown
pub const HISTORY_WINDOW_DAYS: i64 = 3;

/// Recent history rows consulted per recommendation
pub const HISTORY_LOOKUP_LIMIT: u32 = 10;

/// History rows kept per mood
pub use moodtune_storage::playlist_history::DEFAULT_RETENTION as HISTORY_RETENTION;

const VERY_SAD: [&str; 6] = [
    "sad acoustic indie",
    "melancholic piano",
    "emotional ballads",
    "heartbreak songs",
    "sad indie folk",
    "crying songs",
];

const SAD: [&str; 6] = [
    "melancholic indie folk",
    "sad alternative",
    "emotional indie",
    "downtempo sad",
    "indie melancholy",
    "soft sad music",
];

const NEUTRAL: [&str; 6] = [
    "chill pop indie",
    "indie rock mellow",
    "alternative chill",
    "indie pop calm",
    "relaxing indie",
    "ambient indie",
];

const HAPPY: [&str; 6] = [
    "happy pop dance",
    "upbeat indie pop",
    "feel good music",
    "positive vibes",
    "happy alternative",
    "uplifting songs",
];

const VERY_HAPPY: [&str; 6] = [
    "energetic dance party",
    "upbeat electronic",
    "high energy pop",
    "dance hits",
    "party music",
    "euphoric music",
];

/// Search phrases for a mood band, in canonical order
pub fn search_phrases(mood: MoodLevel) -> &'static [&'static str; 6] {
    match mood.get() {
        1 => &VERY_SAD,
        2 => &SAD,
        4 => &HAPPY,
        5 => &VERY_HAPPY,
        _ => &NEUTRAL,
    }
}

/// Query used once every phrase has been exhausted
pub fn broad_query(mood: MoodLevel) -> &'static str {
    let first = search_phrases(mood)[0];
    first.split_whitespace().next().unwrap_or(first)
}

fn shuffled_phrases(mood: MoodLevel) -> Vec<&'static str> {
    let mut phrases = search_phrases(mood).to_vec();
    phrases.shuffle(&mut rand::thread_rng());
    phrases
}

fn pick_random(mut candidates: Vec<PlaylistSummary>) -> Option<PlaylistSummary> {
    if candidates.is_empty() {
        return None;
    }
    let index = rand::thread_rng().gen_range(0..candidates.len());
    Some(candidates.swap_remove(index))
}

fn pick_unused(hits: Vec<PlaylistSummary>, recent: &HashSet<String>) -> Option<PlaylistSummary> {
    pick_random(hits.into_iter().filter(|p| !recent.contains(&p.id)).collect())
}

/// Outcome of [`PlaylistRecommender::recommend`]
#[derive(Debug)]
pub struct Recommendation {
    pub playlist: Playlist,

    /// Result of recording the pick in the history store. Failing here
    /// does not fail the recommendation.
    pub history: Result<()>,
}

pub struct PlaylistRecommender {
    catalog: Arc<dyn PlaylistCatalog>,
    storage: Arc<dyn StorageContext>,
    clock: Arc<dyn Clock>,
}

impl PlaylistRecommender {
    pub fn new(
        catalog: Arc<dyn PlaylistCatalog>,
        storage: Arc<dyn StorageContext>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            storage,
            clock,
        }
    }

    /// Pick a playlist for `mood`, avoiding ones shown recently for that mood.
    ///
    /// Fails with [`MoodError::NotFound`] when neither the phrase searches nor
    /// the broad search return anything usable.
    pub async fn recommend(&self, mood: MoodLevel) -> Result<Recommendation> {
        let recent = self.recent_playlist_ids(mood).await;

        let mut selected = None;
        for phrase in shuffled_phrases(mood) {
            match self.search(phrase).await {
                Ok(hits) => {
                    let total = hits.len();
                    if let Some(pick) = pick_unused(hits, &recent) {
                        info!(%mood, phrase, playlist_id = %pick.id, "Selected playlist");
                        selected = Some(pick);
                        break;
                    }
                    debug!(%mood, phrase, total, "No unused playlists for phrase");
                }
                Err(e) => warn!(%mood, phrase, error = %e, "Playlist search failed"),
            }
        }

        let summary = match selected {
            Some(summary) => summary,
            None => self.broad_search(mood, &recent).await?,
        };

        let tracks = self
            .with_fresh_credentials(|| self.catalog.playlist_tracks(&summary.id, TRACK_LIMIT))
            .await
            .map_err(|e| match e {
                MoodError::Unauthorized(msg) => MoodError::upstream(msg),
                other => other,
            })?;

        let history = self
            .storage
            .record_playlist_selection(mood, &summary.id, self.clock.now(), HISTORY_RETENTION)
            .await;
        if let Err(e) = &history {
            warn!(%mood, playlist_id = %summary.id, error = %e, "Failed to record playlist history");
        }

        Ok(Recommendation {
            playlist: summary.with_tracks(tracks),
            history,
        })
    }

    async fn recent_playlist_ids(&self, mood: MoodLevel) -> HashSet<String> {
        let since = self.clock.now() - Duration::days(HISTORY_WINDOW_DAYS);
        match self
            .storage
            .get_recent_playlist_ids(mood, since, HISTORY_LOOKUP_LIMIT)
            .await
        {
            Ok(ids) => {
                debug!(%mood, recent = ids.len(), "Loaded recent playlist history");
                ids.into_iter().collect()
            }
            Err(e) => {
                warn!(%mood, error = %e, "Playlist history unavailable, not filtering repeats");
                HashSet::new()
            }
        }
    }

    async fn broad_search(
        &self,
        mood: MoodLevel,
        recent: &HashSet<String>,
    ) -> Result<PlaylistSummary> {
        let query = broad_query(mood);
        info!(%mood, query, "No unused playlist found, trying broad search");

        let hits = match self.search(query).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(%mood, query, error = %e, "Broad search failed");
                return Err(no_playlist(mood));
            }
        };

        let all = hits.clone();
        if let Some(pick) = pick_unused(hits, recent) {
            info!(%mood, playlist_id = %pick.id, "Selected unused playlist from broad search");
            return Ok(pick);
        }

        match pick_random(all) {
            Some(pick) => {
                info!(%mood, playlist_id = %pick.id, "Every result recently shown, repeating one");
                Ok(pick)
            }
            None => Err(no_playlist(mood)),
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<PlaylistSummary>> {
        self.with_fresh_credentials(|| self.catalog.search_playlists(query, SEARCH_LIMIT))
            .await
    }

    /// Run `op`; on an authorization failure refresh the credential and run it once more
    async fn with_fresh_credentials<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match op().await {
            Err(e) if e.is_unauthorized() => {
                info!("Catalog credential rejected, refreshing");
                self.catalog.refresh_credentials().await?;
                op().await
            }
            other => other,
        }
    }
}

fn no_playlist(mood: MoodLevel) -> MoodError {
    MoodError::not_found("playlist", format!("mood {mood}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(v: i64) -> MoodLevel {
        MoodLevel::try_from(v).unwrap()
    }

    fn summary(id: &str) -> PlaylistSummary {
        PlaylistSummary {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            image: None,
            external_url: None,
        }
    }

    #[test]
    fn every_band_has_six_distinct_phrases() {
        for mood in MoodLevel::all() {
            let phrases: HashSet<_> = search_phrases(mood).iter().collect();
            assert_eq!(phrases.len(), 6, "mood {mood}");
        }
    }

    #[test]
    fn broad_query_is_first_word_of_first_phrase() {
        assert_eq!(broad_query(level(1)), "sad");
        assert_eq!(broad_query(level(3)), "chill");
        assert_eq!(broad_query(level(5)), "energetic");
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mood = level(4);
        let mut shuffled = shuffled_phrases(mood);
        let mut canonical = search_phrases(mood).to_vec();
        shuffled.sort_unstable();
        canonical.sort_unstable();
        assert_eq!(shuffled, canonical);
    }

    #[test]
    fn pick_unused_skips_recent() {
        let recent: HashSet<String> = ["a", "b"].iter().map(|s| (*s).to_string()).collect();
        for _ in 0..20 {
            let pick = pick_unused(vec![summary("a"), summary("b"), summary("c")], &recent);
            assert_eq!(pick.map(|p| p.id).as_deref(), Some("c"));
        }
        assert!(pick_unused(vec![summary("a")], &recent).is_none());
        assert!(pick_random(Vec::new()).is_none());
    }
}
