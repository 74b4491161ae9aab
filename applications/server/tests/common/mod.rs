//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use moodtune_core::{
    FixedClock, IntentClassifier, LanguageModel, MoodError, MoodLevel, PlaylistCatalog,
    PlaylistSummary, PlaylistTrack,
};
use moodtune_server::AppState;
use moodtune_storage::LocalStorageContext;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Test database on a real SQLite file, removed on drop
pub struct TestDb {
    pub storage: Arc<LocalStorageContext>,
    _temp_dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let storage = LocalStorageContext::connect(&db_url)
            .await
            .expect("Failed to open test database");

        Self {
            storage: Arc::new(storage),
            _temp_dir: temp_dir,
        }
    }
}

/// Fixed reference instant for deterministic timestamps
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn level(value: i64) -> MoodLevel {
    MoodLevel::try_from(value).expect("valid mood")
}

pub fn summary(id: &str) -> PlaylistSummary {
    PlaylistSummary {
        id: id.to_string(),
        name: format!("Playlist {id}"),
        description: Some("test playlist".to_string()),
        image: Some(format!("https://img.test/{id}")),
        external_url: Some(format!("https://open.spotify.com/playlist/{id}")),
    }
}

pub fn track(name: &str) -> PlaylistTrack {
    PlaylistTrack {
        name: name.to_string(),
        artist: "Test Artist".to_string(),
        preview_url: None,
    }
}

/// In-memory playlist catalog with scripted answers
#[derive(Default)]
pub struct FakeCatalog {
    hits: HashMap<String, Vec<PlaylistSummary>>,
    default_hits: Vec<PlaylistSummary>,
    failing: HashSet<String>,
    unauthorized_remaining: AtomicUsize,
    tracks: Vec<PlaylistTrack>,
    searches: Mutex<Vec<String>>,
    refreshes: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self {
            tracks: vec![track("Song A"), track("Song B")],
            ..Self::default()
        }
    }

    /// Results for one exact query
    pub fn with_hits(mut self, query: &str, ids: &[&str]) -> Self {
        self.hits
            .insert(query.to_string(), ids.iter().map(|id| summary(id)).collect());
        self
    }

    /// Results for any query without specific hits
    pub fn with_default_hits(mut self, ids: &[&str]) -> Self {
        self.default_hits = ids.iter().map(|id| summary(id)).collect();
        self
    }

    /// Searches for `query` fail with an upstream error
    pub fn failing(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    /// The next `n` catalog calls report a stale credential
    pub fn unauthorized_times(self, n: usize) -> Self {
        self.unauthorized_remaining.store(n, Ordering::SeqCst);
        self
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    fn take_unauthorized(&self) -> bool {
        self.unauthorized_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl PlaylistCatalog for FakeCatalog {
    async fn search_playlists(
        &self,
        query: &str,
        _limit: u32,
    ) -> moodtune_core::Result<Vec<PlaylistSummary>> {
        self.searches.lock().unwrap().push(query.to_string());

        if self.take_unauthorized() {
            return Err(MoodError::Unauthorized("token expired".to_string()));
        }
        if self.failing.contains(query) {
            return Err(MoodError::upstream("search failed"));
        }

        Ok(self
            .hits
            .get(query)
            .cloned()
            .unwrap_or_else(|| self.default_hits.clone()))
    }

    async fn playlist_tracks(
        &self,
        _playlist_id: &str,
        _limit: u32,
    ) -> moodtune_core::Result<Vec<PlaylistTrack>> {
        Ok(self.tracks.clone())
    }

    async fn refresh_credentials(&self) -> moodtune_core::Result<()> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Language model that echoes a canned answer
pub struct CannedModel(pub String);

#[async_trait]
impl LanguageModel for CannedModel {
    async fn generate(&self, _prompt: &str) -> moodtune_core::Result<String> {
        Ok(self.0.clone())
    }
}

/// Everything a test needs to drive the services or the router
pub struct TestApp {
    pub state: AppState,
    pub catalog: Arc<FakeCatalog>,
    pub clock: Arc<FixedClock>,
    pub db: TestDb,
}

pub async fn test_app(catalog: FakeCatalog) -> TestApp {
    test_app_with_model(catalog, Arc::new(CannedModel("Take a short walk.".to_string()))).await
}

pub async fn test_app_with_model(catalog: FakeCatalog, model: Arc<dyn LanguageModel>) -> TestApp {
    let db = TestDb::new().await;
    let catalog = Arc::new(catalog);
    let clock = Arc::new(FixedClock::new(t0()));

    let state = AppState::new(
        db.storage.clone(),
        catalog.clone(),
        model,
        IntentClassifier::default(),
        clock.clone(),
    );

    TestApp {
        state,
        catalog,
        clock,
        db,
    }
}
