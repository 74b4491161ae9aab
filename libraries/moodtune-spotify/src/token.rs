//! Shared bearer-token cell.
//!
//! One token serves every request in the process. It is fetched on first
//! use, dropped when Spotify answers 401, and treated as stale once the
//! `expires_in` reported by the token endpoint has passed.

use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use moodtune_core::Clock;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Refresh this long before the reported expiry
const EXPIRY_MARGIN_SECS: i64 = 30;

/// A bearer token and when it stops being usable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Token issued at `now`, valid for `expires_in` seconds if known
    pub fn issued(value: impl Into<String>, now: DateTime<Utc>, expires_in: Option<i64>) -> Self {
        Self {
            value: value.into(),
            expires_at: expires_in.map(|secs| now + Duration::seconds(secs)),
        }
    }

    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now < expires_at - Duration::seconds(EXPIRY_MARGIN_SECS),
            None => true,
        }
    }
}

/// Thread-safe get-or-refresh cell for the process-wide token
pub struct TokenCache {
    slot: RwLock<Option<AccessToken>>,
    clock: Arc<dyn Clock>,
}

impl TokenCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: RwLock::new(None),
            clock,
        }
    }

    /// Current time according to the injected clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// The cached token, if it is still fresh
    pub async fn current(&self) -> Option<String> {
        let now = self.clock.now();
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|token| token.is_fresh(now))
            .map(|token| token.value.clone())
    }

    /// Return the cached token or run `fetch` to obtain a new one.
    ///
    /// Concurrent callers that miss the cache queue on the write lock; only
    /// the first one fetches, the rest reuse its result.
    pub async fn get_or_refresh<F, Fut>(&self, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AccessToken>>,
    {
        if let Some(value) = self.current().await {
            return Ok(value);
        }

        let mut slot = self.slot.write().await;
        let now = self.clock.now();
        if let Some(token) = slot.as_ref().filter(|token| token.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        let token = fetch().await?;
        debug!(expires_at = ?token.expires_at, "Stored new access token");
        let value = token.value.clone();
        *slot = Some(token);
        Ok(value)
    }

    /// Forget the cached token unconditionally
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }

    /// Forget the cached token only if it is still `stale`.
    ///
    /// A request that got a 401 must not throw away a token another request
    /// refreshed in the meantime.
    pub async fn invalidate_if(&self, stale: &str) {
        let mut slot = self.slot.write().await;
        if slot.as_ref().is_some_and(|token| token.value == stale) {
            *slot = None;
        }
    }
}
