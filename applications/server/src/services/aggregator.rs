/// Heatmap and recent statistics over the mood log
use chrono::Duration;
use moodtune_core::{
    error::Result, stats, storage::StorageContext, Clock, HeatmapBucket, MoodStats,
};
use std::sync::Arc;

/// Trailing window for [`MoodAggregator::recent_stats`]
pub const STATS_WINDOW_DAYS: i64 = 30;

/// Maximum entries summarized by [`MoodAggregator::recent_stats`]
pub const STATS_LIMIT: u32 = 20;

pub struct MoodAggregator {
    storage: Arc<dyn StorageContext>,
    clock: Arc<dyn Clock>,
}

impl MoodAggregator {
    pub fn new(storage: Arc<dyn StorageContext>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// One bucket per UTC day over every stored entry, oldest day first
    pub async fn heatmap(&self) -> Result<Vec<HeatmapBucket>> {
        let entries = self.storage.get_all_mood_entries().await?;
        Ok(stats::heatmap(&entries))
    }

    /// Statistics over the newest 20 entries of the last 30 days
    pub async fn recent_stats(&self) -> Result<MoodStats> {
        self.recent_stats_within(Duration::days(STATS_WINDOW_DAYS), STATS_LIMIT)
            .await
    }

    pub async fn recent_stats_within(&self, window: Duration, limit: u32) -> Result<MoodStats> {
        let since = self.clock.now() - window;
        let entries = self.storage.get_mood_entries_since(since, limit).await?;
        tracing::debug!(entries = entries.len(), %since, "Computing recent mood stats");
        Ok(stats::recent_stats(&entries))
    }
}
