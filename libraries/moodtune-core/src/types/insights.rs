/// Derived views over stored mood entries
use crate::types::MoodLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean mood of one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapBucket {
    /// UTC calendar day, `YYYY-MM-DD`
    pub date: String,

    /// Arithmetic mean of the day's entries
    pub mood: f64,

    /// Number of entries that day
    pub count: u32,
}

/// Direction of recent mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trend::Improving => "improving",
            Trend::Declining => "declining",
            Trend::Stable => "stable",
        };
        f.write_str(s)
    }
}

/// Compact entry embedded in [`MoodStats`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsEntry {
    /// Reported mood
    pub mood: MoodLevel,
    /// Emoji picked alongside the mood
    pub emoji: String,
    /// UTC calendar day, `YYYY-MM-DD`
    pub date: String,
}

/// Summary of the most recent entries inside a trailing window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodStats {
    /// Entries considered, newest first
    pub recent_entries: Vec<StatsEntry>,

    /// Mean mood rounded to one decimal; 0 when there are no entries
    pub average_mood: f64,

    /// Second half vs first half of the window
    pub trend: Trend,

    /// Most frequent level; `None` when there are no entries
    pub most_common_mood: Option<MoodLevel>,

    /// Number of entries in the window
    pub total_days: usize,
}
