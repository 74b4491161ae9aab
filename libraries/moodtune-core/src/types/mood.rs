/// Mood domain types
use crate::error::MoodError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Row id of a stored mood entry
pub type MoodEntryId = i64;

/// Self-reported mood on a five step scale (1 = very sad, 5 = very happy)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct MoodLevel(u8);

impl MoodLevel {
    /// Lowest accepted value
    pub const MIN: u8 = 1;
    /// Highest accepted value
    pub const MAX: u8 = 5;
    /// The "neutral" band
    pub const NEUTRAL: MoodLevel = MoodLevel(3);

    /// Every valid level, ascending
    pub fn all() -> impl Iterator<Item = MoodLevel> {
        (Self::MIN..=Self::MAX).map(MoodLevel)
    }

    /// Get the inner value
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for MoodLevel {
    type Error = MoodError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(MoodError::invalid_input(format!(
                "mood must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }
}

impl From<MoodLevel> for u8 {
    fn from(level: MoodLevel) -> Self {
        level.0
    }
}

impl From<MoodLevel> for i64 {
    fn from(level: MoodLevel) -> Self {
        i64::from(level.0)
    }
}

impl fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single mood submission. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    /// Row id
    pub id: MoodEntryId,

    /// Reported mood
    pub mood: MoodLevel,

    /// Emoji picked alongside the mood
    pub mood_emoji: String,

    /// When the entry was submitted
    pub created_at: DateTime<Utc>,
}

/// Data for creating a mood entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMoodEntry {
    /// Reported mood
    pub mood: MoodLevel,
    /// Emoji picked alongside the mood
    pub mood_emoji: String,
    /// Submission time
    pub created_at: DateTime<Utc>,
}
