//! Moodtune Core
//!
//! Platform-agnostic domain types, traits, and error handling for Moodtune.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `MoodEntry`, `PlaylistHistoryRecord`, `Playlist`, `MoodStats`, etc.
//! - **Core Traits**: `StorageContext`, `PlaylistCatalog`, `LanguageModel`, `Clock`
//! - **Pure logic**: heatmap bucketing, trend statistics, intent classification
//! - **Error Handling**: Unified `MoodError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use moodtune_core::types::MoodLevel;
//!
//! let level = MoodLevel::try_from(4_i64).unwrap();
//! assert_eq!(level.get(), 4);
//! assert!(MoodLevel::try_from(6_i64).is_err());
//! ```

#![forbid(unsafe_code)]

pub mod clock;
pub mod error;
pub mod intent;
pub mod stats;
pub mod storage;
pub mod traits;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{MoodError, Result};
pub use intent::IntentClassifier;
pub use storage::StorageContext;
pub use traits::{LanguageModel, PlaylistCatalog};

pub use types::{
    HeatmapBucket, MoodEntry, MoodEntryId, MoodLevel, MoodStats, NewMoodEntry, Playlist,
    PlaylistHistoryRecord, PlaylistSummary, PlaylistTrack, StatsEntry, Trend,
};
