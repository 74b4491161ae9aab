mod history;
mod insights;
mod mood;
mod playlist;

pub use history::PlaylistHistoryRecord;
pub use insights::{HeatmapBucket, MoodStats, StatsEntry, Trend};
pub use mood::{MoodEntry, MoodEntryId, MoodLevel, NewMoodEntry};
pub use playlist::{Playlist, PlaylistSummary, PlaylistTrack};
