//! Pure aggregation over mood entries: heatmap buckets and trend statistics.

use crate::types::{HeatmapBucket, MoodEntry, MoodLevel, MoodStats, StatsEntry, Trend};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Minimum number of entries before a trend other than `Stable` is reported
pub const MIN_TREND_ENTRIES: usize = 4;

/// Half-to-half difference in mean mood that counts as a change
pub const TREND_THRESHOLD: f64 = 0.5;

/// UTC calendar day of a timestamp, `YYYY-MM-DD`
pub fn day_key(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Group entries by UTC day, one bucket per distinct day, ascending by date
pub fn heatmap(entries: &[MoodEntry]) -> Vec<HeatmapBucket> {
    let mut days: BTreeMap<String, (u32, u32)> = BTreeMap::new();
    for entry in entries {
        let (sum, count) = days.entry(day_key(entry.created_at)).or_default();
        *sum += u32::from(entry.mood.get());
        *count += 1;
    }

    days.into_iter()
        .map(|(date, (sum, count))| HeatmapBucket {
            date,
            mood: f64::from(sum) / f64::from(count),
            count,
        })
        .collect()
}

fn mean(levels: &[MoodLevel]) -> f64 {
    if levels.is_empty() {
        return 0.0;
    }
    let sum: u32 = levels.iter().map(|l| u32::from(l.get())).sum();
    f64::from(sum) / levels.len() as f64
}

/// Compare the newer half of `chronological` (oldest first) against the older half
pub fn trend(chronological: &[MoodLevel]) -> Trend {
    if chronological.len() < MIN_TREND_ENTRIES {
        return Trend::Stable;
    }

    let (older, newer) = chronological.split_at(chronological.len() / 2);
    let older_avg = mean(older);
    let newer_avg = mean(newer);

    if newer_avg > older_avg + TREND_THRESHOLD {
        Trend::Improving
    } else if newer_avg < older_avg - TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// Most frequent level; ties go to the lowest level
pub fn most_common(levels: &[MoodLevel]) -> Option<MoodLevel> {
    let mut tally: BTreeMap<MoodLevel, usize> = BTreeMap::new();
    for level in levels {
        *tally.entry(*level).or_default() += 1;
    }

    let mut best: Option<(MoodLevel, usize)> = None;
    for (level, count) in tally {
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((level, count)),
        }
    }
    best.map(|(level, _)| level)
}

/// Summarize `newest_first` entries (already limited to the window)
pub fn recent_stats(newest_first: &[MoodEntry]) -> MoodStats {
    let chronological: Vec<MoodLevel> = newest_first.iter().rev().map(|e| e.mood).collect();
    let average = mean(&chronological);

    MoodStats {
        recent_entries: newest_first
            .iter()
            .map(|e| StatsEntry {
                mood: e.mood,
                emoji: e.mood_emoji.clone(),
                date: day_key(e.created_at),
            })
            .collect(),
        average_mood: (average * 10.0).round() / 10.0,
        trend: trend(&chronological),
        most_common_mood: most_common(&chronological),
        total_days: newest_first.len(),
    }
}
