//! Integration tests for playlist history vertical slice
//!
//! Tests:
//! - Recency window and lookup limit
//! - Per-mood isolation
//! - Retention pruning through the storage context


use chrono::Duration;
use moodtune_core::storage::StorageContext;
use moodtune_storage::{playlist_history, LocalStorageContext};
use test_helpers::*;

#[tokio::test]
async fn test_recent_ids_only_within_window() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    playlist_history::record(pool, level(2), "old", t0() - Duration::days(4))
        .await
        .unwrap();
    playlist_history::record(pool, level(2), "fresh", t0() - Duration::hours(1))
        .await
        .unwrap();

    let ids = playlist_history::get_recent_ids(pool, level(2), t0() - Duration::days(3), 10)
        .await
        .unwrap();

    assert_eq!(ids, vec!["fresh".to_string()]);
}

#[tokio::test]
async fn test_recent_ids_are_per_mood_and_limited() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    for i in 0..12 {
        playlist_history::record(pool, level(5), &format!("p{i}"), t0() + Duration::minutes(i))
            .await
            .unwrap();
    }
    playlist_history::record(pool, level(1), "sad", t0()).await.unwrap();

    let ids = playlist_history::get_recent_ids(pool, level(5), t0() - Duration::days(3), 10)
        .await
        .unwrap();

    assert_eq!(ids.len(), 10);
    assert_eq!(ids[0], "p11");
    assert!(!ids.contains(&"sad".to_string()));
    assert!(!ids.contains(&"p0".to_string()));
}

#[tokio::test]
async fn test_prune_keeps_newest() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    for i in 0..5 {
        playlist_history::record(pool, level(3), &format!("p{i}"), t0() + Duration::minutes(i))
            .await
            .unwrap();
    }

    let removed = playlist_history::prune(pool, level(3), 2).await.unwrap();
    assert_eq!(removed, 3);

    let remaining = playlist_history::get_for_mood(pool, level(3)).await.unwrap();
    let ids: Vec<_> = remaining.iter().map(|r| r.playlist_id.as_str()).collect();
    assert_eq!(ids, vec!["p4", "p3"]);
}

#[tokio::test]
async fn test_record_selection_enforces_retention_per_mood() {
    let test_db = TestDb::new().await;
    let storage = LocalStorageContext::new(test_db.pool().clone());

    for i in 0..25 {
        storage
            .record_playlist_selection(
                level(4),
                &format!("happy-{i}"),
                t0() + Duration::minutes(i),
                playlist_history::DEFAULT_RETENTION,
            )
            .await
            .unwrap();
    }
    storage
        .record_playlist_selection(level(1), "sad-0", t0(), playlist_history::DEFAULT_RETENTION)
        .await
        .unwrap();

    let happy = playlist_history::count_for_mood(test_db.pool(), level(4)).await.unwrap();
    let sad = playlist_history::count_for_mood(test_db.pool(), level(1)).await.unwrap();
    assert_eq!(happy, 20);
    assert_eq!(sad, 1);

    let newest = playlist_history::get_for_mood(test_db.pool(), level(4)).await.unwrap();
    assert_eq!(newest[0].playlist_id, "happy-24");
    assert_eq!(newest.last().unwrap().playlist_id, "happy-5");
}
