use std::sync::Arc;
use storage::{KvStore, SqliteKvStore};
use tempfile::tempdir;

#[tokio::test]
async fn set_and_get_round_trip_through_file_db() {
    let temp = tempdir().unwrap();
    let db_path = temp.path().join("nested").join("prefs.db");
    let store = SqliteKvStore::open(&db_path.to_string_lossy()).await.unwrap();

    assert_eq!(store.get("currency").await.unwrap(), None);
    store.set("currency", "EUR").await.unwrap();
    store.set("currency", "SAR").await.unwrap();
    assert_eq!(store.get("currency").await.unwrap().as_deref(), Some("SAR"));

    // Reopening sees the persisted value.
    drop(store);
    let reopened = SqliteKvStore::open(&db_path.to_string_lossy()).await.unwrap();
    assert_eq!(reopened.get("currency").await.unwrap().as_deref(), Some("SAR"));
}

#[tokio::test]
async fn concurrent_updates_are_not_lost() {
    let temp = tempdir().unwrap();
    let db_path = temp.path().join("prefs.db");
    let store = Arc::new(SqliteKvStore::open(&db_path.to_string_lossy()).await.unwrap());

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .update(
                    "history_csv",
                    Box::new(move |cur: Option<&str>| match cur {
                        Some(existing) if !existing.is_empty() => format!("{i}\n{existing}"),
                        _ => i.to_string(),
                    }),
                )
                .await
                .unwrap();
        }));
    }
    for h in handles {
        h.await.unwrap();
    }

    let blob = store.get("history_csv").await.unwrap().unwrap();
    let mut lines: Vec<u32> = blob.lines().map(|l| l.parse().unwrap()).collect();
    lines.sort_unstable();
    assert_eq!(lines, (0..16).collect::<Vec<_>>());
}
