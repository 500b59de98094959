//! Integration tests for the file-backed store and snapshot format

use gpa_ledger::ledger::{Ledger, LoadOrigin};
use gpa_ledger::models::{CourseId, CourseRecord};
use gpa_ledger::store::{snapshot, FileStore, KeyValueStore, COURSE_LIST_KEY};
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn ledger_survives_restart_on_disk() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let mut ledger = Ledger::initialize(Arc::new(FileStore::new(dir.path()))).await;
    assert!(matches!(ledger.origin(), LoadOrigin::Fresh));
    ledger.add_course("Algebra", "3", "4").unwrap();
    let last = ledger.add_course("History", "2", "3").unwrap();
    last.write.settled().await.unwrap();
    let expected = ledger.records().to_vec();
    drop(ledger);

    let reopened = Ledger::initialize(Arc::new(FileStore::new(dir.path()))).await;
    assert!(matches!(reopened.origin(), LoadOrigin::Restored(2)));
    assert_eq!(reopened.records(), expected.as_slice());
    assert_eq!(reopened.gpa().to_string(), "3.60");
}

#[tokio::test]
async fn reads_snapshot_written_by_earlier_versions() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path());
    store
        .write(
            COURSE_LIST_KEY,
            r#"[{"id":1718000000000,"course":"Calculus","credits":4,"grade":3.7},{"id":1718000000500,"course":"Poetry","credits":1.5,"grade":4}]"#,
        )
        .await
        .unwrap();

    let ledger = Ledger::initialize(Arc::new(store)).await;
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.records()[0].id, CourseId(1_718_000_000_000));
    assert_eq!(ledger.records()[1].name, "Poetry");
}

#[tokio::test]
async fn snapshot_file_uses_course_field() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path());
    let path = store.path_for(COURSE_LIST_KEY);

    let mut ledger = Ledger::initialize(Arc::new(store)).await;
    ledger
        .add_course("Algebra", "3", "4")
        .unwrap()
        .write
        .settled()
        .await
        .unwrap();

    let raw = std::fs::read_to_string(path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &json.as_array().unwrap()[0];
    assert_eq!(entry["course"], "Algebra");
    assert_eq!(entry["credits"], 3.0);
    assert_eq!(entry["grade"], 4.0);
    assert!(entry["id"].is_u64());
}

#[tokio::test]
async fn unreadable_snapshot_file_starts_empty() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path());
    std::fs::write(store.path_for(COURSE_LIST_KEY), "[{\"id\":1}").unwrap();

    let ledger = Ledger::initialize(Arc::new(store)).await;
    assert!(ledger.is_empty());
    assert!(matches!(ledger.origin(), LoadOrigin::Recovered(_)));
}

#[test]
fn snapshot_round_trip_is_field_for_field() {
    let records = vec![
        CourseRecord::new(CourseId(1_718_000_000_000), "Algebra".to_string(), 3.0, 4.0),
        CourseRecord::new(CourseId(1_718_000_000_001), "Études".to_string(), 0.5, 2.75),
        CourseRecord::new(CourseId(1_718_000_000_002), "Seminar \"Q\"".to_string(), 1.0, -0.5),
    ];

    let decoded = snapshot::decode(&snapshot::encode(&records).unwrap()).unwrap();
    assert_eq!(decoded, records);
}

#[tokio::test]
async fn repeated_ids_keep_the_first_record() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path());
    store
        .write(
            COURSE_LIST_KEY,
            r#"[{"id":1,"course":"Calculus","credits":4,"grade":3},{"id":1,"course":"Copy","credits":1,"grade":1},{"id":2,"course":"Poetry","credits":2,"grade":4}]"#,
        )
        .await
        .unwrap();

    let ledger = Ledger::initialize(Arc::new(store)).await;
    assert!(matches!(ledger.origin(), LoadOrigin::Restored(2)));
    let names: Vec<&str> = ledger.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Calculus", "Poetry"]);
}
