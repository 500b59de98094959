//! Integration tests for the course ledger

use async_trait::async_trait;
use gpa_ledger::ledger::{CourseForm, Field, Ledger, LoadOrigin, ValidationError};
use gpa_ledger::models::CourseId;
use gpa_ledger::store::{snapshot, KeyValueStore, MemoryStore, StoreError, COURSE_LIST_KEY};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Store whose reads or writes can be made to fail
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_reads: bool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable("read refused".to_string()));
        }
        self.inner.read(key).await
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("disk full".to_string()));
        }
        self.inner.write(key, value).await
    }
}

fn approx(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < 1e-9)
}

async fn fresh() -> (Arc<MemoryStore>, Ledger) {
    let store = Arc::new(MemoryStore::new());
    let ledger = Ledger::initialize(store.clone()).await;
    (store, ledger)
}

#[tokio::test]
async fn scenario_add_add_delete() {
    let (store, mut ledger) = fresh().await;

    let algebra = ledger.add_course("Algebra", "3", "4").unwrap();
    let history = ledger.add_course("History", "2", "3").unwrap();
    history.write.settled().await.unwrap();

    let names: Vec<&str> = ledger.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Algebra", "History"]);
    assert!(approx(ledger.gpa().value(), 3.6));

    let deleted = ledger.delete_course(algebra.record.id);
    assert_eq!(deleted.removed.as_ref().map(|r| r.name.as_str()), Some("Algebra"));
    deleted.write.settled().await.unwrap();

    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.records()[0].name, "History");
    assert!(approx(ledger.gpa().value(), 3.0));

    let stored = snapshot::decode(&store.get(COURSE_LIST_KEY).await.unwrap()).unwrap();
    assert_eq!(stored, ledger.records());
}

#[tokio::test]
async fn gpa_of_weighted_pair() {
    let (_store, mut ledger) = fresh().await;
    ledger.add_course("Physics", "3", "4").unwrap();
    ledger.add_course("Lab", "1", "2").unwrap();
    assert!(approx(ledger.gpa().value(), 3.5));
}

#[tokio::test]
async fn empty_ledger_gpa_falls_back() {
    let (_store, mut ledger) = fresh().await;
    assert!(!ledger.gpa().is_defined());
    assert_eq!(ledger.gpa().to_string(), "0");

    let added = ledger.add_course("Algebra", "3", "4").unwrap();
    ledger.delete_course(added.record.id);
    assert!(!ledger.gpa().is_defined());
    assert_eq!(ledger.gpa().to_string(), "0");
}

#[tokio::test]
async fn ids_unique_across_adds_and_deletes() {
    let (_store, mut ledger) = fresh().await;
    let mut seen = HashSet::new();

    for round in 0..50 {
        let added = ledger.add_course(&format!("Course {round}"), "1", "3").unwrap();
        assert!(seen.insert(added.record.id), "id reused: {}", added.record.id);
        if round % 3 == 0 {
            ledger.delete_course(added.record.id);
        }
    }

    let live: HashSet<CourseId> = ledger.records().iter().map(|r| r.id).collect();
    assert_eq!(live.len(), ledger.len());
}

#[tokio::test]
async fn empty_name_is_rejected_without_mutation() {
    let (store, mut ledger) = fresh().await;
    ledger.add_course("Algebra", "3", "4").unwrap().write.settled().await.unwrap();
    let before = store.get(COURSE_LIST_KEY).await;

    let err = ledger.add_course("", "3", "4").unwrap_err();
    assert_eq!(err, ValidationError::MissingName);
    assert_eq!(err.field(), Field::Course);
    assert_eq!(ledger.len(), 1);
    assert_eq!(store.get(COURSE_LIST_KEY).await, before);
}

#[tokio::test]
async fn blank_looking_names_are_stored_as_typed() {
    let (_store, mut ledger) = fresh().await;

    let spaces = ledger.add_course("   ", "3", "4").unwrap();
    let padded = ledger.add_course(" Algebra ", "2", "3").unwrap();

    assert_eq!(spaces.record.name, "   ");
    assert_eq!(padded.record.name, " Algebra ");
    assert_eq!(ledger.len(), 2);
}

#[tokio::test]
async fn empty_credits_is_rejected_without_mutation() {
    let (_store, mut ledger) = fresh().await;

    let err = ledger.add_course("Algebra", "", "4").unwrap_err();
    assert_eq!(err, ValidationError::MissingCredits);
    assert_eq!(err.field(), Field::Credits);
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn empty_grade_is_rejected() {
    let (_store, mut ledger) = fresh().await;
    assert_eq!(
        ledger.add_course("Algebra", "3", "").unwrap_err(),
        ValidationError::MissingGrade
    );
}

#[tokio::test]
async fn leading_number_text_is_accepted() {
    let (_store, mut ledger) = fresh().await;
    let added = ledger.add_course("Algebra", "3abc", "3.5 (B+)").unwrap();
    assert!((added.record.credits - 3.0).abs() < f64::EPSILON);
    assert!((added.record.grade - 3.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn non_numeric_text_is_rejected() {
    let (_store, mut ledger) = fresh().await;
    assert_eq!(
        ledger.add_course("Algebra", "three", "4").unwrap_err(),
        ValidationError::NotANumber(Field::Credits)
    );
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn deleting_unknown_id_changes_nothing() {
    let (_store, mut ledger) = fresh().await;
    ledger.add_course("Algebra", "3", "4").unwrap();
    let before = ledger.records().to_vec();

    let deleted = ledger.delete_course(CourseId(42));
    assert!(deleted.removed.is_none());
    assert_eq!(ledger.records(), before.as_slice());
    deleted.write.settled().await.unwrap();
}

#[tokio::test]
async fn restart_restores_same_records() {
    let store = Arc::new(MemoryStore::new());
    let mut first = Ledger::initialize(store.clone()).await;
    first.add_course("Algebra", "3", "4").unwrap();
    first.add_course("Art", "1.5", "3.3").unwrap();
    let last = first.add_course("History", "2", "3").unwrap();
    last.write.settled().await.unwrap();
    let expected = first.records().to_vec();
    drop(first);

    let second = Ledger::initialize(store).await;
    assert!(matches!(second.origin(), LoadOrigin::Restored(3)));
    assert_eq!(second.records(), expected.as_slice());
    assert!(approx(second.gpa().value(), (12.0 + 4.95 + 6.0) / 6.5));
}

#[tokio::test]
async fn corrupt_snapshot_starts_empty() {
    let store = Arc::new(MemoryStore::with_value(COURSE_LIST_KEY, "{not json"));
    let mut ledger = Ledger::initialize(store.clone()).await;

    assert!(ledger.is_empty());
    assert!(matches!(
        ledger.origin(),
        LoadOrigin::Recovered(StoreError::Snapshot(_))
    ));

    // The next mutation replaces the corrupt snapshot
    ledger.add_course("Algebra", "3", "4").unwrap().write.settled().await.unwrap();
    let stored = snapshot::decode(&store.get(COURSE_LIST_KEY).await.unwrap()).unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn read_failure_starts_empty() {
    let store = Arc::new(FlakyStore {
        fail_reads: true,
        ..FlakyStore::default()
    });
    let ledger = Ledger::initialize(store).await;

    assert!(ledger.is_empty());
    assert!(matches!(
        ledger.origin(),
        LoadOrigin::Recovered(StoreError::Unavailable(_))
    ));
}

#[tokio::test]
async fn write_failure_keeps_memory_state() {
    let store = Arc::new(FlakyStore::default());
    store.fail_writes.store(true, Ordering::SeqCst);
    let mut ledger = Ledger::initialize(store.clone()).await;

    let added = ledger.add_course("Algebra", "3", "4").unwrap();
    assert!(matches!(
        added.write.settled().await,
        Err(StoreError::Unavailable(_))
    ));
    assert_eq!(ledger.len(), 1);
    assert!(store.inner.get(COURSE_LIST_KEY).await.is_none());

    // Recovery only happens through the next mutation's full snapshot
    store.fail_writes.store(false, Ordering::SeqCst);
    ledger
        .add_course("History", "2", "3")
        .unwrap()
        .write
        .settled()
        .await
        .unwrap();

    let stored = snapshot::decode(&store.inner.get(COURSE_LIST_KEY).await.unwrap()).unwrap();
    assert_eq!(stored, ledger.records());
    assert_eq!(store.writes.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn every_mutation_writes_once() {
    let store = Arc::new(FlakyStore::default());
    let mut ledger = Ledger::initialize(store.clone()).await;

    let added = ledger.add_course("Algebra", "3", "4").unwrap();
    let _ = ledger.add_course("", "3", "4");
    let deleted = ledger.delete_course(added.record.id);
    deleted.write.settled().await.unwrap();

    assert_eq!(store.writes.load(Ordering::SeqCst), 2);
    assert_eq!(store.inner.get(COURSE_LIST_KEY).await.as_deref(), Some("[]"));
}

#[tokio::test]
async fn form_clears_only_on_success() {
    let (_store, mut ledger) = fresh().await;
    let mut form = CourseForm::new();
    form.set(Field::Course, "Algebra");
    form.set(Field::Grade, "4");

    let err = form.submit(&mut ledger).unwrap_err();
    assert_eq!(err.field(), Field::Credits);
    assert_eq!(form.get(Field::Course), "Algebra");
    assert_eq!(form.get(Field::Grade), "4");

    form.set(err.field(), "3");
    let added = form.submit(&mut ledger).unwrap();
    assert_eq!(added.record.name, "Algebra");
    assert!(form.is_blank());
    assert_eq!(ledger.len(), 1);
}
