//! Course ledger
//!
//! Owns the ordered course list, validates new entries, keeps the GPA up to
//! date and mirrors every mutation to the store as a full snapshot.

pub mod form;
pub mod ids;
pub mod validation;

pub use form::CourseForm;
pub use ids::IdSource;
pub use validation::{parse_leading_number, validate, Field, ValidationError, DISMISS_LABEL};

use crate::core::models::{compute_gpa, CourseId, CourseRecord, Gpa};
use crate::core::store::{
    snapshot, KeyValueStore, PendingWrite, SnapshotWriter, StoreError, COURSE_LIST_KEY,
};
use crate::{debug, error, info};
use std::sync::Arc;

/// How the ledger's contents were obtained at startup
#[derive(Debug)]
pub enum LoadOrigin {
    /// Nothing was stored yet
    Fresh,
    /// A snapshot with this many records was restored
    Restored(usize),
    /// The stored snapshot could not be read or parsed; the ledger started empty
    Recovered(StoreError),
}

/// Result of a successful add
#[derive(Debug)]
pub struct Added {
    /// The record as stored in the ledger
    pub record: CourseRecord,
    /// Completion of the snapshot write triggered by the add
    pub write: PendingWrite,
}

/// Result of a delete
#[derive(Debug)]
pub struct Deleted {
    /// The removed record, or `None` if no record had the id
    pub removed: Option<CourseRecord>,
    /// Completion of the snapshot write triggered by the delete
    pub write: PendingWrite,
}

/// In-memory course list kept in sync with a [`KeyValueStore`]
#[derive(Debug)]
pub struct Ledger {
    records: Vec<CourseRecord>,
    gpa: Gpa,
    ids: IdSource,
    writer: SnapshotWriter,
    origin: LoadOrigin,
}

impl Ledger {
    /// Load the ledger from `store`.
    ///
    /// A missing snapshot yields an empty ledger. A snapshot that cannot be
    /// read or parsed is logged and also yields an empty ledger; it is never
    /// retried. Must be called inside a tokio runtime, since it starts the
    /// background snapshot writer.
    pub async fn initialize(store: Arc<dyn KeyValueStore>) -> Self {
        let (records, origin) = match load_snapshot(store.as_ref()).await {
            Ok(Some(records)) => {
                info!("Restored {} course(s) from store", records.len());
                let count = records.len();
                (records, LoadOrigin::Restored(count))
            }
            Ok(None) => {
                info!("No stored course list; starting empty");
                (Vec::new(), LoadOrigin::Fresh)
            }
            Err(e) => {
                error!("Invalid storage when reading course list: {e}");
                (Vec::new(), LoadOrigin::Recovered(e))
            }
        };

        let last_id = records.iter().map(|r| r.id.0).max().unwrap_or(0);
        let gpa = compute_gpa(&records);

        Self {
            records,
            gpa,
            ids: IdSource::starting_after(last_id),
            writer: SnapshotWriter::spawn(store, COURSE_LIST_KEY),
            origin,
        }
    }

    /// Validate and append a course.
    ///
    /// On success the record gets a fresh id, the GPA is recomputed and a
    /// snapshot write is queued.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] found; the ledger is unchanged
    pub fn add_course(
        &mut self,
        name: &str,
        credits_text: &str,
        grade_text: &str,
    ) -> Result<Added, ValidationError> {
        let entry = validate(name, credits_text, grade_text)?;
        let records = &self.records;
        let id = self.ids.next_id(|id| records.iter().any(|r| r.id == id));
        let record = CourseRecord::new(id, entry.name, entry.credits, entry.grade);
        debug!(
            "Adding course {} '{}' ({} credits, grade {})",
            record.id, record.name, record.credits, record.grade
        );

        self.records.push(record.clone());
        self.gpa = compute_gpa(&self.records);
        let write = self.persist();

        Ok(Added { record, write })
    }

    /// Remove the course with `id`. An unknown id is not an error.
    ///
    /// A snapshot write is queued either way.
    pub fn delete_course(&mut self, id: CourseId) -> Deleted {
        let removed = self
            .records
            .iter()
            .position(|r| r.id == id)
            .map(|idx| self.records.remove(idx));

        match &removed {
            Some(record) => debug!("Deleted course {} '{}'", record.id, record.name),
            None => debug!("Delete requested for unknown course id {id}"),
        }

        self.gpa = compute_gpa(&self.records);
        let write = self.persist();

        Deleted { removed, write }
    }

    /// Current GPA
    #[must_use]
    pub const fn gpa(&self) -> Gpa {
        self.gpa
    }

    /// Records in display order
    #[must_use]
    pub fn records(&self) -> &[CourseRecord] {
        &self.records
    }

    /// Look up a record by id
    #[must_use]
    pub fn get(&self, id: CourseId) -> Option<&CourseRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// How the ledger was populated at startup
    #[must_use]
    pub const fn origin(&self) -> &LoadOrigin {
        &self.origin
    }

    fn persist(&self) -> PendingWrite {
        match snapshot::encode(&self.records) {
            Ok(payload) => self.writer.submit(payload),
            Err(e) => {
                error!("Failed to encode course list snapshot: {e}");
                PendingWrite::failed(e.into())
            }
        }
    }
}

async fn load_snapshot(
    store: &dyn KeyValueStore,
) -> Result<Option<Vec<CourseRecord>>, StoreError> {
    match store.read(COURSE_LIST_KEY).await? {
        Some(text) => Ok(Some(snapshot::decode(&text)?)),
        None => Ok(None),
    }
}
