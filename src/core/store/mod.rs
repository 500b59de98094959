//! Persistent store adapter
//!
//! The ledger keeps one serialized snapshot of the whole course list under a
//! single key. Backends implement [`KeyValueStore`]; the ledger only ever sees
//! the trait object.

pub mod file;
pub mod memory;
pub mod snapshot;
pub mod sync;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use snapshot::SnapshotError;
pub use sync::{PendingWrite, SnapshotWriter};

/// Key under which the course list snapshot is stored
pub const COURSE_LIST_KEY: &str = "course-list";

/// Errors raised by store backends and the snapshot writer
#[derive(Debug, Error)]
pub enum StoreError {
    /// The stored snapshot could not be read from the backend
    #[error("failed to read '{key}' from store: {source}")]
    Read {
        /// Key being read
        key: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The snapshot could not be written to the backend
    #[error("failed to write '{key}' to store: {source}")]
    Write {
        /// Key being written
        key: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The stored value is not a valid snapshot
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// The backend refused the operation for a reason of its own
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The background writer stopped before acknowledging the write
    #[error("snapshot writer stopped before the write completed")]
    WriterClosed,
}

/// Asynchronous key-value text store.
///
/// `read` returns `Ok(None)` when nothing has been stored under `key` yet
/// (first run).
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read the value stored under `key`.
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
