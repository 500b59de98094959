//! Background snapshot writer
//!
//! Every ledger mutation hands a full snapshot to a single writer task. The
//! task applies writes one at a time in the order they were queued, so the
//! store never sees two concurrent writes and the last queued snapshot is
//! the one left in the store. Callers get a [`PendingWrite`] back and may
//! await it or drop it.

use super::{KeyValueStore, StoreError};
use crate::{debug, error};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

type WriteResult = Result<(), StoreError>;

struct WriteRequest {
    payload: String,
    done: oneshot::Sender<WriteResult>,
}

/// Handle to a queued snapshot write.
///
/// Dropping the handle does not cancel the write.
#[derive(Debug)]
pub struct PendingWrite {
    rx: oneshot::Receiver<WriteResult>,
}

impl PendingWrite {
    /// A write that failed before it could be queued
    #[must_use]
    pub fn failed(err: StoreError) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(Err(err));
        Self { rx }
    }

    /// Wait until the store has applied (or rejected) this write.
    ///
    /// # Errors
    /// Returns the store's write error, or [`StoreError::WriterClosed`] if the
    /// writer task went away before acknowledging
    pub async fn settled(self) -> WriteResult {
        self.rx.await.unwrap_or(Err(StoreError::WriterClosed))
    }
}

/// Queue in front of the writer task for one store key
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    tx: mpsc::UnboundedSender<WriteRequest>,
}

impl SnapshotWriter {
    /// Spawn the writer task for `key` on the current tokio runtime.
    ///
    /// The task exits once every `SnapshotWriter` clone is dropped and the
    /// queue has drained.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime
    #[must_use]
    pub fn spawn(store: Arc<dyn KeyValueStore>, key: &str) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<WriteRequest>();
        let key = key.to_string();

        tokio::spawn(async move {
            while let Some(request) = rx.recv().await {
                let result = store.write(&key, &request.payload).await;
                match &result {
                    Ok(()) => debug!("Snapshot written to '{key}' ({} bytes)", request.payload.len()),
                    Err(e) => error!("Snapshot write failed: {e}"),
                }
                let _ = request.done.send(result);
            }
        });

        Self { tx }
    }

    /// Queue a snapshot for writing
    pub fn submit(&self, payload: String) -> PendingWrite {
        let (done, rx) = oneshot::channel();
        if let Err(mpsc::error::SendError(request)) = self.tx.send(WriteRequest { payload, done }) {
            error!("Snapshot writer is closed; dropping write");
            let _ = request.done.send(Err(StoreError::WriterClosed));
        }
        PendingWrite { rx }
    }
}
