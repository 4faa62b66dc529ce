// table_cart/src/cart/writer.rs

//! Serializes snapshot writes through one background task.
//!
//! Snapshots are encoded when the mutation happens and queued in mutation order. The task
//! writes them strictly in that order, so an earlier snapshot can never land after a later
//! one. When several snapshots for the same key are waiting, only the newest is written.

use super::line::CartSnapshot;
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{event, Level};

enum WriterCommand {
  Persist { key: String, generation: u64, body: String },
  Flush(oneshot::Sender<()>),
}

pub(crate) struct SnapshotWriter {
  tx: mpsc::UnboundedSender<WriterCommand>,
  generation: u64,
  _task: JoinHandle<()>,
}

impl SnapshotWriter {
  /// Starts the writer task on the current tokio runtime.
  ///
  /// # Panics
  /// Panics when called outside a tokio runtime.
  pub(crate) fn spawn(storage: Arc<dyn KeyValueStore>) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run(storage, rx));
    Self {
      tx,
      generation: 0,
      _task: task,
    }
  }

  /// Queues `snapshot` for `key`. Never fails from the caller's point of view.
  pub(crate) fn schedule(&mut self, key: &str, snapshot: &CartSnapshot) {
    self.generation += 1;
    let generation = self.generation;
    let body = match serde_json::to_string(snapshot) {
      Ok(body) => body,
      Err(e) => {
        event!(Level::ERROR, key, generation, error = %e, "Failed to encode cart snapshot; not persisted.");
        return;
      }
    };
    let cmd = WriterCommand::Persist {
      key: key.to_string(),
      generation,
      body,
    };
    if self.tx.send(cmd).is_err() {
      event!(Level::ERROR, key, generation, "Snapshot writer is gone; snapshot dropped.");
    } else {
      event!(Level::TRACE, key, generation, "Snapshot queued.");
    }
  }

  /// Resolves once every snapshot queued before this call has been written or failed.
  pub(crate) async fn flush(&self) {
    let (ack_tx, ack_rx) = oneshot::channel();
    if self.tx.send(WriterCommand::Flush(ack_tx)).is_err() {
      return;
    }
    // A dropped ack means the task ended, which also means nothing is pending.
    let _ = ack_rx.await;
  }
}

async fn run(storage: Arc<dyn KeyValueStore>, mut rx: mpsc::UnboundedReceiver<WriterCommand>) {
  event!(Level::DEBUG, "Snapshot writer started.");
  while let Some(first) = rx.recv().await {
    let mut batch = vec![first];
    while let Ok(next) = rx.try_recv() {
      batch.push(next);
    }

    let mut pending: Vec<(String, u64, String)> = Vec::new();
    for cmd in batch {
      match cmd {
        WriterCommand::Persist { key, generation, body } => {
          match pending.iter_mut().find(|(k, _, _)| *k == key) {
            Some(slot) => {
              event!(Level::TRACE, key = %key, superseded = slot.1, generation, "Coalescing superseded snapshot.");
              *slot = (key, generation, body);
            }
            None => pending.push((key, generation, body)),
          }
        }
        WriterCommand::Flush(ack) => {
          write_all(storage.as_ref(), std::mem::take(&mut pending)).await;
          let _ = ack.send(());
        }
      }
    }
    write_all(storage.as_ref(), pending).await;
  }
  event!(Level::DEBUG, "Snapshot writer stopped.");
}

async fn write_all(storage: &dyn KeyValueStore, pending: Vec<(String, u64, String)>) {
  for (key, generation, body) in pending {
    match storage.set(&key, body).await {
      Ok(()) => event!(Level::DEBUG, key = %key, generation, "Cart snapshot persisted."),
      Err(e) => event!(Level::WARN, key = %key, generation, error = %e, "Cart snapshot not persisted; in-memory cart unaffected."),
    }
  }
}
