// table_cart/src/storage/memory.rs

use super::KeyValueStore;
use crate::error::StorageError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Inner {
  entries: Mutex<HashMap<String, String>>,
  fail_reads: AtomicBool,
  fail_writes: AtomicBool,
  writes: AtomicUsize,
}

/// Process-local store. Clones share the same entries, so a test can keep one clone to
/// inspect what the cart persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore(Arc<Inner>);

impl InMemoryKeyValueStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Makes every following `get` fail until switched off again.
  pub fn fail_reads(&self, fail: bool) {
    self.0.fail_reads.store(fail, Ordering::SeqCst);
  }

  /// Makes every following `set`/`remove` fail until switched off again.
  pub fn fail_writes(&self, fail: bool) {
    self.0.fail_writes.store(fail, Ordering::SeqCst);
  }

  /// Number of successful `set` calls so far.
  pub fn write_count(&self) -> usize {
    self.0.writes.load(Ordering::SeqCst)
  }

  /// Synchronous peek for assertions.
  pub fn raw(&self, key: &str) -> Option<String> {
    self.0.entries.lock().get(key).cloned()
  }

  /// Synchronous seed for hydration tests.
  pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
    self.0.entries.lock().insert(key.into(), value.into());
  }

  fn injected(key: &str, what: &str) -> StorageError {
    StorageError::Backend {
      key: key.to_string(),
      source: anyhow::anyhow!("injected {} failure", what),
    }
  }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
  async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
    if self.0.fail_reads.load(Ordering::SeqCst) {
      return Err(Self::injected(key, "read"));
    }
    Ok(self.0.entries.lock().get(key).cloned())
  }

  async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
    if self.0.fail_writes.load(Ordering::SeqCst) {
      return Err(Self::injected(key, "write"));
    }
    self.0.entries.lock().insert(key.to_string(), value);
    self.0.writes.fetch_add(1, Ordering::SeqCst);
    Ok(())
  }

  async fn remove(&self, key: &str) -> Result<(), StorageError> {
    if self.0.fail_writes.load(Ordering::SeqCst) {
      return Err(Self::injected(key, "write"));
    }
    self.0.entries.lock().remove(key);
    Ok(())
  }
}
