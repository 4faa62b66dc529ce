// table_cart/src/storage/mod.rs

//! The local key-value store the cart mirrors itself into.

pub mod file;
pub mod memory;

use crate::error::StorageError;
use async_trait::async_trait;

pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;

/// Scoped, asynchronous string key-value storage living on the device.
///
/// Implementations need not apply timeouts; the store is assumed to be local.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
  async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

  async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

  async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
