// table_cart/src/config.rs

use crate::error::{CartError, CartResult};
use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_KEY_PREFIX: &str = "table_cart:";

pub const KEY_PREFIX_VAR: &str = "TABLE_CART_KEY_PREFIX";
pub const STORAGE_DIR_VAR: &str = "TABLE_CART_STORAGE_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
  /// Prepended to the table id to form the snapshot key.
  pub storage_key_prefix: String,
  /// Directory for `FileKeyValueStore`; `None` keeps snapshots in memory only.
  pub storage_dir: Option<PathBuf>,
}

impl Default for CartConfig {
  fn default() -> Self {
    Self {
      storage_key_prefix: DEFAULT_KEY_PREFIX.to_string(),
      storage_dir: None,
    }
  }
}

impl CartConfig {
  pub fn from_env() -> CartResult<Self> {
    dotenv().ok(); // Load .env file if present

    let storage_key_prefix = env::var(KEY_PREFIX_VAR).unwrap_or_else(|_| DEFAULT_KEY_PREFIX.to_string());
    let storage_dir = env::var(STORAGE_DIR_VAR)
      .ok()
      .filter(|dir| !dir.trim().is_empty())
      .map(PathBuf::from);

    let config = Self {
      storage_key_prefix,
      storage_dir,
    };
    config.validate()?;

    tracing::info!(
      key_prefix = %config.storage_key_prefix,
      storage_dir = ?config.storage_dir,
      "Cart configuration loaded."
    );
    Ok(config)
  }

  pub fn validate(&self) -> CartResult<()> {
    if self.storage_key_prefix.trim().is_empty() {
      return Err(CartError::Config {
        key: KEY_PREFIX_VAR.to_string(),
        message: "prefix must not be empty".to_string(),
      });
    }
    Ok(())
  }

  pub fn storage_key(&self, table_id: &str) -> String {
    format!("{}{}", self.storage_key_prefix, table_id)
  }

  /// Builds the store this configuration selects.
  pub fn open_storage(&self) -> Arc<dyn KeyValueStore> {
    match &self.storage_dir {
      Some(dir) => Arc::new(FileKeyValueStore::new(dir.clone())),
      None => Arc::new(InMemoryKeyValueStore::new()),
    }
  }
}
