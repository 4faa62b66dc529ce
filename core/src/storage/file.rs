// table_cart/src/storage/file.rs

use super::KeyValueStore;
use crate::error::StorageError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{event, Level};

/// Stores each key as one file under `root`.
///
/// Values are written to a sibling temp file and renamed into place, so a reader never sees
/// a partially written snapshot.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
  root: PathBuf,
}

impl FileKeyValueStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  fn path_for(&self, key: &str) -> PathBuf {
    self.root.join(format!("{}.json", file_name_for(key)))
  }
}

/// Maps an arbitrary key onto a portable file name. Anything outside `[A-Za-z0-9_-]` is
/// hex-escaped, so distinct keys never collide.
fn file_name_for(key: &str) -> String {
  let mut name = String::with_capacity(key.len());
  for byte in key.bytes() {
    if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
      name.push(byte as char);
    } else {
      name.push_str(&format!("%{:02X}", byte));
    }
  }
  name
}

fn unavailable(key: &str, source: std::io::Error) -> StorageError {
  StorageError::Unavailable {
    key: key.to_string(),
    source,
  }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
  async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
    match tokio::fs::read_to_string(self.path_for(key)).await {
      Ok(value) => Ok(Some(value)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(unavailable(key, e)),
    }
  }

  async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
    tokio::fs::create_dir_all(&self.root)
      .await
      .map_err(|e| unavailable(key, e))?;

    let target = self.path_for(key);
    let tmp = target.with_extension("json.tmp");
    tokio::fs::write(&tmp, value.as_bytes())
      .await
      .map_err(|e| unavailable(key, e))?;
    tokio::fs::rename(&tmp, &target)
      .await
      .map_err(|e| unavailable(key, e))?;

    event!(Level::TRACE, key, path = %target.display(), "Value written.");
    Ok(())
  }

  async fn remove(&self, key: &str) -> Result<(), StorageError> {
    match tokio::fs::remove_file(self.path_for(key)).await {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(unavailable(key, e)),
    }
  }
}
