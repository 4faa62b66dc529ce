// table_cart/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Failures of the local key-value store. Always recovered inside the cart store
/// (logged, never surfaced), but returned as-is by `KeyValueStore` implementations.
#[derive(Debug, Error)]
pub enum StorageError {
  #[error("Storage unavailable for key '{key}': {source}")]
  Unavailable {
    key: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Storage backend failed for key '{key}'. Source: {source}")]
  Backend {
    key: String,
    #[source]
    source: AnyhowError,
  },
}

/// Failures of collaborators the cart does not own: catalog fetches, table resolution and
/// order submission. These propagate to the calling screen.
#[derive(Debug, Error)]
pub enum UpstreamError {
  #[error("No table matches scan code '{scan_code}'")]
  TableNotFound { scan_code: String },

  #[error("Table {numero} (id '{table_id}') is not accepting orders")]
  TableInactive { table_id: String, numero: u32 },

  #[error("Catalog payload is not a JSON array of rows: {source}")]
  CatalogPayload {
    #[source]
    source: serde_json::Error,
  },

  #[error("Unexpected catalog row shape at index {index}: {source}")]
  CatalogSchema {
    index: usize,
    #[source]
    source: serde_json::Error,
  },

  #[error("Order rejected: {0}")]
  OrderRejected(String),

  #[error("Upstream service '{service}' failed. Source: {source}")]
  Service {
    service: &'static str,
    #[source]
    source: AnyhowError,
  },
}

#[derive(Debug, Error)]
pub enum CartError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Upstream Error: {source}")]
  Upstream {
    #[from]
    source: UpstreamError,
  },

  #[error("Storage Error: {source}")]
  Storage {
    #[from]
    source: StorageError,
  },

  #[error("Snapshot serialization failed: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Configuration error for '{key}': {message}")]
  Config { key: String, message: String },
}

impl From<AnyhowError> for CartError {
  fn from(err: AnyhowError) -> Self {
    // Keep typed upstream failures when they were only boxed for transport.
    match err.downcast::<UpstreamError>() {
      Ok(upstream) => CartError::Upstream { source: upstream },
      Err(other) => CartError::Upstream {
        source: UpstreamError::Service {
          service: "unknown",
          source: other,
        },
      },
    }
  }
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
