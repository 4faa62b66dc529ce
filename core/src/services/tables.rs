// table_cart/src/services/tables.rs

use crate::error::UpstreamError;
use crate::model::Table;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{event, Level};

/// Maps an opaque scan code to a table that can take orders.
#[async_trait]
pub trait TableResolver: Send + Sync {
  /// Fails with `TableNotFound` for unknown codes and `TableInactive` for tables that
  /// exist but are not accepting orders.
  async fn resolve(&self, scan_code: &str) -> Result<Table, UpstreamError>;
}

#[derive(Debug, Default)]
pub struct InMemoryTableDirectory {
  by_code: RwLock<HashMap<String, Table>>,
}

impl InMemoryTableDirectory {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_table(self, scan_code: impl Into<String>, table: Table) -> Self {
    self.insert(scan_code, table);
    self
  }

  pub fn insert(&self, scan_code: impl Into<String>, table: Table) {
    self.by_code.write().insert(scan_code.into(), table);
  }
}

#[async_trait]
impl TableResolver for InMemoryTableDirectory {
  async fn resolve(&self, scan_code: &str) -> Result<Table, UpstreamError> {
    let table = self.by_code.read().get(scan_code).cloned();
    match table {
      Some(table) if table.is_active() => Ok(table),
      Some(table) => {
        event!(Level::INFO, scan_code, table_id = %table.id, "Scanned table is inactive.");
        Err(UpstreamError::TableInactive {
          table_id: table.id,
          numero: table.numero,
        })
      }
      None => Err(UpstreamError::TableNotFound {
        scan_code: scan_code.to_string(),
      }),
    }
  }
}
