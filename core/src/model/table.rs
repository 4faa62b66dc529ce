// table_cart/src/model/table.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
  Active,
  Inactive,
}

/// A physical table, as resolved from a scanned QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Table {
  pub id: String,
  pub numero: u32,
  pub status: TableStatus,
}

impl Table {
  pub fn new(id: impl Into<String>, numero: u32, status: TableStatus) -> Self {
    Self {
      id: id.into(),
      numero,
      status,
    }
  }

  pub fn is_active(&self) -> bool {
    self.status == TableStatus::Active
  }
}
