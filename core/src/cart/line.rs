// table_cart/src/cart/line.rs

use crate::model::{OrderLineRequest, Product};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One entry per distinct product in the cart.
///
/// `product` is the snapshot taken when the line was first added; it is not refreshed when
/// the catalog changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
  pub product: Product,
  pub quantity: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
}

impl CartLine {
  pub fn product_id(&self) -> &str {
    &self.product.id
  }

  /// `price * quantity`, or `None` when it does not fit in a `Decimal`.
  pub fn line_total(&self) -> Option<Decimal> {
    self.product.price.checked_mul(Decimal::from(self.quantity))
  }

  pub fn to_order_line(&self) -> OrderLineRequest {
    OrderLineRequest {
      product_id: self.product.id.clone(),
      quantity: self.quantity,
      notes: self.notes.clone(),
    }
  }
}

/// Persisted form of a cart: `{ "lines": [...] }`. The table is implied by the storage key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
  pub lines: Vec<CartLine>,
}

/// Empty or whitespace-only notes carry no information and are stored as `None`.
pub(crate) fn normalize_notes(notes: Option<&str>) -> Option<String> {
  notes.filter(|n| !n.trim().is_empty()).map(str::to_string)
}
