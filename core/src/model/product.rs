// table_cart/src/model/product.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category reference embedded in every product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryRef {
  pub id: String,
  pub name: String,
}

/// A catalog product as delivered by the backend.
///
/// The wire shape is fixed: unknown or differently-cased fields are rejected at decode time.
/// `price` and `rating` accept either a JSON number or a decimal string (`"12.50"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Product {
  pub id: String,
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub price: Decimal,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image_url: Option<String>,
  pub category: CategoryRef,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rating: Option<Decimal>,
}

impl Product {
  /// Minimal product, mostly useful for tests and demos.
  pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal, category: CategoryRef) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      description: None,
      price,
      image_url: None,
      category,
      rating: None,
    }
  }
}
