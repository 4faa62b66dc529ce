// table_cart/src/services/catalog.rs

use crate::error::UpstreamError;
use crate::model::{CategoryRef, Product};
use async_trait::async_trait;
use tracing::{event, instrument, Level};

/// Read-only product source, fetched once per screen load.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
  async fn fetch_products(&self) -> Result<Vec<Product>, UpstreamError>;
}

/// Decodes a backend row array into products.
///
/// Rows must match the `Product` wire shape exactly; the first row that does not is
/// reported with its index and nothing is returned. A payload that is not an array at all
/// is reported as `CatalogPayload`.
#[instrument(name = "catalog::ingest_products", skip_all, err(Display))]
pub fn ingest_products(json: &str) -> Result<Vec<Product>, UpstreamError> {
  let rows: Vec<serde_json::Value> =
    serde_json::from_str(json).map_err(|source| UpstreamError::CatalogPayload { source })?;

  let products = rows
    .into_iter()
    .enumerate()
    .map(|(index, row)| serde_json::from_value::<Product>(row).map_err(|source| UpstreamError::CatalogSchema { index, source }))
    .collect::<Result<Vec<_>, _>>()?;

  event!(Level::DEBUG, count = products.len(), "Catalog rows ingested.");
  Ok(products)
}

/// Menu screen filter: name search plus optional category tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
  pub query: String,
  pub category_id: Option<String>,
}

impl MenuFilter {
  pub fn new(query: impl Into<String>) -> Self {
    Self {
      query: query.into(),
      category_id: None,
    }
  }

  pub fn in_category(mut self, category_id: impl Into<String>) -> Self {
    self.category_id = Some(category_id.into());
    self
  }

  pub fn matches(&self, product: &Product) -> bool {
    let query = self.query.trim().to_lowercase();
    let name_ok = query.is_empty() || product.name.to_lowercase().contains(&query);
    let category_ok = self
      .category_id
      .as_deref()
      .map_or(true, |id| product.category.id == id);
    name_ok && category_ok
  }

  /// Matching products in catalog order.
  pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
    products.iter().filter(|p| self.matches(p)).collect()
  }
}

/// Distinct categories in first-seen order.
pub fn categories(products: &[Product]) -> Vec<CategoryRef> {
  let mut seen: Vec<CategoryRef> = Vec::new();
  for product in products {
    if !seen.iter().any(|c| c.id == product.category.id) {
      seen.push(product.category.clone());
    }
  }
  seen
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
  products: Vec<Product>,
}

impl InMemoryCatalog {
  pub fn new(products: Vec<Product>) -> Self {
    Self { products }
  }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
  async fn fetch_products(&self) -> Result<Vec<Product>, UpstreamError> {
    Ok(self.products.clone())
  }
}
