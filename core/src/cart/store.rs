// table_cart/src/cart/store.rs

//! `TableCartStore`: the authoritative in-memory cart for one bound table, mirrored to local
//! storage on every mutation.
//!
//! Durability is best-effort. Storage failures are logged and never roll back or reach
//! the caller. Mutating before `bind_table` is a broken caller contract and panics.

use super::handle::CartHandle;
use super::line::{CartLine, CartSnapshot};
use super::state::CartState;
use super::writer::SnapshotWriter;
use crate::config::CartConfig;
use crate::error::{CartError, CartResult};
use crate::model::{Order, OrderRequest, Product, Table};
use crate::services::OrderSubmitter;
use crate::storage::KeyValueStore;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{event, instrument, Level};

#[derive(Debug, Clone)]
struct Binding {
  table_id: String,
  key: String,
}

pub struct TableCartStore {
  config: CartConfig,
  storage: Arc<dyn KeyValueStore>,
  writer: SnapshotWriter,
  binding: Option<Binding>,
  cart: CartHandle,
}

impl TableCartStore {
  /// Creates an unbound, empty store.
  ///
  /// # Panics
  /// Must be called from within a tokio runtime; the snapshot writer is spawned here.
  pub fn new(storage: Arc<dyn KeyValueStore>, config: CartConfig) -> Self {
    let writer = SnapshotWriter::spawn(Arc::clone(&storage));
    Self {
      config,
      storage,
      writer,
      binding: None,
      cart: CartHandle::new(CartState::new()),
    }
  }

  pub fn table_id(&self) -> Option<&str> {
    self.binding.as_ref().map(|b| b.table_id.as_str())
  }

  /// Key the current table's snapshot lives under.
  pub fn storage_key(&self) -> Option<&str> {
    self.binding.as_ref().map(|b| b.key.as_str())
  }

  /// Read-only view that follows every later mutation.
  pub fn handle(&self) -> CartHandle {
    self.cart.clone()
  }

  /// Binds the store to `table` and hydrates its persisted cart.
  ///
  /// Rebinding to another table starts from that table's own snapshot (or empty); the
  /// previous table's lines are never carried over. Rebinding to the current table is a no-op.
  /// A missing or unreadable snapshot yields an empty cart and is only logged.
  ///
  /// The new binding and its hydrated lines are committed together after the last await. If
  /// this future is dropped early the store keeps its previous binding and lines.
  #[instrument(name = "TableCartStore::bind_table", skip_all, fields(table_id = %table.id))]
  pub async fn bind_table(&mut self, table: &Table) {
    if self.table_id() == Some(table.id.as_str()) {
      event!(Level::DEBUG, "Table already bound.");
      return;
    }

    let binding = Binding {
      table_id: table.id.clone(),
      key: self.config.storage_key(&table.id),
    };

    // Earlier snapshots for this key may still be queued from a previous binding.
    self.writer.flush().await;
    let hydrated = self.load_snapshot(&binding.key).await;

    let count = hydrated.lines().len();
    *self.cart.write() = hydrated;
    event!(Level::INFO, key = %binding.key, lines = count, "Table bound.");
    self.binding = Some(binding);
  }

  async fn load_snapshot(&self, key: &str) -> CartState {
    let raw = match self.storage.get(key).await {
      Ok(Some(raw)) => raw,
      Ok(None) => {
        event!(Level::DEBUG, key, "No persisted cart; starting empty.");
        return CartState::new();
      }
      Err(e) => {
        event!(Level::WARN, key, error = %e, "Failed to read persisted cart; starting empty.");
        return CartState::new();
      }
    };
    match serde_json::from_str::<CartSnapshot>(&raw) {
      Ok(snapshot) => CartState::from_snapshot(snapshot),
      Err(e) => {
        event!(Level::WARN, key, error = %e, "Persisted cart is unreadable; starting empty.");
        CartState::new()
      }
    }
  }

  fn bound(&self, operation: &str) -> &Binding {
    match &self.binding {
      Some(binding) => binding,
      None => panic!("TableCartStore::{} called before bind_table", operation),
    }
  }

  /// Applies `mutate` and schedules a snapshot of the result.
  fn mutate<R>(&mut self, operation: &str, mutate: impl FnOnce(&mut CartState) -> R) -> R {
    let key = self.bound(operation).key.clone();
    let (result, snapshot) = {
      let mut state = self.cart.write();
      let result = mutate(&mut *state);
      (result, state.to_snapshot())
    };
    self.writer.schedule(&key, &snapshot);
    result
  }

  /// Like `mutate`, but a rejected mutation leaves the cart as it was and persists nothing.
  fn try_mutate<R>(
    &mut self,
    operation: &str,
    mutate: impl FnOnce(&mut CartState) -> CartResult<R>,
  ) -> CartResult<R> {
    let key = self.bound(operation).key.clone();
    let (result, snapshot) = {
      let mut state = self.cart.write();
      let result = mutate(&mut *state)?;
      (result, state.to_snapshot())
    };
    self.writer.schedule(&key, &snapshot);
    Ok(result)
  }

  /// Adds `quantity` units of `product` (merging into an existing line), with optional notes.
  ///
  /// A zero quantity, or one that would overflow the line quantity or the cart total, is
  /// rejected and leaves the cart untouched.
  ///
  /// # Panics
  /// Panics when no table is bound.
  pub fn add_item(&mut self, product: Product, quantity: u32, notes: Option<&str>) -> CartResult<()> {
    self.bound("add_item");
    if quantity == 0 {
      event!(Level::WARN, product_id = %product.id, "Rejected add with zero quantity.");
      return Err(CartError::Validation("Quantity must be a positive number.".to_string()));
    }
    event!(Level::DEBUG, product_id = %product.id, quantity, "Adding item.");
    self.try_mutate("add_item", |state| state.add(product, quantity, notes))
  }

  /// Adds a single unit of `product`.
  ///
  /// # Panics
  /// Panics when no table is bound.
  pub fn add_one(&mut self, product: Product) -> CartResult<()> {
    self.add_item(product, 1, None)
  }

  /// Removes the line for `product_id`; absent lines are ignored.
  ///
  /// # Panics
  /// Panics when no table is bound.
  pub fn remove_item(&mut self, product_id: &str) {
    let removed = self.mutate("remove_item", |state| state.remove(product_id));
    event!(Level::DEBUG, product_id, removed, "Remove item.");
  }

  /// Sets the exact quantity; `quantity <= 0` removes the line. Quantities that do not fit
  /// are rejected and leave the line unchanged.
  ///
  /// # Panics
  /// Panics when no table is bound.
  pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> CartResult<()> {
    let changed = self.try_mutate("set_quantity", |state| state.set_quantity(product_id, quantity))?;
    event!(Level::DEBUG, product_id, quantity, changed, "Set quantity.");
    Ok(())
  }

  /// Overwrites the notes of an existing line.
  ///
  /// # Panics
  /// Panics when no table is bound.
  pub fn set_notes(&mut self, product_id: &str, notes: Option<&str>) {
    let changed = self.mutate("set_notes", |state| state.set_notes(product_id, notes));
    event!(Level::DEBUG, product_id, changed, "Set notes.");
  }

  /// Empties the cart; the table stays bound.
  ///
  /// # Panics
  /// Panics when no table is bound.
  pub fn clear(&mut self) {
    self.mutate("clear", CartState::clear);
  }

  pub fn lines(&self) -> Vec<CartLine> {
    self.cart.lines()
  }

  pub fn line(&self, product_id: &str) -> Option<CartLine> {
    self.cart.read().line(product_id).cloned()
  }

  pub fn is_empty(&self) -> bool {
    self.cart.read().is_empty()
  }

  pub fn total_quantity(&self) -> u64 {
    self.cart.total_quantity()
  }

  pub fn subtotal(&self) -> Decimal {
    self.cart.subtotal()
  }

  /// Waits until every snapshot scheduled so far has been written (or its failure logged).
  pub async fn flush(&self) {
    self.writer.flush().await;
  }

  /// Flattened order request for the bound table.
  ///
  /// # Panics
  /// Panics when no table is bound.
  pub fn order_request(&self) -> OrderRequest {
    let table_id = self.bound("order_request").table_id.clone();
    OrderRequest {
      table_id,
      items: self.cart.read().lines().iter().map(CartLine::to_order_line).collect(),
    }
  }

  /// Submits the cart as an order. On success the cart is cleared; on failure it is left
  /// exactly as it was so the submission can be retried.
  ///
  /// # Panics
  /// Panics when no table is bound.
  #[instrument(name = "TableCartStore::submit_order", skip_all, fields(table_id = ?self.table_id()), err(Display))]
  pub async fn submit_order(&mut self, submitter: &dyn OrderSubmitter) -> CartResult<Order> {
    let request = self.order_request();
    if request.items.is_empty() {
      return Err(CartError::Validation("Cannot submit an empty cart.".to_string()));
    }

    let order = submitter.submit(request).await.map_err(|e| {
      event!(Level::WARN, error = %e, "Order submission failed; cart kept for retry.");
      CartError::from(e)
    })?;

    self.clear();
    event!(Level::INFO, order_id = %order.id, "Order submitted; cart cleared.");
    Ok(order)
  }
}
