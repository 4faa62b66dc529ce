// table_cart/src/session.rs

//! One table-ordering session: from a scanned code to a submitted order.

use crate::cart::TableCartStore;
use crate::error::CartResult;
use crate::model::{Order, Product, Table};
use crate::services::{OrderSubmitter, TableResolver};
use tracing::{event, instrument, Level};

/// Owns the cart store for the table a scan code resolved to.
///
/// The store is never handed out mutably, so it stays bound to `table()` for the whole
/// session; mutations go through the session's own methods.
///
/// There is no session without a table: a failed resolution is returned from `open`.
pub struct OrderingSession {
  table: Table,
  cart: TableCartStore,
}

impl OrderingSession {
  /// Resolves `scan_code`, then binds and hydrates `cart` for the resolved table.
  #[instrument(name = "OrderingSession::open", skip(resolver, cart), err(Display))]
  pub async fn open(resolver: &dyn TableResolver, mut cart: TableCartStore, scan_code: &str) -> CartResult<Self> {
    let table = resolver.resolve(scan_code).await.map_err(|e| {
      event!(Level::WARN, error = %e, "Table resolution failed; session cannot start.");
      e
    })?;
    cart.bind_table(&table).await;
    event!(Level::INFO, table_id = %table.id, numero = table.numero, lines = cart.lines().len(), "Ordering session opened.");
    Ok(Self { table, cart })
  }

  pub fn table(&self) -> &Table {
    &self.table
  }

  pub fn cart(&self) -> &TableCartStore {
    &self.cart
  }

  /// Adds `quantity` units of `product` to this table's cart.
  pub fn add_item(&mut self, product: Product, quantity: u32, notes: Option<&str>) -> CartResult<()> {
    self.cart.add_item(product, quantity, notes)
  }

  pub fn add_one(&mut self, product: Product) -> CartResult<()> {
    self.cart.add_one(product)
  }

  pub fn remove_item(&mut self, product_id: &str) {
    self.cart.remove_item(product_id);
  }

  pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> CartResult<()> {
    self.cart.set_quantity(product_id, quantity)
  }

  pub fn set_notes(&mut self, product_id: &str, notes: Option<&str>) {
    self.cart.set_notes(product_id, notes);
  }

  pub fn clear(&mut self) {
    self.cart.clear();
  }

  /// Submits the cart. A failure leaves every line in place for a retry.
  pub async fn checkout(&mut self, submitter: &dyn OrderSubmitter) -> CartResult<Order> {
    self.cart.submit_order(submitter).await
  }

  /// Waits for pending snapshots and returns the store, still bound to this table.
  pub async fn close(self) -> TableCartStore {
    self.cart.flush().await;
    event!(Level::DEBUG, table_id = %self.table.id, "Ordering session closed.");
    self.cart
  }
}
