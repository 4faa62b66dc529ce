// table_cart/src/cart/handle.rs
use super::line::CartLine;
use super::state::CartState;
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Shared view of a live cart.
///
/// The owning `TableCartStore` mutates through it; every clone observes those mutations
/// immediately. Only the store can take the write lock.
///
/// IMPORTANT: Lock guards obtained from this struct are blocking and MUST NOT
/// be held across `.await` suspension points in asynchronous code.
#[derive(Debug, Default)]
pub struct CartHandle(Arc<RwLock<CartState>>);

impl CartHandle {
  pub(crate) fn new(state: CartState) -> Self {
    CartHandle(Arc::new(RwLock::new(state)))
  }

  /// Acquires a read lock.
  /// The returned guard MUST be dropped before any `.await` point.
  pub fn read(&self) -> RwLockReadGuard<'_, CartState> {
    self.0.read()
  }

  pub(crate) fn write(&self) -> RwLockWriteGuard<'_, CartState> {
    self.0.write()
  }

  /// Borrows just the lines under a read lock.
  pub fn map_lines(&self) -> MappedRwLockReadGuard<'_, [CartLine]> {
    RwLockReadGuard::map(self.read(), |state| state.lines())
  }

  pub fn total_quantity(&self) -> u64 {
    self.read().total_quantity()
  }

  pub fn subtotal(&self) -> Decimal {
    self.read().subtotal()
  }

  pub fn lines(&self) -> Vec<CartLine> {
    self.read().lines().to_vec()
  }
}

impl Clone for CartHandle {
  fn clone(&self) -> Self {
    CartHandle(Arc::clone(&self.0))
  }
}
