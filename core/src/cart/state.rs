// table_cart/src/cart/state.rs

//! Line bookkeeping without any I/O. Every method keeps the invariants: one line per
//! product id, `quantity >= 1`, insertion order preserved, and a subtotal that fits in a
//! `Decimal`.

use super::line::{normalize_notes, CartLine, CartSnapshot};
use crate::error::{CartError, CartResult};
use crate::model::Product;
use rust_decimal::Decimal;
use tracing::{event, Level};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
  lines: Vec<CartLine>,
}

impl CartState {
  pub fn new() -> Self {
    Self::default()
  }

  /// Rebuilds a cart from a persisted snapshot, folding it through `add` so a damaged
  /// snapshot (duplicate ids, zero quantities) still yields a valid cart.
  pub fn from_snapshot(snapshot: CartSnapshot) -> Self {
    let mut state = Self::new();
    for line in snapshot.lines {
      if line.quantity == 0 {
        event!(Level::WARN, product_id = %line.product.id, "Dropping zero-quantity line from snapshot.");
        continue;
      }
      let product_id = line.product.id.clone();
      if let Err(e) = state.add(line.product, line.quantity, line.notes.as_deref()) {
        event!(Level::WARN, product_id = %product_id, error = %e, "Dropping unrepresentable line from snapshot.");
      }
    }
    state
  }

  pub fn to_snapshot(&self) -> CartSnapshot {
    CartSnapshot {
      lines: self.lines.clone(),
    }
  }

  pub fn lines(&self) -> &[CartLine] {
    &self.lines
  }

  pub fn line(&self, product_id: &str) -> Option<&CartLine> {
    self.lines.iter().find(|l| l.product.id == product_id)
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  fn position(&self, product_id: &str) -> Option<usize> {
    self.lines.iter().position(|l| l.product.id == product_id)
  }

  /// Adds `quantity` units of `product`. Callers guarantee `quantity >= 1`.
  ///
  /// An existing line keeps its position and product snapshot; its notes are replaced only
  /// when `notes` carries text.
  pub fn add(&mut self, product: Product, quantity: u32, notes: Option<&str>) -> CartResult<()> {
    debug_assert!(quantity >= 1);
    let notes = normalize_notes(notes);
    match self.position(&product.id) {
      Some(idx) => {
        let line = &self.lines[idx];
        let new_quantity = line
          .quantity
          .checked_add(quantity)
          .ok_or_else(|| quantity_too_large(&product.id))?;
        self.ensure_fits(idx, line.product.price, new_quantity)?;

        let line = &mut self.lines[idx];
        line.quantity = new_quantity;
        if notes.is_some() {
          line.notes = notes;
        }
      }
      None => {
        self.ensure_fits(self.lines.len(), product.price, quantity)?;
        self.lines.push(CartLine {
          product,
          quantity,
          notes,
        });
      }
    }
    Ok(())
  }

  /// Checks that the subtotal still fits once the line at `idx` (or a new line when
  /// `idx == len`) holds `quantity` units at `price`.
  fn ensure_fits(&self, idx: usize, price: Decimal, quantity: u32) -> CartResult<()> {
    let others = self
      .lines
      .iter()
      .enumerate()
      .filter(|(i, _)| *i != idx)
      .map(|(_, line)| line);
    price
      .checked_mul(Decimal::from(quantity))
      .and_then(|line_total| checked_sum(others).and_then(|rest| rest.checked_add(line_total)))
      .map(|_| ())
      .ok_or_else(|| CartError::Validation("Cart total is too large.".to_string()))
  }

  /// Returns whether a line was removed.
  pub fn remove(&mut self, product_id: &str) -> bool {
    match self.position(product_id) {
      Some(idx) => {
        self.lines.remove(idx);
        true
      }
      None => false,
    }
  }

  /// Sets the exact quantity; `quantity <= 0` removes the line. Returns whether the cart changed.
  ///
  /// Quantities beyond `u32::MAX`, or that would overflow the subtotal, are rejected and leave
  /// the line as it was.
  pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> CartResult<bool> {
    if quantity <= 0 {
      return Ok(self.remove(product_id));
    }
    let quantity = u32::try_from(quantity).map_err(|_| quantity_too_large(product_id))?;
    match self.position(product_id) {
      Some(idx) if self.lines[idx].quantity != quantity => {
        self.ensure_fits(idx, self.lines[idx].product.price, quantity)?;
        self.lines[idx].quantity = quantity;
        Ok(true)
      }
      _ => Ok(false),
    }
  }

  /// Overwrites notes; empty text clears them. Returns whether the cart changed.
  pub fn set_notes(&mut self, product_id: &str, notes: Option<&str>) -> bool {
    let notes = normalize_notes(notes);
    match self.position(product_id) {
      Some(idx) if self.lines[idx].notes != notes => {
        self.lines[idx].notes = notes;
        true
      }
      _ => false,
    }
  }

  pub fn clear(&mut self) -> bool {
    let changed = !self.lines.is_empty();
    self.lines.clear();
    changed
  }

  pub fn total_quantity(&self) -> u64 {
    self.lines.iter().map(|l| u64::from(l.quantity)).sum()
  }

  pub fn subtotal(&self) -> Decimal {
    // Never None: `add` and `set_quantity` refuse any change that would overflow.
    checked_sum(self.lines.iter()).unwrap_or(Decimal::MAX)
  }
}

fn checked_sum<'a>(lines: impl Iterator<Item = &'a CartLine>) -> Option<Decimal> {
  lines.fold(Some(Decimal::ZERO), |acc, line| acc?.checked_add(line.line_total()?))
}

fn quantity_too_large(product_id: &str) -> CartError {
  event!(Level::WARN, product_id, "Rejected quantity beyond the supported range.");
  CartError::Validation(format!("Quantity for product '{}' is too large.", product_id))
}
