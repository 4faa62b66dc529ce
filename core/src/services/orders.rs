// table_cart/src/services/orders.rs

use crate::error::UpstreamError;
use crate::model::{Order, OrderRequest, OrderStatus, Product};
use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{event, Level};
use uuid::Uuid;

/// Accepts a flattened cart for a table and creates an order.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
  async fn submit(&self, request: OrderRequest) -> Result<Order, UpstreamError>;
}

/// Order endpoint stand-in. Prices come from the products it was seeded with, the way the
/// backend prices orders from its own catalog rather than from client-side snapshots.
#[derive(Debug, Default)]
pub struct InMemoryOrderBook {
  prices: HashMap<String, Decimal>,
  orders: Mutex<Vec<(OrderRequest, Order)>>,
  unavailable: AtomicBool,
}

impl InMemoryOrderBook {
  pub fn new(catalog: &[Product]) -> Self {
    Self {
      prices: catalog.iter().map(|p| (p.id.clone(), p.price)).collect(),
      ..Self::default()
    }
  }

  /// While set, every submission fails as if the endpoint were down.
  pub fn set_unavailable(&self, unavailable: bool) {
    self.unavailable.store(unavailable, Ordering::SeqCst);
  }

  pub fn submitted(&self) -> Vec<(OrderRequest, Order)> {
    self.orders.lock().clone()
  }
}

#[async_trait]
impl OrderSubmitter for InMemoryOrderBook {
  async fn submit(&self, request: OrderRequest) -> Result<Order, UpstreamError> {
    if self.unavailable.load(Ordering::SeqCst) {
      return Err(UpstreamError::Service {
        service: "orders",
        source: anyhow::anyhow!("order endpoint unavailable"),
      });
    }
    if request.items.is_empty() {
      return Err(UpstreamError::OrderRejected("order has no items".to_string()));
    }

    let mut total = Decimal::ZERO;
    for item in &request.items {
      let price = self
        .prices
        .get(&item.product_id)
        .ok_or_else(|| UpstreamError::OrderRejected(format!("unknown product '{}'", item.product_id)))?;
      total = price
        .checked_mul(Decimal::from(item.quantity))
        .and_then(|line_total| total.checked_add(line_total))
        .ok_or_else(|| UpstreamError::OrderRejected("order total is too large".to_string()))?;
    }

    let order = Order {
      id: Uuid::new_v4().to_string(),
      table_id: request.table_id.clone(),
      status: OrderStatus::Pending,
      total,
      created_at: chrono::Utc::now(),
    };
    event!(Level::INFO, order_id = %order.id, table_id = %order.table_id, total = %order.total, "Order accepted.");
    self.orders.lock().push((request, order.clone()));
    Ok(order)
  }
}
