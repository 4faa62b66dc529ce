// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use rust_decimal::Decimal;
use std::sync::Arc;
use table_cart::{
  CartConfig, CategoryRef, InMemoryKeyValueStore, InMemoryTableDirectory, KeyValueStore, Product, TableCartStore, Table,
  TableStatus,
};
use tracing::Level;

// --- Common fixtures ---
pub fn pratos() -> CategoryRef {
  CategoryRef {
    id: "c1".to_string(),
    name: "Pratos".to_string(),
  }
}

pub fn bebidas() -> CategoryRef {
  CategoryRef {
    id: "c2".to_string(),
    name: "Bebidas".to_string(),
  }
}

pub fn product(id: &str, price: Decimal) -> Product {
  Product::new(id, format!("Product {}", id), price, pratos())
}

pub fn menu() -> Vec<Product> {
  vec![
    Product::new("p1", "Feijoada", Decimal::new(1000, 2), pratos()),
    Product::new("p2", "Moqueca", Decimal::new(1250, 2), pratos()),
    Product::new("p3", "Guarana", Decimal::new(600, 2), bebidas()),
  ]
}

pub fn table(id: &str, numero: u32) -> Table {
  Table::new(id, numero, TableStatus::Active)
}

pub fn directory() -> InMemoryTableDirectory {
  InMemoryTableDirectory::new()
    .with_table("qr-mesa-1", table("mesa-1", 1))
    .with_table("qr-mesa-2", table("mesa-2", 2))
    .with_table("qr-mesa-9", Table::new("mesa-9", 9, TableStatus::Inactive))
}

/// A store over `storage` with the default key prefix.
pub fn store_over(storage: &InMemoryKeyValueStore) -> TableCartStore {
  let storage: Arc<dyn KeyValueStore> = Arc::new(storage.clone());
  TableCartStore::new(storage, CartConfig::default())
}

pub fn key_for(table_id: &str) -> String {
  CartConfig::default().storage_key(table_id)
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
