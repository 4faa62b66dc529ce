// table_cart/src/lib.rs

//! table_cart: the per-table cart behind a restaurant's QR-code ordering flow.
//!
//! A scanned code resolves to a table, the cart is bound to that table and hydrated from
//! local storage, the guest adds and edits lines, and the cart is submitted as an order.
//!  - One line per product, insertion order preserved, quantities always >= 1.
//!  - Totals are derived on every read; prices are exact decimals.
//!  - Every mutation is mirrored to a local key-value store under a per-table key,
//!    serialized so the last mutation's snapshot always wins.
//!  - Storage failures are logged and never surface; the in-memory cart is authoritative.
//!  - Catalog, table resolution and order submission are narrow async traits.

pub mod cart;
pub mod config;
pub mod error;
pub mod model;
pub mod services;
pub mod session;
pub mod storage;

// --- Re-exports for the Public API ---

pub use crate::cart::{CartHandle, CartLine, CartSnapshot, CartState, TableCartStore};
pub use crate::config::CartConfig;
pub use crate::error::{CartError, CartResult, StorageError, UpstreamError};
pub use crate::model::{CategoryRef, Order, OrderLineRequest, OrderRequest, OrderStatus, Product, Table, TableStatus};
pub use crate::services::{
  categories, ingest_products, InMemoryCatalog, InMemoryOrderBook, InMemoryTableDirectory, MenuFilter, OrderSubmitter,
  ProductCatalog, TableResolver,
};
pub use crate::session::OrderingSession;
pub use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};

/*
    Typical flow:
    1. Load a `CartConfig` (or use the default) and open its storage.
    2. Create a `TableCartStore` inside a tokio runtime.
    3. `OrderingSession::open(&resolver, store, scan_code).await?` binds and hydrates.
    4. Fetch the menu from a `ProductCatalog`, narrow it with `MenuFilter`.
    5. Mutate through the session (`add_item`, `set_quantity`, ...); observers hold a `CartHandle`.
    6. `session.checkout(&submitter).await` clears the cart only on success.
*/
