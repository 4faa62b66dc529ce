// table_cart/src/services/mod.rs

//! Narrow interfaces to the collaborators the cart consumes but does not own, each with an
//! in-memory implementation for tests and demos.

pub mod catalog;
pub mod orders;
pub mod tables;

pub use catalog::{categories, ingest_products, InMemoryCatalog, MenuFilter, ProductCatalog};
pub use orders::{InMemoryOrderBook, OrderSubmitter};
pub use tables::{InMemoryTableDirectory, TableResolver};
