// table_cart/src/model/mod.rs

//! Records exchanged with the collaborators around the cart: catalog products,
//! resolved tables and submitted orders.

pub mod order;
pub mod product;
pub mod table;

pub use order::{Order, OrderLineRequest, OrderRequest, OrderStatus};
pub use product::{CategoryRef, Product};
pub use table::{Table, TableStatus};
