// table_cart/src/cart/mod.rs

//! The per-table cart: pure line bookkeeping (`state`), a shared read handle for observers
//! (`handle`), the serialized snapshot writer (`writer`) and the store that binds them to a
//! table and its storage key (`store`).

pub mod handle;
pub mod line;
pub mod state;
pub mod store;
mod writer;

pub use handle::CartHandle;
pub use line::{CartLine, CartSnapshot};
pub use state::CartState;
pub use store::TableCartStore;
