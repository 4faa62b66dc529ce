// table_cart/examples/table_session.rs

use table_cart::{
  ingest_products, CartConfig, CartResult, InMemoryOrderBook, InMemoryTableDirectory, MenuFilter, OrderingSession, Table,
  TableCartStore, TableStatus,
};
use tracing::info;

const MENU: &str = r#"[
  {"id":"p1","name":"Feijoada","price":"42.90","category":{"id":"c1","name":"Pratos"}},
  {"id":"p2","name":"Moqueca","price":"55.00","category":{"id":"c1","name":"Pratos"}},
  {"id":"p3","name":"Suco de Caju","price":9.5,"category":{"id":"c2","name":"Bebidas"}}
]"#;

#[tokio::main]
async fn main() -> CartResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Table Session Example ---");

  // Set TABLE_CART_STORAGE_DIR to keep the cart across runs.
  let config = CartConfig::from_env()?;
  let store = TableCartStore::new(config.open_storage(), config.clone());

  let tables = InMemoryTableDirectory::new().with_table("qr-0007", Table::new("mesa-7", 7, TableStatus::Active));
  let products = ingest_products(MENU)?;
  let orders = InMemoryOrderBook::new(&products);

  let mut session = OrderingSession::open(&tables, store, "qr-0007").await?;
  info!(table = session.table().numero, restored_lines = session.cart().lines().len(), "Session open.");

  for product in MenuFilter::new("").in_category("c1").apply(&products) {
    session.add_item(product.clone(), 1, None)?;
  }
  if let Some(drink) = MenuFilter::new("caju").apply(&products).first() {
    session.add_item((*drink).clone(), 2, Some("sem acucar"))?;
  }
  session.set_quantity("p2", 2)?;

  info!(
    items = session.cart().total_quantity(),
    subtotal = %session.cart().subtotal(),
    "Cart ready."
  );

  let order = session.checkout(&orders).await?;
  info!(order_id = %order.id, total = %order.total, "Order placed.");

  session.close().await;
  Ok(())
}
