// tests/cart_store_tests.rs
mod common;

use common::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serial_test::serial;
use table_cart::{
  CartError, InMemoryKeyValueStore, InMemoryOrderBook, OrderLineRequest, OrderRequest, OrderSubmitter, UpstreamError,
};

#[tokio::test]
#[serial]
async fn test_scenario_add_merge_then_zero_quantity() {
  setup_tracing();
  let mut cart = store_over(&InMemoryKeyValueStore::new());
  cart.bind_table(&table("mesa-1", 1)).await;

  cart.add_item(product("p1", dec!(10.00)), 2, None).unwrap();
  assert_eq!(cart.total_quantity(), 2);
  assert_eq!(cart.subtotal(), dec!(20.00));

  cart.add_item(product("p1", dec!(10.00)), 1, None).unwrap();
  assert_eq!(cart.total_quantity(), 3);
  assert_eq!(cart.lines().len(), 1);

  cart.set_quantity("p1", 0).unwrap();
  assert!(cart.lines().is_empty());
  assert_eq!(cart.subtotal(), dec!(0));
}

#[tokio::test]
#[serial]
async fn test_repeated_adds_sum_into_one_line() {
  setup_tracing();
  let mut cart = store_over(&InMemoryKeyValueStore::new());
  cart.bind_table(&table("mesa-1", 1)).await;

  let quantities = [1u32, 4, 2, 7];
  for q in quantities {
    cart.add_item(product("p1", dec!(3)), q, None).unwrap();
  }

  let lines = cart.lines();
  assert_eq!(lines.len(), 1);
  assert_eq!(lines[0].quantity, quantities.iter().sum::<u32>());
}

#[tokio::test]
#[serial]
async fn test_add_then_remove_leaves_no_line() {
  setup_tracing();
  let mut cart = store_over(&InMemoryKeyValueStore::new());
  cart.bind_table(&table("mesa-1", 1)).await;

  for n in [1u32, 5, 99] {
    cart.add_item(product("p1", dec!(1)), n, None).unwrap();
    cart.remove_item("p1");
    assert!(cart.line("p1").is_none());
  }
  // Removing an absent line is not an error.
  cart.remove_item("p1");
  assert!(cart.is_empty());
}

#[tokio::test]
#[serial]
async fn test_set_quantity_zero_matches_remove() {
  setup_tracing();
  let mut a = store_over(&InMemoryKeyValueStore::new());
  let mut b = store_over(&InMemoryKeyValueStore::new());
  a.bind_table(&table("mesa-1", 1)).await;
  b.bind_table(&table("mesa-1", 1)).await;

  for cart in [&mut a, &mut b] {
    cart.add_item(product("p1", dec!(2)), 2, None).unwrap();
    cart.add_item(product("p2", dec!(5)), 1, Some("sem gelo")).unwrap();
  }
  a.set_quantity("p1", 0).unwrap();
  b.remove_item("p1");

  assert_eq!(a.lines(), b.lines());
}

#[tokio::test]
#[serial]
async fn test_subtotal_parses_decimal_string_prices() {
  setup_tracing();
  let mut cart = store_over(&InMemoryKeyValueStore::new());
  cart.bind_table(&table("mesa-1", 1)).await;

  let from_string: table_cart::Product = serde_json::from_value(serde_json::json!({
    "id": "p1",
    "name": "Moqueca",
    "price": "12.50",
    "category": { "id": "c1", "name": "Pratos" }
  }))
  .unwrap();
  let from_number: table_cart::Product = serde_json::from_value(serde_json::json!({
    "id": "p2",
    "name": "Guarana",
    "price": 6,
    "category": { "id": "c2", "name": "Bebidas" }
  }))
  .unwrap();

  cart.add_item(from_string, 3, None).unwrap();
  assert_eq!(cart.subtotal(), dec!(37.50));
  cart.add_item(from_number, 2, None).unwrap();
  assert_eq!(cart.subtotal(), dec!(49.50));
}

#[tokio::test]
#[serial]
async fn test_notes_are_kept_unless_replaced() {
  setup_tracing();
  let mut cart = store_over(&InMemoryKeyValueStore::new());
  cart.bind_table(&table("mesa-1", 1)).await;

  cart.add_item(product("p1", dec!(1)), 1, Some("sem cebola")).unwrap();
  cart.add_item(product("p1", dec!(1)), 1, Some("")).unwrap();
  assert_eq!(cart.line("p1").unwrap().notes.as_deref(), Some("sem cebola"));

  cart.set_notes("p1", Some("ao ponto"));
  assert_eq!(cart.line("p1").unwrap().notes.as_deref(), Some("ao ponto"));

  cart.set_notes("missing", Some("ignored"));
  assert!(cart.line("missing").is_none());
}

#[tokio::test]
#[serial]
async fn test_insertion_order_is_preserved() {
  setup_tracing();
  let mut cart = store_over(&InMemoryKeyValueStore::new());
  cart.bind_table(&table("mesa-1", 1)).await;

  cart.add_one(product("p3", dec!(1))).unwrap();
  cart.add_one(product("p1", dec!(1))).unwrap();
  cart.add_one(product("p2", dec!(1))).unwrap();
  cart.add_one(product("p3", dec!(1))).unwrap();

  let ids: Vec<_> = cart.lines().iter().map(|l| l.product.id.clone()).collect();
  assert_eq!(ids, vec!["p3", "p1", "p2"]);
}

#[tokio::test]
#[serial]
async fn test_zero_quantity_add_is_rejected() {
  setup_tracing();
  let mut cart = store_over(&InMemoryKeyValueStore::new());
  cart.bind_table(&table("mesa-1", 1)).await;

  let result = cart.add_item(product("p1", dec!(1)), 0, None);
  assert!(matches!(result, Err(CartError::Validation(_))));
  assert!(cart.is_empty());
}

#[tokio::test]
#[serial]
async fn test_clear_keeps_binding() {
  setup_tracing();
  let mut cart = store_over(&InMemoryKeyValueStore::new());
  cart.bind_table(&table("mesa-1", 1)).await;
  cart.add_one(product("p1", dec!(1))).unwrap();

  cart.clear();
  assert!(cart.is_empty());
  assert_eq!(cart.table_id(), Some("mesa-1"));
  cart.add_one(product("p2", dec!(1))).unwrap();
  assert_eq!(cart.total_quantity(), 1);
}

#[tokio::test]
#[should_panic(expected = "called before bind_table")]
async fn test_mutation_before_bind_panics() {
  let mut cart = store_over(&InMemoryKeyValueStore::new());
  cart.add_one(product("p1", dec!(1))).unwrap();
}

#[tokio::test]
#[should_panic(expected = "called before bind_table")]
async fn test_clear_before_bind_panics() {
  let mut cart = store_over(&InMemoryKeyValueStore::new());
  cart.clear();
}

#[tokio::test]
#[serial]
async fn test_handle_follows_mutations() {
  setup_tracing();
  let mut cart = store_over(&InMemoryKeyValueStore::new());
  cart.bind_table(&table("mesa-1", 1)).await;
  let badge = cart.handle();

  cart.add_item(product("p1", dec!(4.25)), 2, None).unwrap();
  assert_eq!(badge.total_quantity(), 2);
  assert_eq!(badge.subtotal(), dec!(8.50));
  assert_eq!(badge.map_lines().len(), 1);

  cart.remove_item("p1");
  assert_eq!(badge.total_quantity(), 0);
  assert!(badge.lines().is_empty());
}

fn banquet() -> table_cart::Product {
  product("p9", Decimal::from_i128_with_scale(10i128.pow(20), 0))
}

#[tokio::test]
#[serial]
async fn test_overflowing_total_is_rejected() {
  setup_tracing();
  let mut cart = store_over(&InMemoryKeyValueStore::new());
  cart.bind_table(&table("mesa-1", 1)).await;

  let result = cart.add_item(banquet(), 1_000_000_000, None);
  assert!(matches!(result, Err(CartError::Validation(_))));
  assert!(cart.is_empty());
  assert_eq!(cart.subtotal(), dec!(0));

  // Growing an existing line past the limit is refused the same way.
  cart.add_item(banquet(), 1, None).unwrap();
  cart.add_item(product("p1", dec!(2.50)), 2, None).unwrap();
  let result = cart.set_quantity("p9", 1_000_000_000);
  assert!(matches!(result, Err(CartError::Validation(_))));
  assert_eq!(cart.line("p9").unwrap().quantity, 1);
  assert_eq!(cart.subtotal(), banquet().price + dec!(5.00));
}

#[tokio::test]
#[serial]
async fn test_quantity_beyond_line_limit_is_rejected() {
  setup_tracing();
  let mut cart = store_over(&InMemoryKeyValueStore::new());
  cart.bind_table(&table("mesa-1", 1)).await;
  cart.add_item(product("p1", dec!(1)), 3, None).unwrap();

  let result = cart.set_quantity("p1", i64::from(u32::MAX) + 1);
  assert!(matches!(result, Err(CartError::Validation(_))));
  assert_eq!(cart.line("p1").unwrap().quantity, 3);

  cart.set_quantity("p1", i64::from(u32::MAX) - 1).unwrap();
  let result = cart.add_item(product("p1", dec!(1)), 2, None);
  assert!(matches!(result, Err(CartError::Validation(_))));
  assert_eq!(cart.total_quantity(), u64::from(u32::MAX) - 1);
}

#[tokio::test]
#[serial]
async fn test_order_book_rejects_overflowing_total() {
  setup_tracing();
  let orders = InMemoryOrderBook::new(&[banquet()]);
  let request = OrderRequest {
    table_id: "mesa-1".to_string(),
    items: vec![OrderLineRequest {
      product_id: "p9".to_string(),
      quantity: u32::MAX,
      notes: None,
    }],
  };

  let result = orders.submit(request).await;
  assert!(matches!(result, Err(UpstreamError::OrderRejected(_))));
  assert!(orders.submitted().is_empty());
}
