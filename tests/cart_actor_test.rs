mod common;

use actor_framework::{FileStore, KeyValueStore};
use common::{line_item, pizza, soda, SwitchableStore};
use foodsaas::cart_actor::{self, CartError, CART_NAMESPACE};
use foodsaas::model::CartLineItem;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

#[tokio::test]
async fn test_cross_restaurant_add_leaves_cart_unchanged() {
    let (actor, client) = cart_actor::new(8);
    tokio::spawn(actor.run(()));
    client.open().await.unwrap();

    client.add_item(pizza()).await.unwrap();
    let before = client.snapshot().await.unwrap();

    let sushi = line_item("item-2", "Sushi", 3200, "rest-2");
    let result = client.add_item(sushi).await;
    assert_eq!(
        result,
        Err(CartError::InvariantViolation {
            expected: "rest-1".to_string(),
            found: "rest-2".to_string(),
        })
    );
    assert_eq!(client.snapshot().await.unwrap(), before);
}

#[tokio::test]
async fn test_negative_price_rejected() {
    let (actor, client) = cart_actor::new(8);
    tokio::spawn(actor.run(()));
    client.open().await.unwrap();
    client.add_item(pizza()).await.unwrap();

    let result = client.add_item(line_item("x", "Refund", -5000, "rest-1")).await;
    assert_eq!(
        result,
        Err(CartError::NegativePrice {
            item_id: "x".to_string(),
            price: Decimal::new(-5000, 2),
        })
    );
    assert_eq!(client.snapshot().await.unwrap().items, vec![pizza()]);
    assert_eq!(client.subtotal().await.unwrap(), Decimal::new(4590, 2));
}

#[tokio::test]
async fn test_remove_out_of_range() {
    let (actor, client) = cart_actor::new(8);
    tokio::spawn(actor.run(()));
    client.open().await.unwrap();
    client.add_item(pizza()).await.unwrap();

    assert_eq!(
        client.remove_item(1).await,
        Err(CartError::OutOfRange { position: 1, len: 1 })
    );
    assert_eq!(client.remove_item(0).await.unwrap(), pizza());
    assert!(client.snapshot().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cart_survives_restart_on_file_store() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
        let (actor, client) = cart_actor::journaled(8, store).unwrap();
        let handle = tokio::spawn(actor.run(()));
        client.open().await.unwrap();
        client.add_item(pizza()).await.unwrap();
        client.add_item(soda()).await.unwrap();
        assert_eq!(client.subtotal().await.unwrap(), Decimal::new(5190, 2));
        drop(client);
        handle.await.unwrap();
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
    let (actor, client) = cart_actor::journaled(8, store).unwrap();
    tokio::spawn(actor.run(()));

    let cart = client.open().await.unwrap();
    assert_eq!(cart.items, vec![pizza(), soda()]);
    assert_eq!(client.subtotal().await.unwrap(), Decimal::new(5190, 2));
    assert!(dir.path().join(format!("{CART_NAMESPACE}.json")).exists());
}

#[tokio::test]
async fn test_refused_write_does_not_mutate_cart() {
    let store = Arc::new(SwitchableStore::default());
    let (actor, client) = cart_actor::journaled(8, store.clone()).unwrap();
    tokio::spawn(actor.run(()));
    client.open().await.unwrap();
    client.add_item(pizza()).await.unwrap();

    store.refuse_writes(true);
    assert!(matches!(
        client.add_item(soda()).await,
        Err(CartError::Persistence(_))
    ));
    assert!(matches!(client.clear().await, Err(CartError::Persistence(_))));

    // Reads skip the journal and see the last committed cart.
    let cart = client.snapshot().await.unwrap();
    assert_eq!(cart.items, vec![pizza()]);
    assert_eq!(client.subtotal().await.unwrap(), Decimal::new(4590, 2));

    store.refuse_writes(false);
    client.add_item(soda()).await.unwrap();
    assert_eq!(client.summary().await.unwrap().item_count, 2);
}

#[derive(Debug, Clone)]
enum Op {
    Add(i64),
    Remove(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0i64..100_000).prop_map(Op::Add),
        (0usize..8).prop_map(Op::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn subtotal_matches_remaining_prices(ops in prop::collection::vec(op(), 0..24)) {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        rt.block_on(async {
            let (actor, client) = cart_actor::new(8);
            tokio::spawn(actor.run(()));
            client.open().await.unwrap();

            let mut expected: Vec<CartLineItem> = Vec::new();
            for (n, op) in ops.into_iter().enumerate() {
                match op {
                    Op::Add(cents) => {
                        let item = line_item(&format!("item-{n}"), "Dish", cents, "rest-1");
                        client.add_item(item.clone()).await.unwrap();
                        expected.push(item);
                    }
                    Op::Remove(position) if position < expected.len() => {
                        let removed = client.remove_item(position).await.unwrap();
                        assert_eq!(removed, expected.remove(position));
                    }
                    Op::Remove(position) => {
                        assert!(client.remove_item(position).await.is_err());
                    }
                }
            }

            let sum: Decimal = expected.iter().map(|item| item.price).sum();
            assert_eq!(client.subtotal().await.unwrap(), sum);
        });
    }
}
