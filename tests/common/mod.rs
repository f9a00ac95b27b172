#![allow(dead_code)]

use actor_framework::{KeyValueStore, MemoryStore, StoreError};
use foodsaas::model::CartLineItem;
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub fn line_item(id: &str, name: &str, cents: i64, restaurant_id: &str) -> CartLineItem {
    CartLineItem {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        price: Decimal::new(cents, 2),
        restaurant_id: restaurant_id.to_string(),
        restaurant_name: format!("Restaurant {restaurant_id}"),
    }
}

pub fn pizza() -> CartLineItem {
    line_item("item-1", "Pizza", 4590, "rest-1")
}

pub fn soda() -> CartLineItem {
    line_item("item-9", "Soda", 600, "rest-1")
}

/// Memory store whose writes can be switched off.
#[derive(Debug, Default)]
pub struct SwitchableStore {
    inner: MemoryStore,
    refuse_writes: AtomicBool,
    writes: AtomicUsize,
}

impl SwitchableStore {
    pub fn refuse_writes(&self, refuse: bool) {
        self.refuse_writes.store(refuse, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for SwitchableStore {
    fn get(&self, namespace: &str) -> Result<Option<Value>, StoreError> {
        self.inner.get(namespace)
    }

    fn set(&self, namespace: &str, value: Value) -> Result<(), StoreError> {
        if self.refuse_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("quota exceeded".into()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(namespace, value)
    }

    fn remove(&self, namespace: &str) -> Result<(), StoreError> {
        self.inner.remove(namespace)
    }
}
