//! # Order Actor
//!
//! Owns the order log. Orders are appended at checkout and only their status
//! may change afterwards. With a journal, the whole log is rewritten to the
//! `foodsaas_orders` namespace on every append, before checkout proceeds.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`new()`] / [`journaled()`] - Factory functions that create the actor and its client
//!
//! ## Order ids
//!
//! Ids are `order-<unix millis>`. The generator never hands out a value lower
//! than or equal to the previous one, so two checkouts inside the same
//! millisecond still get distinct, increasing ids. A journaled log seeds the
//! generator with the newest restored id.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::ids::monotonic_millis;
use crate::model::{Order, OrderId};
use actor_framework::{FrameworkError, JsonJournal, KeyValueStore, ResourceActor};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Namespace the order log is journaled under.
pub const ORDER_NAMESPACE: &str = "foodsaas_orders";

fn order_ids(last: Arc<AtomicI64>) -> impl FnMut() -> OrderId + Send + 'static {
    move || OrderId::from_millis(monotonic_millis(&last))
}

/// Creates an in-memory Order actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<Order>, OrderClient) {
    let last = Arc::new(AtomicI64::new(0));
    let (actor, generic_client) = ResourceActor::new(capacity, order_ids(last));
    (actor, OrderClient::new(generic_client))
}

/// Creates an Order actor restored from, and journaled to, `store`.
pub fn journaled(
    capacity: usize,
    store: Arc<dyn KeyValueStore>,
) -> Result<(ResourceActor<Order>, OrderClient), FrameworkError> {
    let last = Arc::new(AtomicI64::new(0));
    let journal = JsonJournal::new(store, ORDER_NAMESPACE);
    let (actor, generic_client) =
        ResourceActor::journaled(capacity, order_ids(last.clone()), journal)?;

    let newest = actor
        .entities()
        .filter_map(|order: &Order| order.id.millis())
        .max()
        .unwrap_or(0);
    last.store(newest, Ordering::SeqCst);

    Ok((actor, OrderClient::new(generic_client)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_ids_increase_within_one_millisecond() {
        let mut next = order_ids(Arc::new(AtomicI64::new(0)));
        let ids: Vec<i64> = (0..50).filter_map(|_| next().millis()).collect();

        assert_eq!(ids.len(), 50);
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_ids_never_go_below_seed() {
        let far_future = Utc::now().timestamp_millis() + 60_000;
        let mut next = order_ids(Arc::new(AtomicI64::new(far_future)));

        assert_eq!(next().millis(), Some(far_future + 1));
        assert_eq!(next().millis(), Some(far_future + 2));
    }
}
