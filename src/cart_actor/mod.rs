//! # Cart Actor
//!
//! Owns the session cart. Every read-modify-write of the cart goes through this
//! one actor, and every committed change is journaled to the `foodsaas_cart`
//! namespace before the caller hears back.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Cart`]
//! - [`error`] - [`CartError`]
//! - [`new()`] / [`journaled()`] - Factory functions that create the actor and its client
//!
//! ## Usage
//!
//! ```rust
//! use foodsaas::cart_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = cart_actor::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let cart = client.open().await?;
//!     assert!(cart.is_empty());
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CartClient;
use crate::model::{Cart, SESSION_CART_ID};
use actor_framework::{FrameworkError, JsonJournal, KeyValueStore, ResourceActor};
use std::sync::Arc;

/// Namespace the cart is journaled under.
pub const CART_NAMESPACE: &str = "foodsaas_cart";

fn next_cart_id() -> String {
    SESSION_CART_ID.to_string()
}

/// Creates an in-memory Cart actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<Cart>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(capacity, next_cart_id);
    (actor, CartClient::new(generic_client))
}

/// Creates a Cart actor restored from, and journaled to, `store`.
pub fn journaled(
    capacity: usize,
    store: Arc<dyn KeyValueStore>,
) -> Result<(ResourceActor<Cart>, CartClient), FrameworkError> {
    let journal = JsonJournal::new(store, CART_NAMESPACE);
    let (actor, generic_client) = ResourceActor::journaled(capacity, next_cart_id, journal)?;
    Ok((actor, CartClient::new(generic_client)))
}
