//! # Actor Framework
//!
//! Building blocks for type-safe, concurrent resource actors on Tokio, with an
//! optional durable journal behind each actor.
//!
//! ## Why ROA + Actor Model?
//!
//! Every resource type (a cart, an order log, a user directory) gets its own
//! actor with isolated state and a uniform CRUD + `List` + `Action` surface.
//! Messages to one actor are processed sequentially, so read-modify-write cycles
//! on a collection never interleave and no locks are needed. Actors coordinate
//! through each other's clients rather than through shared memory.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - Domain models and their hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - Message processing and journaling
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - Type-safe communication
//! 4. **Storage Layer** ([`KeyValueStore`], [`Journal`]) - Durable snapshots of a collection
//!
//! ## Durability
//!
//! A journaled actor writes the full post-mutation collection to its
//! [`Journal`] before it commits the change in memory and replies. A failed
//! write surfaces as [`FrameworkError::Persistence`] and leaves memory
//! unchanged, so memory and storage never disagree about an acknowledged
//! mutation.
//!
//! ```rust
//! use actor_framework::{ActorEntity, JsonJournal, MemoryStore, ResourceActor};
//! use async_trait::async_trait;
//! use serde::{Deserialize, Serialize};
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug, Serialize, Deserialize)]
//! struct Counter { id: u32, hits: u32 }
//! #[derive(Debug)] struct CounterCreate;
//! #[derive(Debug)] struct CounterUpdate;
//! #[derive(Debug)] enum CounterAction { Hit }
//! #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
//!
//! #[async_trait]
//! impl ActorEntity for Counter {
//!     type Id = u32; type Create = CounterCreate; type Update = CounterUpdate;
//!     type Action = CounterAction; type ActionResult = u32; type Context = (); type Error = CounterError;
//!     fn id(&self) -> &u32 { &self.id }
//!     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, CounterError> {
//!         Ok(Self { id, hits: 0 })
//!     }
//!     async fn on_update(&mut self, _: CounterUpdate, _: &()) -> Result<(), CounterError> { Ok(()) }
//!     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u32, CounterError> {
//!         self.hits += 1;
//!         Ok(self.hits)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(MemoryStore::new());
//!     let journal = JsonJournal::new(store.clone(), "counters");
//!     let (actor, client) = ResourceActor::<Counter>::journaled(8, || 1, journal).unwrap();
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(CounterCreate).await.unwrap();
//!     client.perform_action(id, CounterAction::Hit).await.unwrap();
//!
//!     // A second actor over the same store sees the acknowledged state.
//!     let journal = JsonJournal::new(store, "counters");
//!     let (restored, client) = ResourceActor::<Counter>::journaled(8, || 2, journal).unwrap();
//!     assert_eq!(restored.len(), 1);
//!     tokio::spawn(restored.run(()));
//!     assert_eq!(client.get(id).await.unwrap().unwrap().hits, 1);
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected when the loop starts (`actor.run(context)`), not at
//! construction time, so actors can depend on clients created after them.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient` from scripted replies,
//! which makes failure paths (a refused journal write, a stopped actor) easy to
//! exercise in the code that orchestrates several clients.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod journal;
pub mod message;
pub mod mock;
pub mod store;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use journal::{Journal, JsonJournal};
pub use message::{ResourceRequest, Response};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
