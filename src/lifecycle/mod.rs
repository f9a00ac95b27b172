//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the marketplace's actors.
//!
//! ## The OrderSystem Pattern
//!
//! [`OrderSystem`] is the conductor:
//!
//! 1. **Storage** - open the configured [`KeyValueStore`](actor_framework::KeyValueStore)
//!    (a directory of JSON documents, or memory)
//! 2. **Actor creation** - build the cart, order and user actors, each restoring
//!    its collection from its namespace
//! 3. **Lifecycle** - spawn every actor loop and keep the handles
//! 4. **Sessions** - hand out [`Session`](crate::session::Session)s bound to the
//!    running actors
//! 5. **Graceful shutdown** - drop the clients and await the loops
//!
//! ## Graceful Shutdown
//!
//! Actors stop when the last clone of their client is dropped. Sessions and
//! status trackers hold clones, so drop (or log out of) them before calling
//! [`OrderSystem::shutdown`].
//!
//! ## Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging for the
//! entire system. See the [`tracing`](self::tracing) module for what gets logged.

pub mod order_system;
pub mod tracing;

pub use order_system::*;
pub use self::tracing::setup_tracing;
