//! # Typed Clients
//!
//! Domain-facing wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//! Each one speaks its actor's vocabulary (`add_item`, `place`, `register`) and
//! hands back that actor's error type. Entity errors raised inside the actor are
//! recovered by downcasting; plumbing failures become `Persistence` or
//! `ActorCommunicationError`.

pub mod cart_client;
pub mod order_client;
pub mod user_client;

pub use cart_client::CartClient;
pub use order_client::OrderClient;
pub use user_client::UserClient;
