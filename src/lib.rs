//! # FoodSaaS
//!
//! > **Order lifecycle and cart consistency for a food-delivery marketplace.**
//!
//! A cart is filled from one restaurant, turned into an immutable order at
//! checkout, and the order then walks `received → preparing → on_way →
//! delivered` on a timer while a tracking view watches. Every piece of state is
//! owned by an actor and mirrored to a [`KeyValueStore`](actor_framework::KeyValueStore),
//! so a restart picks up the same user, cart and order log.
//!
//! ## Core Concepts
//!
//! ### One owner per collection
//! The cart, the order log and the user directory each live inside their own
//! [`ResourceActor`](actor_framework::ResourceActor). Requests are processed one
//! at a time, so read-modify-write of a whole collection never races, and a
//! mutation is journaled before the caller hears back.
//!
//! ### Validation lives in the entity
//! The single-restaurant rule is enforced by the cart entity itself; the
//! forward-only status rule by the order entity. Clients only translate errors.
//!
//! ### Timers call a pure function
//! [`status::advance`] is the whole state machine. [`status::StatusTracker`] is
//! the Tokio task around it and can be stopped any number of times.
//!
//! ## Module Tour
//!
//! ### 1. The Engine (`actor_framework`)
//! Generic actor loop, journals and key-value stores.
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! - **Key items**: [`OrderSystem`](lifecycle::OrderSystem), [`shutdown`](lifecycle::OrderSystem::shutdown).
//!
//! ### 3. The Interface ([`clients`], [`checkout`], [`session`])
//! - **Key items**: [`CartClient`](clients::CartClient),
//!   [`CheckoutProcessor`](checkout::CheckoutProcessor), [`Session`](session::Session).
//!
//! ### 4. The Implementation ([`cart_actor`], [`order_actor`], [`user_actor`])
//! Concrete implementations of the `ActorEntity` trait.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the demo flow with info logs
//! RUST_LOG=info cargo run
//!
//! # Keep state between runs
//! FOODSAAS_DATA_DIR=./data cargo run
//! ```

pub mod cart_actor;
pub mod catalog;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod ids;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod session;
pub mod status;
pub mod user_actor;
