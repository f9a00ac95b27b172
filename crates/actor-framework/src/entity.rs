//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every resource (carts, orders, user
//! records) implements to be managed by the generic [`ResourceActor`](crate::ResourceActor).
//! It names the DTOs, actions, injected context and error type of a resource and
//! provides the lifecycle hooks the actor loop calls.
//!
//! # Provided Methods (Hooks)
//! Hooks with default implementations:
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::unique_key`]
//! - [`ActorEntity::mutates`]
//!
//! Override them only when the resource needs the behavior. The defaults accept
//! everything, declare no uniqueness constraint and treat every action as a
//! mutation.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// This trait is `#[async_trait]` so hooks can await other actors. The `Context`
/// type is injected into every hook at `run()` time, which lets an actor depend on
/// clients that were created after it.
///
/// # Staged mutations
/// `on_update` and `handle_action` run against a *copy* of the stored entity. The
/// actor only swaps the copy in once the hook succeeded and, for journaled actors,
/// once the new snapshot is durable. A hook that returns `Err` therefore never
/// leaves a half-applied entity behind.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `AddItem`, `RecordStatus`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per message: clients match on a single
    /// `CartError` or `OrderError` regardless of which action failed.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the identifier this entity is stored under.
    ///
    /// Used when entities are restored from a journal, where the id is part of
    /// the persisted record rather than freshly generated.
    fn id(&self) -> &Self::Id;

    /// Construct the full entity from a freshly generated id and the payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Key that must be unique among the live entities of this actor.
    ///
    /// When `Some`, a create whose key matches an existing entity is rejected with
    /// [`FrameworkError::Conflict`](crate::FrameworkError::Conflict) and the store is
    /// left untouched.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Whether `action` may change the entity.
    ///
    /// Read-only actions skip the journal write.
    fn mutates(_action: &Self::Action) -> bool {
        true
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
