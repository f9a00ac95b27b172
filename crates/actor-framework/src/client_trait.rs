//! # ActorClient Trait
//!
//! Common interface for resource-specific clients. Provides `get`, `list` and
//! `delete` on top of the wrapped [`ResourceClient`], translated into the
//! resource's own error type.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard read and delete operations.
///
/// # Example
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Coupon { id: u32, code: String }
/// #[derive(Debug)] struct CouponCreate(String);
/// #[derive(Debug)] struct CouponUpdate;
/// #[derive(Debug)] enum CouponAction {}
///
/// #[derive(Debug, thiserror::Error)]
/// enum CouponError {
///     #[error("coupon code already issued: {0}")]
///     AlreadyIssued(String),
///     #[error("actor communication failed: {0}")]
///     Actor(String),
/// }
///
/// #[async_trait]
/// impl ActorEntity for Coupon {
///     type Id = u32;
///     type Create = CouponCreate;
///     type Update = CouponUpdate;
///     type Action = CouponAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = CouponError;
///
///     fn id(&self) -> &u32 { &self.id }
///     fn from_create_params(id: u32, p: CouponCreate) -> Result<Self, CouponError> {
///         Ok(Self { id, code: p.0 })
///     }
///     fn unique_key(&self) -> Option<String> { Some(self.code.clone()) }
///     async fn on_update(&mut self, _: CouponUpdate, _: &()) -> Result<(), CouponError> { Ok(()) }
///     async fn handle_action(&mut self, _: CouponAction, _: &()) -> Result<(), CouponError> { Ok(()) }
/// }
///
/// struct CouponClient {
///     inner: ResourceClient<Coupon>,
/// }
///
/// impl ActorClient<Coupon> for CouponClient {
///     type Error = CouponError;
///
///     fn inner(&self) -> &ResourceClient<Coupon> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> CouponError {
///         match e {
///             FrameworkError::Conflict(code) => CouponError::AlreadyIssued(code),
///             other => other
///                 .into_entity_error::<CouponError>()
///                 .unwrap_or_else(|e| CouponError::Actor(e.to_string())),
///         }
///     }
/// }
///
/// async fn usage(client: CouponClient) {
///     // get(), list() and delete() are provided automatically.
///     let _ = client.get(1).await;
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Every live entity, oldest first.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
