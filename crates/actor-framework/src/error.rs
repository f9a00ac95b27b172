//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself, as opposed to the domain errors an
//! entity returns from its hooks (those travel inside [`FrameworkError::EntityError`]).

use crate::store::StoreError;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// A create collided with the unique key of a live entity.
    #[error("Unique key already taken: {0}")]
    Conflict(String),
    /// The journal could not be written; the in-memory store was not changed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the concrete entity error, if this is one of type `E`.
    ///
    /// Typed clients use this to hand their callers a `CartError` instead of a
    /// stringly wrapped one. Any other variant is returned unchanged in `Err`.
    pub fn into_entity_error<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(FrameworkError::EntityError),
            other => Err(other),
        }
    }
}
