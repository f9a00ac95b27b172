//! Error types for the Cart actor.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The item comes from another restaurant than the ones already in the cart.
    #[error("Cart holds items from restaurant {expected}, refusing item from {found}")]
    InvariantViolation { expected: String, found: String },

    /// Line items carry a non-negative unit price.
    #[error("Item {item_id} has a negative price ({price})")]
    NegativePrice { item_id: String, price: Decimal },

    /// Removal position outside `[0, len)`.
    #[error("Cart position {position} out of range (len {len})")]
    OutOfRange { position: usize, len: usize },

    /// The cart could not be written; nothing was changed.
    #[error("Cart persistence error: {0}")]
    Persistence(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
