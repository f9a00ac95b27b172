//! Error types for the Order actor and the checkout that feeds it.

use crate::cart_actor::CartError;
use crate::model::OrderStatus;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// Checkout was attempted with nothing in the cart.
    #[error("Cannot place an order from an empty cart")]
    EmptyCart,

    /// No restaurant was selected, or it is not the one the cart was filled from.
    #[error("Restaurant mismatch: cart is for {cart}, checkout is for {}", .selected.as_deref().unwrap_or("no restaurant"))]
    RestaurantMismatch {
        cart: String,
        selected: Option<String>,
    },

    /// Checkout needs a logged-in identity.
    #[error("No user is logged in")]
    Unauthenticated,

    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// Status changes must move one step forward.
    #[error("Cannot move order from {from:?} to {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Orders are never deleted.
    #[error("The order log is append-only")]
    AppendOnly,

    /// The order log could not be written; nothing was changed.
    #[error("Order log persistence error: {0}")]
    Persistence(String),

    #[error(transparent)]
    Cart(#[from] CartError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
