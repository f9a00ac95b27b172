//! Error type for the session controller.

use crate::cart_actor::CartError;
use crate::order_actor::OrderError;
use crate::user_actor::UserError;
use actor_framework::StoreError;
use thiserror::Error;

/// Everything a session call can fail with.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    User(#[from] UserError),

    /// The current-user document could not be read or written.
    #[error("Session store error: {0}")]
    Store(#[from] StoreError),

    #[error("Unknown restaurant: {0}")]
    UnknownRestaurant(String),

    #[error("No restaurant is open")]
    NoRestaurantSelected,

    #[error("Restaurant {restaurant_id} has no menu item {item_id}")]
    UnknownMenuItem {
        restaurant_id: String,
        item_id: String,
    },

    #[error("No user is logged in")]
    Unauthenticated,
}
