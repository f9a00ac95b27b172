//! # Checkout
//!
//! Turns the session cart into an [`Order`]. The processor owns no state; it
//! sequences the cart actor and the order actor so that the cart is only
//! cleared once the order is durably in the log.
//!
//! ```text
//! snapshot cart ─► validate ─► append order (journaled) ─► clear cart
//!                     │                 │
//!                     └─ EmptyCart,     └─ Persistence: cart untouched
//!                        RestaurantMismatch,
//!                        Unauthenticated
//! ```

use crate::clients::{CartClient, OrderClient};
use crate::model::{Identity, Order, OrderCreate, PaymentMethod, Restaurant};
use crate::order_actor::OrderError;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

/// Where and how the customer wants to be served.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryDetails {
    pub address: String,
    pub payment_method: PaymentMethod,
}

impl Default for DeliveryDetails {
    fn default() -> Self {
        Self {
            address: "Rua Principal, 123".to_string(),
            payment_method: PaymentMethod::Credit,
        }
    }
}

/// Validates a cart and materializes it as an order.
#[derive(Clone, Debug)]
pub struct CheckoutProcessor {
    carts: CartClient,
    orders: OrderClient,
    fallback_fee: Decimal,
}

impl CheckoutProcessor {
    pub fn new(carts: CartClient, orders: OrderClient, fallback_fee: Decimal) -> Self {
        Self {
            carts,
            orders,
            fallback_fee,
        }
    }

    /// Fee charged for `restaurant`: its own, or the fallback when it has none.
    pub fn delivery_fee(&self, restaurant: &Restaurant) -> Decimal {
        restaurant.delivery_fee.unwrap_or(self.fallback_fee)
    }

    /// Places an order for everything in the cart.
    ///
    /// Checks run in this order: empty cart, restaurant, identity. Nothing is
    /// written unless all pass. The cart is cleared only after the order log
    /// accepted the order.
    ///
    /// # Errors
    ///
    /// - [`OrderError::EmptyCart`]
    /// - [`OrderError::RestaurantMismatch`] when `restaurant` is `None` or not
    ///   the cart's restaurant
    /// - [`OrderError::Unauthenticated`] when `identity` is `None`
    /// - [`OrderError::Persistence`] when the log write failed; cart and log are
    ///   unchanged
    #[instrument(skip_all, fields(restaurant_id = restaurant.map(|r| r.id.as_str())))]
    pub async fn place_order(
        &self,
        restaurant: Option<&Restaurant>,
        identity: Option<&Identity>,
        details: DeliveryDetails,
    ) -> Result<Order, OrderError> {
        let cart = self.carts.snapshot().await?;
        let Some(cart_restaurant) = cart.restaurant_id() else {
            warn!("Checkout with empty cart");
            return Err(OrderError::EmptyCart);
        };

        let restaurant = match restaurant {
            Some(r) if r.id == cart_restaurant => r,
            other => {
                return Err(OrderError::RestaurantMismatch {
                    cart: cart_restaurant.to_string(),
                    selected: other.map(|r| r.id.clone()),
                })
            }
        };
        let identity = identity.ok_or(OrderError::Unauthenticated)?;

        let params = OrderCreate {
            user_id: identity.id.clone(),
            restaurant_id: restaurant.id.clone(),
            restaurant_name: restaurant.name.clone(),
            items: cart.items,
            delivery_fee: self.delivery_fee(restaurant),
            address: details.address,
            payment_method: details.payment_method,
            created_at: Utc::now(),
        };
        let order = self.orders.place(params).await?;

        // The order is durable from here on. A failing clear leaves a stale
        // cart behind but must not report the order as not placed.
        if let Err(e) = self.carts.clear().await {
            warn!(order_id = %order.id, error = %e, "Order placed but cart not cleared");
        }

        info!(order_id = %order.id, total = %order.total, "Order placed");
        Ok(order)
    }
}
