//! [`ActorEntity`] implementation for [`Cart`].
//!
//! All cart rules live in `handle_action`: non-negative prices and the
//! single-restaurant invariant on add, bounds checks on removal. Reads (`Subtotal`, `Snapshot`) are declared
//! non-mutating so they never touch the journal.

use crate::cart_actor::CartError;
use crate::model::{Cart, CartAction, CartActionResult, CartCreate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;

#[async_trait]
impl ActorEntity for Cart {
    type Id = String;
    type Create = CartCreate;
    type Update = ();
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = ();
    type Error = CartError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, _params: CartCreate) -> Result<Self, CartError> {
        Ok(Cart::new(id))
    }

    fn mutates(action: &CartAction) -> bool {
        !matches!(action, CartAction::Subtotal | CartAction::Snapshot)
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), CartError> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        _ctx: &(),
    ) -> Result<CartActionResult, CartError> {
        match action {
            CartAction::AddItem(item) => {
                if item.price < Decimal::ZERO {
                    return Err(CartError::NegativePrice {
                        item_id: item.id,
                        price: item.price,
                    });
                }
                if let Some(expected) = self.restaurant_id() {
                    if expected != item.restaurant_id {
                        return Err(CartError::InvariantViolation {
                            expected: expected.to_string(),
                            found: item.restaurant_id,
                        });
                    }
                }
                debug!(item_id = %item.id, price = %item.price, "Adding item");
                self.items.push(item);
                Ok(CartActionResult::Snapshot(self.clone()))
            }
            CartAction::RemoveItem(position) => {
                if position >= self.items.len() {
                    return Err(CartError::OutOfRange {
                        position,
                        len: self.items.len(),
                    });
                }
                Ok(CartActionResult::Removed(self.items.remove(position)))
            }
            CartAction::Clear => {
                self.items.clear();
                Ok(CartActionResult::Snapshot(self.clone()))
            }
            CartAction::Subtotal => Ok(CartActionResult::Subtotal(self.subtotal())),
            CartAction::Snapshot => Ok(CartActionResult::Snapshot(self.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CartLineItem;

    fn item(id: &str, cents: i64, restaurant: &str) -> CartLineItem {
        CartLineItem {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            price: Decimal::new(cents, 2),
            restaurant_id: restaurant.to_string(),
            restaurant_name: restaurant.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_rejects_second_restaurant() {
        let mut cart = Cart::new("cart");
        cart.handle_action(CartAction::AddItem(item("pizza", 4590, "rest-1")), &())
            .await
            .unwrap();

        let err = cart
            .handle_action(CartAction::AddItem(item("sushi", 3000, "rest-2")), &())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CartError::InvariantViolation {
                expected: "rest-1".into(),
                found: "rest-2".into()
            }
        );
        assert_eq!(cart.len(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_negative_price() {
        let mut cart = Cart::new("cart");
        cart.handle_action(CartAction::AddItem(item("pizza", 4590, "rest-1")), &())
            .await
            .unwrap();

        let err = cart
            .handle_action(CartAction::AddItem(item("refund", -5000, "rest-1")), &())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CartError::NegativePrice {
                item_id: "refund".into(),
                price: Decimal::new(-5000, 2)
            }
        );
        assert_eq!(cart.subtotal(), Decimal::new(4590, 2));

        // A free item is fine.
        cart.handle_action(CartAction::AddItem(item("water", 0, "rest-1")), &())
            .await
            .unwrap();
        assert_eq!(cart.len(), 2);
    }

    #[tokio::test]
    async fn test_remove_is_positional() {
        let mut cart = Cart::new("cart");
        for id in ["a", "b", "a"] {
            cart.handle_action(CartAction::AddItem(item(id, 100, "rest-1")), &())
                .await
                .unwrap();
        }

        let removed = cart
            .handle_action(CartAction::RemoveItem(2), &())
            .await
            .unwrap();
        assert!(matches!(removed, CartActionResult::Removed(i) if i.id == "a"));
        assert_eq!(cart.items.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), ["a", "b"]);

        let err = cart
            .handle_action(CartAction::RemoveItem(2), &())
            .await
            .unwrap_err();
        assert_eq!(err, CartError::OutOfRange { position: 2, len: 2 });
    }

    #[test]
    fn test_reads_do_not_mutate() {
        assert!(!Cart::mutates(&CartAction::Subtotal));
        assert!(!Cart::mutates(&CartAction::Snapshot));
        assert!(Cart::mutates(&CartAction::Clear));
    }
}
