use crate::model::{MenuItem, Restaurant};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Id of the single cart a session owns.
pub const SESSION_CART_ID: &str = "cart";

/// Snapshot of a menu item taken when it was put in the cart.
///
/// Later catalog changes do not reach items already in a cart or an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub restaurant_id: String,
    pub restaurant_name: String,
}

impl CartLineItem {
    pub fn from_menu(item: &MenuItem, restaurant: &Restaurant) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            restaurant_id: restaurant.id.clone(),
            restaurant_name: restaurant.name.clone(),
        }
    }
}

/// Ordered line items of one session. Every item belongs to the same restaurant.
///
/// # Actor Framework
/// Managed by the cart actor; see [`crate::cart_actor`] for the operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: String,
    pub items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
        }
    }

    /// The restaurant every item belongs to, `None` while empty.
    pub fn restaurant_id(&self) -> Option<&str> {
        self.items.first().map(|item| item.restaurant_id.as_str())
    }

    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(|item| item.price).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Payload for creating a cart. Carts always start empty.
#[derive(Debug, Clone, Default)]
pub struct CartCreate;

/// Operations on a cart.
#[derive(Debug, Clone)]
pub enum CartAction {
    AddItem(CartLineItem),
    /// Zero-based position; duplicates are allowed so removal is positional.
    RemoveItem(usize),
    Clear,
    Subtotal,
    Snapshot,
}

/// Replies to [`CartAction`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    Snapshot(Cart),
    Removed(CartLineItem),
    Subtotal(Decimal),
}

/// Item count and running subtotal, as shown next to the cart button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    pub item_count: usize,
    pub subtotal: Decimal,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        Self {
            item_count: cart.len(),
            subtotal: cart.subtotal(),
        }
    }
}
