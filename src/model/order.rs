use crate::model::{CartLineItem, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Order identifier, `order-<unix millis>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub const PREFIX: &'static str = "order-";

    pub fn from_millis(millis: i64) -> Self {
        Self(format!("{}{millis}", Self::PREFIX))
    }

    /// The creation time encoded in the id, if it has the usual shape.
    pub fn millis(&self) -> Option<i64> {
        self.0.strip_prefix(Self::PREFIX)?.parse().ok()
    }

    /// Last six characters, the reference shown to customers.
    pub fn short_reference(&self) -> &str {
        let start = self
            .0
            .char_indices()
            .rev()
            .nth(5)
            .map_or(0, |(index, _)| index);
        &self.0[start..]
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Delivery progress of an order. Only ever moves forward, one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Received,
    Preparing,
    OnWay,
    Delivered,
}

impl OrderStatus {
    /// Every status in delivery order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Received,
        OrderStatus::Preparing,
        OrderStatus::OnWay,
        OrderStatus::Delivered,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Received => "Received",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::OnWay => "On the way",
            OrderStatus::Delivered => "Delivered",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == OrderStatus::Delivered
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Credit,
    Pix,
}

/// An order placed at checkout.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor)
/// whose journal is the order log.
///
/// Everything but `status` is frozen at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub items: Vec<CartLineItem>,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn short_reference(&self) -> &str {
        self.id.short_reference()
    }
}

/// Payload for creating an order. Totals are derived from `items` and
/// `delivery_fee` when the order is materialized.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub items: Vec<CartLineItem>,
    pub delivery_fee: Decimal,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Write a status the engine reached back to the log.
    RecordStatus(OrderStatus),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_reference_is_last_six_chars() {
        let id = OrderId::from_millis(1_718_000_123_456);
        assert_eq!(id.short_reference(), "123456");
        assert_eq!(id.millis(), Some(1_718_000_123_456));

        assert_eq!(OrderId("abc".into()).short_reference(), "abc");
        assert_eq!(OrderId("abc".into()).millis(), None);
    }

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&OrderStatus::ALL).unwrap();
        assert_eq!(json, r#"["received","preparing","on_way","delivered"]"#);
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Pix).unwrap(),
            r#""pix""#
        );
    }
}
