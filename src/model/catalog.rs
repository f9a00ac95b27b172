use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A restaurant as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub category: String,
    pub rating: Decimal,
    /// Human readable estimate, e.g. `30-40 min`.
    pub delivery_time: String,
    /// `None` when the restaurant publishes no fee; checkout then charges the
    /// configured fallback.
    pub delivery_fee: Option<Decimal>,
}

/// A dish on a restaurant's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
}
