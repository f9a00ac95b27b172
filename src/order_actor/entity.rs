//! [`ActorEntity`] implementation for [`Order`].

use crate::model::{Order, OrderAction, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::OrderError;
use crate::status::advance;
use actor_framework::ActorEntity;
use async_trait::async_trait;
use rust_decimal::Decimal;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = OrderStatus;
    type Context = ();
    type Error = OrderError;

    fn id(&self) -> &OrderId {
        &self.id
    }

    /// Freezes the line items and derives the totals. New orders always start
    /// out `received`.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let subtotal: Decimal = params.items.iter().map(|item| item.price).sum();
        Ok(Self {
            id,
            user_id: params.user_id,
            restaurant_id: params.restaurant_id,
            restaurant_name: params.restaurant_name,
            items: params.items,
            subtotal,
            delivery_fee: params.delivery_fee,
            total: subtotal + params.delivery_fee,
            address: params.address,
            payment_method: params.payment_method,
            status: OrderStatus::Received,
            created_at: params.created_at,
        })
    }

    // Orders are immutable apart from their status.
    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), OrderError> {
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), OrderError> {
        Err(OrderError::AppendOnly)
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &(),
    ) -> Result<OrderStatus, OrderError> {
        match action {
            OrderAction::RecordStatus(to) => {
                if to != self.status && to != advance(self.status) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to,
                    });
                }
                self.status = to;
                Ok(self.status)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartLineItem, PaymentMethod, UserId};
    use chrono::Utc;

    fn params(prices: &[i64]) -> OrderCreate {
        OrderCreate {
            user_id: UserId::from("client-1"),
            restaurant_id: "rest-1".to_string(),
            restaurant_name: "Pizzaria Bella Napoli".to_string(),
            items: prices
                .iter()
                .map(|cents| CartLineItem {
                    id: format!("item-{cents}"),
                    name: "Dish".to_string(),
                    description: String::new(),
                    price: Decimal::new(*cents, 2),
                    restaurant_id: "rest-1".to_string(),
                    restaurant_name: "Pizzaria Bella Napoli".to_string(),
                })
                .collect(),
            delivery_fee: Decimal::new(500, 2),
            address: "Rua Principal, 123".to_string(),
            payment_method: PaymentMethod::Pix,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_totals_are_exact() {
        let order = Order::from_create_params(OrderId::from_millis(1), params(&[4590, 600]))
            .unwrap();
        assert_eq!(order.subtotal, Decimal::new(5190, 2));
        assert_eq!(order.total, Decimal::new(5690, 2));
        assert_eq!(order.status, OrderStatus::Received);
    }

    #[test]
    fn test_empty_items_rejected() {
        let result = Order::from_create_params(OrderId::from_millis(1), params(&[]));
        assert_eq!(result.unwrap_err(), OrderError::EmptyCart);
    }

    #[tokio::test]
    async fn test_status_moves_one_step_forward() {
        let mut order =
            Order::from_create_params(OrderId::from_millis(1), params(&[100])).unwrap();

        let skipped = order
            .handle_action(OrderAction::RecordStatus(OrderStatus::OnWay), &())
            .await;
        assert!(matches!(skipped, Err(OrderError::InvalidTransition { .. })));

        let status = order
            .handle_action(OrderAction::RecordStatus(OrderStatus::Preparing), &())
            .await
            .unwrap();
        assert_eq!(status, OrderStatus::Preparing);

        // Re-recording the same status is a no-op.
        order
            .handle_action(OrderAction::RecordStatus(OrderStatus::Preparing), &())
            .await
            .unwrap();

        let backwards = order
            .handle_action(OrderAction::RecordStatus(OrderStatus::Received), &())
            .await;
        assert!(matches!(backwards, Err(OrderError::InvalidTransition { .. })));
    }
}
