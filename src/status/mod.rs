//! # Order Status Engine
//!
//! `received → preparing → on_way → delivered`, one step per tick.
//!
//! [`advance`] is the whole state machine. [`StatusTracker`] is the timer
//! around it: a Tokio task that ticks at a fixed period, publishes each new
//! status on a `watch` channel, and exits on its own once the order is
//! delivered. A tracker can optionally write each step back to the order log
//! through [`StatusPersistence::OrderLog`]; by default progress is ephemeral.

use crate::clients::OrderClient;
use crate::model::{Order, OrderId, OrderStatus};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// The next status, or the same one once delivered.
pub fn advance(status: OrderStatus) -> OrderStatus {
    match status {
        OrderStatus::Received => OrderStatus::Preparing,
        OrderStatus::Preparing => OrderStatus::OnWay,
        OrderStatus::OnWay | OrderStatus::Delivered => OrderStatus::Delivered,
    }
}

/// One row of the tracking timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStep {
    pub status: OrderStatus,
    pub label: &'static str,
    /// At or before the current status.
    pub reached: bool,
    pub current: bool,
}

/// What the tracking view renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub order_id: OrderId,
    pub current: OrderStatus,
    pub steps: Vec<StatusStep>,
}

impl StatusView {
    pub fn new(order_id: OrderId, current: OrderStatus) -> Self {
        let steps = OrderStatus::ALL
            .iter()
            .map(|&status| StatusStep {
                status,
                label: status.label(),
                reached: status.index() <= current.index(),
                current: status == current,
            })
            .collect();
        Self {
            order_id,
            current,
            steps,
        }
    }

    pub fn short_reference(&self) -> &str {
        self.order_id.short_reference()
    }
}

/// Shortest period a tracker ticks at.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Whether status transitions are written back to the order log.
#[derive(Debug, Clone, Default)]
pub enum StatusPersistence {
    #[default]
    Ephemeral,
    OrderLog(OrderClient),
}

/// Drives one order through its statuses on a fixed period.
///
/// Dropping the tracker stops the timer.
#[derive(Debug)]
pub struct StatusTracker {
    order_id: OrderId,
    status: watch::Receiver<OrderStatus>,
    handle: Option<JoinHandle<()>>,
}

impl StatusTracker {
    /// Starts ticking from the order's recorded status. The first advance
    /// happens one `period` after the call; periods shorter than
    /// [`MIN_PERIOD`] are raised to it. Must be called inside a Tokio runtime.
    pub fn start(order: &Order, period: Duration, persistence: StatusPersistence) -> Self {
        if period < MIN_PERIOD {
            warn!(?period, "Status period too short, using {:?}", MIN_PERIOD);
        }
        let period = period.max(MIN_PERIOD);
        let (sender, status) = watch::channel(order.status);
        let order_id = order.id.clone();
        let task_order_id = order_id.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut current = *sender.borrow();
            info!(order_id = %task_order_id, status = ?current, "Tracking started");

            while !current.is_terminal() {
                ticker.tick().await;
                let next = advance(current);

                if let StatusPersistence::OrderLog(orders) = &persistence {
                    if let Err(e) = orders.record_status(task_order_id.clone(), next).await {
                        // Retry on the next tick rather than run ahead of the log.
                        warn!(order_id = %task_order_id, error = %e, "Status not recorded");
                        continue;
                    }
                }

                current = next;
                sender.send_replace(current);
                debug!(order_id = %task_order_id, status = ?current, "Status advanced");
            }
            info!(order_id = %task_order_id, "Tracking finished");
        });

        Self {
            order_id,
            status,
            handle: Some(handle),
        }
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn current(&self) -> OrderStatus {
        *self.status.borrow()
    }

    pub fn view(&self) -> StatusView {
        StatusView::new(self.order_id.clone(), self.current())
    }

    /// A receiver that sees every status the tracker publishes. `changed()`
    /// errors once tracking has finished or was stopped.
    pub fn subscribe(&self) -> watch::Receiver<OrderStatus> {
        self.status.clone()
    }

    /// Whether the timer is still ticking.
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Cancels the timer. Calling it again, or after delivery, does nothing.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!(order_id = %self.order_id, "Tracking stopped");
        }
    }
}

impl Drop for StatusTracker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PaymentMethod, UserId};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: OrderId::from_millis(1_718_000_123_456),
            user_id: UserId::from("client-1"),
            restaurant_id: "rest-1".to_string(),
            restaurant_name: "Pizzaria Bella Napoli".to_string(),
            items: Vec::new(),
            subtotal: Decimal::ZERO,
            delivery_fee: Decimal::new(500, 2),
            total: Decimal::new(500, 2),
            address: "Rua Principal, 123".to_string(),
            payment_method: PaymentMethod::Credit,
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_advance_never_skips_or_reverses() {
        let mut status = OrderStatus::Received;
        for expected in &OrderStatus::ALL[1..] {
            status = advance(status);
            assert_eq!(status, *expected);
        }
        assert_eq!(advance(OrderStatus::Delivered), OrderStatus::Delivered);
    }

    #[test]
    fn test_view_flags() {
        let view = StatusView::new(OrderId::from_millis(42), OrderStatus::Preparing);
        let reached: Vec<bool> = view.steps.iter().map(|s| s.reached).collect();
        let current: Vec<bool> = view.steps.iter().map(|s| s.current).collect();

        assert_eq!(reached, [true, true, false, false]);
        assert_eq!(current, [false, true, false, false]);
        assert_eq!(view.steps[2].label, "On the way");
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_ticks_reach_delivered() {
        let start = Instant::now();
        let tracker = StatusTracker::start(
            &order(OrderStatus::Received),
            Duration::from_secs(5),
            StatusPersistence::Ephemeral,
        );
        let mut rx = tracker.subscribe();

        for expected in [
            OrderStatus::Preparing,
            OrderStatus::OnWay,
            OrderStatus::Delivered,
        ] {
            rx.changed().await.unwrap();
            assert_eq!(*rx.borrow_and_update(), expected);
        }
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(15) && elapsed < Duration::from_secs(16));

        // The task ends at delivered; a fourth period changes nothing.
        assert!(rx.changed().await.is_err());
        time::advance(Duration::from_secs(5)).await;
        assert_eq!(tracker.current(), OrderStatus::Delivered);
        assert!(!tracker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_still_advances() {
        let tracker = StatusTracker::start(
            &order(OrderStatus::Received),
            Duration::ZERO,
            StatusPersistence::Ephemeral,
        );
        let mut rx = tracker.subscribe();
        while rx.changed().await.is_ok() {}

        assert_eq!(tracker.current(), OrderStatus::Delivered);
        assert!(!tracker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_starts_from_recorded_status() {
        let tracker = StatusTracker::start(
            &order(OrderStatus::OnWay),
            Duration::from_secs(5),
            StatusPersistence::Ephemeral,
        );
        assert_eq!(tracker.current(), OrderStatus::OnWay);

        let mut rx = tracker.subscribe();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), OrderStatus::Delivered);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent() {
        let mut tracker = StatusTracker::start(
            &order(OrderStatus::Received),
            Duration::from_secs(5),
            StatusPersistence::Ephemeral,
        );
        tracker.stop();
        tracker.stop();

        time::advance(Duration::from_secs(60)).await;
        assert_eq!(tracker.current(), OrderStatus::Received);
        assert!(!tracker.is_running());
    }
}
