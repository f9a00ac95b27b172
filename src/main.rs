//! # FoodSaaS demo
//!
//! Walks one customer through the marketplace:
//! 1.  Start the [`OrderSystem`] with the configuration from flags, env and `.env`.
//! 2.  Log in as the demo client and fill the cart at Pizzaria Bella Napoli.
//! 3.  Check out and follow the order until it is delivered.

use foodsaas::catalog::StaticCatalog;
use foodsaas::checkout::DeliveryDetails;
use foodsaas::config::MarketplaceConfig;
use foodsaas::lifecycle::{setup_tracing, OrderSystem};
use foodsaas::model::{Money, OrderStatus, PaymentMethod, Role};
use std::sync::Arc;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = MarketplaceConfig::load().map_err(|e| e.to_string())?;

    // Setup tracing once for the entire application
    setup_tracing();

    info!(?config, "Starting marketplace");
    let system = OrderSystem::start(config).map_err(|e| e.to_string())?;

    let mut session = system
        .session(Arc::new(StaticCatalog::demo()))
        .await
        .map_err(|e| e.to_string())?;
    let view = session
        .demo_login(Role::Client)
        .await
        .map_err(|e| e.to_string())?;
    info!(?view, "Logged in");

    let span = tracing::info_span!("cart_building");
    let summary = async {
        for restaurant in session.restaurants("pizza") {
            info!(restaurant = %restaurant.name, fee = ?restaurant.delivery_fee, "Found restaurant");
        }
        let menu = session.open_restaurant("rest-1")?;
        for (category, items) in &menu {
            info!(%category, items = items.len(), "Menu section");
        }
        session.add_menu_item("item-1").await?;
        session.add_menu_item("item-4").await?;
        session.cart_summary().await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;
    info!(
        items = summary.item_count,
        subtotal = %Money(summary.subtotal),
        "Cart ready"
    );

    let span = tracing::info_span!("checkout");
    let details = DeliveryDetails {
        payment_method: PaymentMethod::Pix,
        ..DeliveryDetails::default()
    };
    let order = match session.place_order(details).instrument(span).await {
        Ok(order) => order,
        Err(e) => {
            error!(error = %e, "Checkout failed");
            return Err(e.to_string());
        }
    };
    info!(
        reference = order.short_reference(),
        total = %Money(order.total),
        "Order placed"
    );

    let span = tracing::info_span!("tracking", order_id = %order.id);
    async {
        session.track_order(&order);
        let Some(mut updates) = session.tracker().map(|t| t.subscribe()) else {
            return;
        };
        while updates.changed().await.is_ok() {
            let status = *updates.borrow_and_update();
            info!(status = status.label(), "Status changed");
            if status == OrderStatus::Delivered {
                break;
            }
        }
    }
    .instrument(span)
    .await;

    let history = session.order_history().await.map_err(|e| e.to_string())?;
    info!(orders = history.len(), "Order history");

    session.logout().await.map_err(|e| e.to_string())?;
    drop(session);

    // Shutdown system gracefully
    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
