mod common;

use actor_framework::{ActorClient, KeyValueStore, MemoryStore};
use common::{line_item, pizza, soda};
use foodsaas::catalog::StaticCatalog;
use foodsaas::checkout::DeliveryDetails;
use foodsaas::config::{MarketplaceConfig, StatusPersistenceMode};
use foodsaas::lifecycle::OrderSystem;
use foodsaas::model::{OrderStatus, PaymentMethod, Role};
use foodsaas::order_actor::OrderError;
use foodsaas::session::{SessionError, View, CURRENT_USER_NAMESPACE};
use foodsaas::user_actor::UserError;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

/// Full end-to-end flow with all real actors: login, fill the cart, check out.
#[tokio::test]
async fn test_checkout_scenario() {
    let system = OrderSystem::start(MarketplaceConfig::default()).unwrap();
    let mut session = system
        .session(Arc::new(StaticCatalog::demo()))
        .await
        .unwrap();

    assert_eq!(session.view(), View::Landing);
    assert_eq!(
        session.demo_login(Role::Client).await.unwrap(),
        View::ClientDashboard
    );
    session.open_restaurant("rest-1").unwrap();
    session.add_to_cart(pizza()).await.unwrap();
    session.add_to_cart(soda()).await.unwrap();

    let log_before = system.order_client.history(None).await.unwrap().len();
    let order = session
        .place_order(DeliveryDetails {
            address: "Rua das Flores, 42".to_string(),
            payment_method: PaymentMethod::Pix,
        })
        .await
        .unwrap();

    assert_eq!(order.subtotal, Decimal::new(5190, 2));
    assert_eq!(order.delivery_fee, Decimal::new(500, 2));
    assert_eq!(order.total, Decimal::new(5690, 2));
    assert_eq!(order.status, OrderStatus::Received);
    assert_eq!(order.items, vec![pizza(), soda()]);
    assert_eq!(order.user_id.0, "client-1");
    assert_eq!(order.restaurant_name, "Pizzaria Bella Napoli");
    assert_eq!(order.short_reference().len(), 6);

    assert!(session.cart().await.unwrap().is_empty());
    assert_eq!(
        system.order_client.history(None).await.unwrap().len(),
        log_before + 1
    );
    assert_eq!(session.order_history().await.unwrap(), vec![order]);

    drop(session);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_cart_checkout_leaves_log_untouched() {
    let system = OrderSystem::start(MarketplaceConfig::default()).unwrap();
    let mut session = system
        .session(Arc::new(StaticCatalog::demo()))
        .await
        .unwrap();
    session.demo_login(Role::Client).await.unwrap();
    session.open_restaurant("rest-1").unwrap();

    let result = session.place_order(DeliveryDetails::default()).await;
    assert!(matches!(
        result,
        Err(SessionError::Order(OrderError::EmptyCart))
    ));
    assert!(system.order_client.history(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_email_leaves_directory_unchanged() {
    let system = OrderSystem::start(MarketplaceConfig::default()).unwrap();
    let session = system
        .session(Arc::new(StaticCatalog::demo()))
        .await
        .unwrap();

    session
        .register("Ana", "ana@example.com", "s3cret", Role::Client)
        .await
        .unwrap();
    let before = system.user_client.list().await.unwrap().len();

    let result = session
        .register("Ana Again", "ana@example.com", "other", Role::Restaurant)
        .await;
    assert_eq!(
        result.map_err(|e| e.to_string()),
        Err(UserError::DuplicateEmail("ana@example.com".to_string()).to_string())
    );
    assert_eq!(system.user_client.list().await.unwrap().len(), before);
}

#[tokio::test]
async fn test_register_login_logout() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let system = OrderSystem::with_store(MarketplaceConfig::default(), store.clone()).unwrap();
    let mut session = system
        .session(Arc::new(StaticCatalog::demo()))
        .await
        .unwrap();

    session
        .register("Bruno", "bruno@example.com", "pizza123", Role::Restaurant)
        .await
        .unwrap();
    assert!(matches!(
        session.login("bruno@example.com", "wrong").await,
        Err(SessionError::User(UserError::InvalidCredentials))
    ));
    assert!(matches!(
        session.login("nobody@example.com", "pizza123").await,
        Err(SessionError::User(UserError::InvalidCredentials))
    ));
    assert_eq!(
        session.login("bruno@example.com", "pizza123").await.unwrap(),
        View::RestaurantDashboard
    );

    let stored = store.get(CURRENT_USER_NAMESPACE).unwrap().unwrap();
    assert_eq!(stored["email"], "bruno@example.com");
    assert_eq!(stored["role"], "restaurant");
    assert!(stored.get("credential").is_none());

    session.add_to_cart(pizza()).await.unwrap();
    session.logout().await.unwrap();

    assert_eq!(session.view(), View::Landing);
    assert!(session.current_user().is_none());
    assert!(session.cart().await.unwrap().is_empty());
    assert!(store.get(CURRENT_USER_NAMESPACE).unwrap().is_none());
    assert!(matches!(
        session.order_history().await,
        Err(SessionError::Unauthenticated)
    ));
}

#[tokio::test]
async fn test_restart_restores_user_cart_and_orders() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

    let system = OrderSystem::with_store(MarketplaceConfig::default(), store.clone()).unwrap();
    let mut session = system
        .session(Arc::new(StaticCatalog::demo()))
        .await
        .unwrap();
    session.demo_login(Role::Client).await.unwrap();
    session.open_restaurant("rest-1").unwrap();
    session.add_to_cart(pizza()).await.unwrap();
    let order = session.place_order(DeliveryDetails::default()).await.unwrap();
    session.add_to_cart(soda()).await.unwrap();
    drop(session);
    system.shutdown().await.unwrap();

    let system = OrderSystem::with_store(MarketplaceConfig::default(), store).unwrap();
    let session = system
        .session(Arc::new(StaticCatalog::demo()))
        .await
        .unwrap();

    assert_eq!(session.view(), View::ClientDashboard);
    assert_eq!(session.current_user().unwrap().id.0, "client-1");
    assert_eq!(session.cart().await.unwrap().items, vec![soda()]);
    assert_eq!(session.order_history().await.unwrap(), vec![order]);
}

#[tokio::test]
async fn test_cross_restaurant_add_through_session() {
    let system = OrderSystem::start(MarketplaceConfig::default()).unwrap();
    let mut session = system
        .session(Arc::new(StaticCatalog::demo()))
        .await
        .unwrap();
    session.demo_login(Role::Client).await.unwrap();

    session.open_restaurant("rest-1").unwrap();
    session.add_menu_item("item-1").await.unwrap();
    session.open_restaurant("rest-2").unwrap();

    let result = session.add_menu_item("item-1").await;
    assert!(matches!(result, Err(SessionError::Cart(_))));
    assert!(matches!(
        session.add_to_cart(line_item("x", "Temaki", 2900, "rest-2")).await,
        Err(SessionError::Cart(_))
    ));
    assert_eq!(session.cart_summary().await.unwrap().item_count, 1);

    // Checkout against the wrong restaurant is refused too.
    assert!(matches!(
        session.place_order(DeliveryDetails::default()).await,
        Err(SessionError::Order(OrderError::RestaurantMismatch { .. }))
    ));
}

#[tokio::test]
async fn test_history_by_role() {
    let system = OrderSystem::start(MarketplaceConfig::default()).unwrap();
    let mut session = system
        .session(Arc::new(StaticCatalog::demo()))
        .await
        .unwrap();

    session.demo_login(Role::Client).await.unwrap();
    session.open_restaurant("rest-1").unwrap();
    session.add_menu_item("item-2").await.unwrap();
    session.place_order(DeliveryDetails::default()).await.unwrap();
    session.open_restaurant("rest-3").unwrap();
    session.add_menu_item("item-3").await.unwrap();
    session.place_order(DeliveryDetails::default()).await.unwrap();
    session.logout().await.unwrap();

    session.demo_login(Role::Restaurant).await.unwrap();
    let own = session.order_history().await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].restaurant_id, "rest-1");

    session.demo_login(Role::Admin).await.unwrap();
    assert_eq!(session.order_history().await.unwrap().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_tracked_order_recorded_in_log() {
    let config = MarketplaceConfig {
        status_persistence: StatusPersistenceMode::OrderLog,
        ..MarketplaceConfig::default()
    };
    let system = OrderSystem::start(config).unwrap();
    let mut session = system
        .session(Arc::new(StaticCatalog::demo()))
        .await
        .unwrap();
    session.demo_login(Role::Client).await.unwrap();
    session.open_restaurant("rest-1").unwrap();
    session.add_to_cart(pizza()).await.unwrap();
    let order = session.place_order(DeliveryDetails::default()).await.unwrap();

    let view = session.track_order(&order);
    assert_eq!(view.current, OrderStatus::Received);
    assert!(view.steps[0].current);

    let mut updates = session.tracker().unwrap().subscribe();
    while updates.changed().await.is_ok() {
        if *updates.borrow_and_update() == OrderStatus::Delivered {
            break;
        }
    }

    let view = session.order_status_view(&order);
    assert_eq!(view.current, OrderStatus::Delivered);
    assert!(view.steps.iter().all(|step| step.reached));

    let recorded = system
        .order_client
        .get(order.id.clone())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(recorded.status, OrderStatus::Delivered);

    // Further time passes without effect.
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(session.order_status_view(&order).current, OrderStatus::Delivered);
    assert!(!session.tracker().unwrap().is_running());
}

#[tokio::test(start_paused = true)]
async fn test_ephemeral_tracking_leaves_log_at_received() {
    let system = OrderSystem::start(MarketplaceConfig::default()).unwrap();
    let mut session = system
        .session(Arc::new(StaticCatalog::demo()))
        .await
        .unwrap();
    session.demo_login(Role::Client).await.unwrap();
    session.open_restaurant("rest-1").unwrap();
    session.add_to_cart(pizza()).await.unwrap();
    let order = session.place_order(DeliveryDetails::default()).await.unwrap();

    session.track_order(&order);
    tokio::time::sleep(Duration::from_millis(5_100)).await;
    assert_eq!(
        session.order_status_view(&order).current,
        OrderStatus::Preparing
    );

    session.logout().await.unwrap();
    assert!(session.tracker().is_none());

    let recorded = system.order_client.history(None).await.unwrap();
    assert_eq!(recorded[0].status, OrderStatus::Received);
}
