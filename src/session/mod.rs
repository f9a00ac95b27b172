//! # Session Controller
//!
//! A [`Session`] is what one person at the keyboard sees: who is logged in,
//! which restaurant is open, the cart, and the order being tracked. It owns
//! no durable state of its own beyond the current identity, which it mirrors
//! to the `foodsaas_user` namespace so a restart lands on the same dashboard.
//!
//! Logout is the cart's lifecycle boundary: the cart is cleared, the stored
//! identity removed, and any running status tracker stopped.

mod error;

pub use error::SessionError;

use crate::catalog::{group_by_category, Catalog};
use crate::checkout::{CheckoutProcessor, DeliveryDetails};
use crate::clients::{CartClient, OrderClient, UserClient};
use crate::model::{
    Cart, CartLineItem, CartSummary, Identity, MenuItem, Order, Restaurant, Role, UserCreate,
};
use crate::status::{StatusPersistence, StatusTracker, StatusView};
use actor_framework::{KeyValueStore, StoreError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Namespace holding the logged-in [`Identity`].
pub const CURRENT_USER_NAMESPACE: &str = "foodsaas_user";

/// The screen a session lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    ClientDashboard,
    RestaurantDashboard,
    AdminDashboard,
}

impl View {
    /// Home view of a role.
    pub fn home(role: Role) -> Self {
        match role {
            Role::Client => View::ClientDashboard,
            Role::Restaurant => View::RestaurantDashboard,
            Role::Admin => View::AdminDashboard,
        }
    }
}

/// Collaborators a session is built from.
#[derive(Clone)]
pub struct SessionContext {
    pub store: Arc<dyn KeyValueStore>,
    pub users: UserClient,
    pub carts: CartClient,
    pub orders: OrderClient,
    pub checkout: CheckoutProcessor,
    pub catalog: Arc<dyn Catalog>,
    pub status_interval: Duration,
    pub status_persistence: StatusPersistence,
}

pub struct Session {
    ctx: SessionContext,
    current_user: Option<Identity>,
    selected_restaurant: Option<Restaurant>,
    tracker: Option<StatusTracker>,
}

impl Session {
    /// Opens a session, restoring the stored identity and the cart.
    ///
    /// # Errors
    ///
    /// [`SessionError::Store`] when the stored identity does not decode.
    #[instrument(skip_all)]
    pub async fn restore(ctx: SessionContext) -> Result<Self, SessionError> {
        let current_user = match ctx.store.get(CURRENT_USER_NAMESPACE)? {
            Some(document) => {
                Some(serde_json::from_value::<Identity>(document).map_err(StoreError::from)?)
            }
            None => None,
        };
        let cart = ctx.carts.open().await?;
        info!(
            user = current_user.as_ref().map(|u| u.email.as_str()),
            cart_items = cart.len(),
            "Session restored"
        );

        Ok(Self {
            ctx,
            current_user,
            selected_restaurant: None,
            tracker: None,
        })
    }

    pub fn current_user(&self) -> Option<&Identity> {
        self.current_user.as_ref()
    }

    pub fn view(&self) -> View {
        self.current_user
            .as_ref()
            .map_or(View::Landing, |user| View::home(user.role))
    }

    // --- Identity ---

    /// Adds a user to the directory without logging them in.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Identity, SessionError> {
        let identity = self
            .ctx
            .users
            .register(UserCreate {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                role,
            })
            .await?;
        Ok(identity)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<View, SessionError> {
        let identity = self.ctx.users.authenticate(email, password).await?;
        self.sign_in(identity)
    }

    /// Logs in as the fixed demo user of `role`.
    pub async fn demo_login(&mut self, role: Role) -> Result<View, SessionError> {
        self.sign_in(Identity::demo(role))
    }

    fn sign_in(&mut self, identity: Identity) -> Result<View, SessionError> {
        let document = serde_json::to_value(&identity).map_err(StoreError::from)?;
        self.ctx.store.set(CURRENT_USER_NAMESPACE, document)?;
        info!(user_id = %identity.id, role = ?identity.role, "Logged in");
        let view = View::home(identity.role);
        self.current_user = Some(identity);
        Ok(view)
    }

    /// Clears the cart, forgets the stored identity and stops tracking.
    ///
    /// The cart is cleared first; if that fails the user stays logged in.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        self.ctx.carts.clear().await?;
        self.ctx.store.remove(CURRENT_USER_NAMESPACE)?;
        if let Some(mut tracker) = self.tracker.take() {
            tracker.stop();
        }
        self.selected_restaurant = None;
        if let Some(user) = self.current_user.take() {
            info!(user_id = %user.id, "Logged out");
        }
        Ok(())
    }

    // --- Catalog ---

    /// Restaurants matching `term`; all of them for an empty term.
    pub fn restaurants(&self, term: &str) -> Vec<Restaurant> {
        self.ctx.catalog.search(term)
    }

    /// Selects a restaurant and returns its menu grouped by category.
    pub fn open_restaurant(
        &mut self,
        restaurant_id: &str,
    ) -> Result<Vec<(String, Vec<MenuItem>)>, SessionError> {
        let restaurant = self
            .ctx
            .catalog
            .restaurant(restaurant_id)
            .ok_or_else(|| SessionError::UnknownRestaurant(restaurant_id.to_string()))?;
        let menu = group_by_category(self.ctx.catalog.list_menu_items(&restaurant.id));
        debug!(restaurant_id, categories = menu.len(), "Restaurant opened");
        self.selected_restaurant = Some(restaurant);
        Ok(menu)
    }

    pub fn selected_restaurant(&self) -> Option<&Restaurant> {
        self.selected_restaurant.as_ref()
    }

    // --- Cart ---

    pub async fn add_to_cart(&self, item: CartLineItem) -> Result<Cart, SessionError> {
        Ok(self.ctx.carts.add_item(item).await?)
    }

    /// Adds a dish from the open restaurant's menu.
    pub async fn add_menu_item(&self, menu_item_id: &str) -> Result<Cart, SessionError> {
        let restaurant = self
            .selected_restaurant
            .as_ref()
            .ok_or(SessionError::NoRestaurantSelected)?;
        let item = self
            .ctx
            .catalog
            .list_menu_items(&restaurant.id)
            .into_iter()
            .find(|item| item.id == menu_item_id)
            .ok_or_else(|| SessionError::UnknownMenuItem {
                restaurant_id: restaurant.id.clone(),
                item_id: menu_item_id.to_string(),
            })?;
        self.add_to_cart(CartLineItem::from_menu(&item, restaurant))
            .await
    }

    pub async fn remove_from_cart(&self, position: usize) -> Result<CartLineItem, SessionError> {
        Ok(self.ctx.carts.remove_item(position).await?)
    }

    pub async fn clear_cart(&self) -> Result<(), SessionError> {
        Ok(self.ctx.carts.clear().await?)
    }

    pub async fn cart(&self) -> Result<Cart, SessionError> {
        Ok(self.ctx.carts.snapshot().await?)
    }

    pub async fn cart_summary(&self) -> Result<CartSummary, SessionError> {
        Ok(self.ctx.carts.summary().await?)
    }

    // --- Orders ---

    /// Checks out the cart against the open restaurant as the current user.
    pub async fn place_order(&mut self, details: DeliveryDetails) -> Result<Order, SessionError> {
        let order = self
            .ctx
            .checkout
            .place_order(
                self.selected_restaurant.as_ref(),
                self.current_user.as_ref(),
                details,
            )
            .await?;
        Ok(order)
    }

    /// Starts tracking `order`, replacing any order tracked before.
    pub fn track_order(&mut self, order: &Order) -> StatusView {
        if let Some(mut previous) = self.tracker.take() {
            previous.stop();
        }
        let tracker = StatusTracker::start(
            order,
            self.ctx.status_interval,
            self.ctx.status_persistence.clone(),
        );
        let view = tracker.view();
        self.tracker = Some(tracker);
        view
    }

    /// Current tracking view of `order`: live while it is tracked, its
    /// recorded status otherwise.
    pub fn order_status_view(&self, order: &Order) -> StatusView {
        match &self.tracker {
            Some(tracker) if tracker.order_id() == &order.id => tracker.view(),
            _ => StatusView::new(order.id.clone(), order.status),
        }
    }

    pub fn tracker(&self) -> Option<&StatusTracker> {
        self.tracker.as_ref()
    }

    /// Orders visible to the current user: their own as a client, those of
    /// their restaurant as a restaurant, all of them as an admin.
    pub async fn order_history(&self) -> Result<Vec<Order>, SessionError> {
        let user = self.current_user.as_ref().ok_or_else(|| {
            warn!("Order history requested without login");
            SessionError::Unauthenticated
        })?;
        let orders = match user.role {
            Role::Client => self.ctx.orders.history(Some(&user.id)).await?,
            Role::Restaurant => self
                .ctx
                .orders
                .history(None)
                .await?
                .into_iter()
                .filter(|o| o.restaurant_id == user.id.0)
                .collect(),
            Role::Admin => self.ctx.orders.history(None).await?,
        };
        Ok(orders)
    }
}
