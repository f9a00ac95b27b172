//! # Cart Client
//!
//! The Cart Manager surface: add, remove by position, clear, subtotal. Every
//! mutating call returns only after the new cart was journaled.
use crate::cart_actor::CartError;
use crate::model::{
    Cart, CartAction, CartActionResult, CartCreate, CartLineItem, CartSummary, SESSION_CART_ID,
};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone, Debug)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> CartError {
        match e {
            FrameworkError::Persistence(e) => CartError::Persistence(e.to_string()),
            other => other
                .into_entity_error::<CartError>()
                .unwrap_or_else(|e| CartError::ActorCommunicationError(e.to_string())),
        }
    }
}

fn unexpected(result: CartActionResult) -> CartError {
    CartError::ActorCommunicationError(format!("unexpected cart reply: {result:?}"))
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }

    async fn act(&self, action: CartAction) -> Result<CartActionResult, CartError> {
        self.inner
            .perform_action(SESSION_CART_ID.to_string(), action)
            .await
            .map_err(Self::map_error)
    }

    /// Returns the session cart, creating an empty one on first use.
    #[instrument(skip(self))]
    pub async fn open(&self) -> Result<Cart, CartError> {
        if let Some(cart) = self.get(SESSION_CART_ID.to_string()).await? {
            debug!(items = cart.len(), "Cart restored");
            return Ok(cart);
        }
        let id = self
            .inner
            .create(CartCreate)
            .await
            .map_err(Self::map_error)?;
        info!(%id, "Cart created");
        self.snapshot().await
    }

    #[instrument(skip(self), fields(item_id = %item.id, restaurant_id = %item.restaurant_id))]
    pub async fn add_item(&self, item: CartLineItem) -> Result<Cart, CartError> {
        match self.act(CartAction::AddItem(item)).await? {
            CartActionResult::Snapshot(cart) => Ok(cart),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, position: usize) -> Result<CartLineItem, CartError> {
        match self.act(CartAction::RemoveItem(position)).await? {
            CartActionResult::Removed(item) => Ok(item),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), CartError> {
        match self.act(CartAction::Clear).await? {
            CartActionResult::Snapshot(_) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    pub async fn subtotal(&self) -> Result<Decimal, CartError> {
        match self.act(CartAction::Subtotal).await? {
            CartActionResult::Subtotal(amount) => Ok(amount),
            other => Err(unexpected(other)),
        }
    }

    pub async fn snapshot(&self) -> Result<Cart, CartError> {
        match self.act(CartAction::Snapshot).await? {
            CartActionResult::Snapshot(cart) => Ok(cart),
            other => Err(unexpected(other)),
        }
    }

    pub async fn summary(&self) -> Result<CartSummary, CartError> {
        Ok(CartSummary::from(&self.snapshot().await?))
    }
}
