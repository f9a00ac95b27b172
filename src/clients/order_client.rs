//! # Order Client
//!
//! Provides a high-level API for the order log: append at checkout, record
//! status changes, read history.
use crate::model::{Order, OrderAction, OrderCreate, OrderId, OrderStatus, UserId};
use crate::order_actor::OrderError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone, Debug)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> OrderError {
        match e {
            FrameworkError::Persistence(e) => OrderError::Persistence(e.to_string()),
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => other
                .into_entity_error::<OrderError>()
                .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Appends an order to the log and returns the stored record.
    #[instrument(skip(self, params), fields(restaurant_id = %params.restaurant_id, items = params.items.len()))]
    pub async fn place(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!(?params, "place called");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order_id = %id, "Order appended");
        self.get(id.clone())
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn record_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<OrderStatus, OrderError> {
        self.inner
            .perform_action(id, OrderAction::RecordStatus(status))
            .await
            .map_err(Self::map_error)
    }

    /// Orders in placement order, optionally only those of one user.
    #[instrument(skip(self))]
    pub async fn history(&self, owner: Option<&UserId>) -> Result<Vec<Order>, OrderError> {
        let orders = self.list().await?;
        Ok(match owner {
            Some(owner) => orders.into_iter().filter(|o| &o.user_id == owner).collect(),
            None => orders,
        })
    }
}
