use crate::cart_actor;
use crate::catalog::Catalog;
use crate::checkout::CheckoutProcessor;
use crate::clients::{CartClient, OrderClient, UserClient};
use crate::config::{MarketplaceConfig, StatusPersistenceMode};
use crate::order_actor;
use crate::session::{Session, SessionContext, SessionError};
use crate::status::StatusPersistence;
use crate::user_actor;
use actor_framework::{FileStore, FrameworkError, KeyValueStore, MemoryStore, StoreError};
use std::sync::Arc;
use tracing::{error, info};

/// Errors raised while starting or stopping the system.
#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("Could not open the data directory: {0}")]
    Store(#[from] StoreError),
    #[error("Could not restore actor state: {0}")]
    Restore(#[from] FrameworkError),
    #[error("Actor task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// The runtime orchestrator for the marketplace's actors.
///
/// `OrderSystem` is responsible for:
/// - **Storage**: opening the store every journal writes to
/// - **Lifecycle Management**: starting and stopping the cart, order and user actors
/// - **Session wiring**: building [`Session`]s and [`CheckoutProcessor`]s on top of them
///
/// # Example
///
/// ```rust
/// use foodsaas::catalog::StaticCatalog;
/// use foodsaas::config::MarketplaceConfig;
/// use foodsaas::lifecycle::OrderSystem;
/// use foodsaas::model::Role;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = OrderSystem::start(MarketplaceConfig::default())?;
///
///     let mut session = system.session(Arc::new(StaticCatalog::demo())).await?;
///     session.demo_login(Role::Client).await?;
///     session.logout().await?;
///     drop(session);
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct OrderSystem {
    /// Client for the session cart
    pub cart_client: CartClient,

    /// Client for the order log
    pub order_client: OrderClient,

    /// Client for the user directory
    pub user_client: UserClient,

    store: Arc<dyn KeyValueStore>,
    config: MarketplaceConfig,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Opens the configured store and starts every actor on it.
    ///
    /// Must be called inside a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Fails when the data directory cannot be created or a namespace holds a
    /// document that does not decode.
    pub fn start(config: MarketplaceConfig) -> Result<Self, SystemError> {
        let store: Arc<dyn KeyValueStore> = match &config.data_dir {
            Some(dir) => Arc::new(FileStore::open(dir)?),
            None => Arc::new(MemoryStore::new()),
        };
        Self::with_store(config, store)
    }

    /// Starts every actor on an existing store.
    pub fn with_store(
        config: MarketplaceConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, SystemError> {
        let capacity = config.channel_capacity;

        // 1. Create actors, each restoring its namespace
        let (cart_actor, cart_client) = cart_actor::journaled(capacity, store.clone())?;
        let (order_actor, order_client) = order_actor::journaled(capacity, store.clone())?;
        let (user_actor, user_client) = user_actor::journaled(capacity, store.clone())?;

        // 2. Start actors; none of them needs another one (Context = ())
        let handles = vec![
            tokio::spawn(cart_actor.run(())),
            tokio::spawn(order_actor.run(())),
            tokio::spawn(user_actor.run(())),
        ];
        info!(persistent = config.data_dir.is_some(), "Order system started");

        Ok(Self {
            cart_client,
            order_client,
            user_client,
            store,
            config,
            handles,
        })
    }

    pub fn config(&self) -> &MarketplaceConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        self.store.clone()
    }

    pub fn checkout(&self) -> CheckoutProcessor {
        CheckoutProcessor::new(
            self.cart_client.clone(),
            self.order_client.clone(),
            self.config.fallback_delivery_fee,
        )
    }

    pub fn status_persistence(&self) -> StatusPersistence {
        match self.config.status_persistence {
            StatusPersistenceMode::Ephemeral => StatusPersistence::Ephemeral,
            StatusPersistenceMode::OrderLog => {
                StatusPersistence::OrderLog(self.order_client.clone())
            }
        }
    }

    /// Opens a session, restoring the persisted current user and cart.
    pub async fn session(&self, catalog: Arc<dyn Catalog>) -> Result<Session, SessionError> {
        Session::restore(SessionContext {
            store: self.store(),
            users: self.user_client.clone(),
            carts: self.cart_client.clone(),
            orders: self.order_client.clone(),
            checkout: self.checkout(),
            catalog,
            status_interval: self.config.status_interval(),
            status_persistence: self.status_persistence(),
        })
        .await
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Drops the system's clients and waits for every actor loop to finish.
    /// Sessions must be dropped first, or their client clones keep the actors
    /// alive.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::Join`] if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        // Step 1: Close all channels by dropping clients
        drop(self.cart_client);
        drop(self.order_client);
        drop(self.user_client);

        // Step 2: Wait for all actor tasks to complete
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
