//! # Journals
//!
//! A journal mirrors an actor's whole collection into one namespace of a
//! [`KeyValueStore`]. The actor restores from it when it is constructed and
//! records a fresh snapshot after every committed mutation, before replying to
//! the caller. A caller that got `Ok` back can therefore crash immediately
//! without losing the change.
//!
//! Snapshots are full rewrites of the namespace (read-modify-write of the whole
//! document), which keeps them idempotent: recording the same collection twice
//! leaves the same document behind.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::store::{KeyValueStore, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Durable mirror of an actor's entity collection.
pub trait Journal<T: ActorEntity>: Send + Sync {
    /// Loads the last recorded collection, in recorded order.
    fn restore(&self) -> Result<Vec<T>, FrameworkError>;

    /// Replaces the recorded collection with `entities`.
    fn record(&self, entities: &[&T]) -> Result<(), FrameworkError>;
}

/// [`Journal`] storing the collection as a JSON array under one namespace.
#[derive(Clone)]
pub struct JsonJournal {
    store: Arc<dyn KeyValueStore>,
    namespace: String,
}

impl JsonJournal {
    pub fn new(store: Arc<dyn KeyValueStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl fmt::Debug for JsonJournal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonJournal")
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl<T> Journal<T> for JsonJournal
where
    T: ActorEntity + Serialize + DeserializeOwned,
{
    fn restore(&self) -> Result<Vec<T>, FrameworkError> {
        let Some(document) = self.store.get(&self.namespace)? else {
            return Ok(Vec::new());
        };
        let entities: Vec<T> = serde_json::from_value(document).map_err(StoreError::from)?;
        debug!(namespace = %self.namespace, count = entities.len(), "Journal restored");
        Ok(entities)
    }

    fn record(&self, entities: &[&T]) -> Result<(), FrameworkError> {
        let document = serde_json::to_value(entities).map_err(StoreError::from)?;
        self.store.set(&self.namespace, document)?;
        debug!(namespace = %self.namespace, count = entities.len(), "Journal recorded");
        Ok(())
    }
}
