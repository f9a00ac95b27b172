//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns the state of
//! one resource type. It is the "Server" side of the Actor Model: messages are
//! processed one at a time, so the entity store needs no locks.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::journal::Journal;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// How many fresh ids the actor draws before giving up on a colliding generator.
const MAX_ID_ATTEMPTS: usize = 16;

/// Pending change to the collection, used to build the journal snapshot before
/// the change is committed in memory.
enum Staged<'a, T: ActorEntity> {
    Insert(&'a T),
    Replace { id: &'a T::Id, item: &'a T },
    Remove(&'a T::Id),
}

/// The generic actor that manages a collection of entities.
///
/// # Concurrency Model
/// Each `ResourceActor` runs in its own Tokio task and processes its own messages
/// *sequentially*. The cart, the order log and the user directory each get one
/// actor, so every read-modify-write of those collections is serialized by
/// construction.
///
/// # Journaling
/// An actor built with [`ResourceActor::journaled`] restores its collection from
/// the journal and, for every mutation, records the would-be collection *before*
/// committing it in memory and replying. If the journal write fails the caller
/// gets [`FrameworkError::Persistence`] and the in-memory collection is exactly
/// what it was before the request.
///
/// # Usage Pattern
///
/// 1.  **Create**: call `ResourceActor::new()` (or `journaled()`) to get the actor and its client.
/// 2.  **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate(String);
/// #[derive(Debug)] struct NoteUpdate;
/// #[derive(Debug)] enum NoteAction {}
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = u32;
///     type Create = NoteCreate;
///     type Update = NoteUpdate;
///     type Action = NoteAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = NoteError;
///
///     fn id(&self) -> &u32 { &self.id }
///     fn from_create_params(id: u32, p: NoteCreate) -> Result<Self, NoteError> {
///         Ok(Self { id, text: p.0 })
///     }
///     async fn on_update(&mut self, _: NoteUpdate, _: &()) -> Result<(), NoteError> { Ok(()) }
///     async fn handle_action(&mut self, _: NoteAction, _: &()) -> Result<(), NoteError> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let mut next = 0;
///     let (actor, client) = ResourceActor::<Note>::new(10, move || { next += 1; next });
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(NoteCreate("hello".into())).await.unwrap();
///     assert_eq!(client.get(id).await.unwrap().unwrap().text, "hello");
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    /// Insertion order of `store`, which is also the journal order.
    order: Vec<T::Id>,
    next_id: Box<dyn FnMut() -> T::Id + Send>,
    journal: Option<Box<dyn Journal<T>>>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates an in-memory `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client wait until there is space. Zero is raised to one.
    /// * `next_id` - Id generator called once per create. The actor redraws when a
    ///   generated id is already in use.
    pub fn new(
        buffer_size: usize,
        next_id: impl FnMut() -> T::Id + Send + 'static,
    ) -> (Self, ResourceClient<T>) {
        if buffer_size == 0 {
            warn!("Zero channel capacity requested, using 1");
        }
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
            next_id: Box::new(next_id),
            journal: None,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Creates a `ResourceActor` backed by `journal`, restoring its collection.
    ///
    /// # Errors
    ///
    /// Returns [`FrameworkError::Persistence`] if the journal cannot be read or
    /// holds a document that does not decode into `T`.
    pub fn journaled(
        buffer_size: usize,
        next_id: impl FnMut() -> T::Id + Send + 'static,
        journal: impl Journal<T> + 'static,
    ) -> Result<(Self, ResourceClient<T>), FrameworkError> {
        let (mut actor, client) = Self::new(buffer_size, next_id);
        for entity in journal.restore()? {
            let id = entity.id().clone();
            if actor.store.insert(id.clone(), entity).is_none() {
                actor.order.push(id);
            }
        }
        actor.journal = Some(Box::new(journal));
        Ok((actor, client))
    }

    /// Number of entities currently held, including restored ones.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Entities held before the loop starts, in journal order. Lets a factory
    /// seed its id generator from restored state.
    pub fn entities(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.store.get(id))
    }

    fn fresh_id(&mut self) -> Option<T::Id> {
        (0..MAX_ID_ATTEMPTS)
            .map(|_| (self.next_id)())
            .find(|id| !self.store.contains_key(id))
    }

    fn unique_key_taken(&self, candidate: &T) -> Option<String> {
        let key = candidate.unique_key()?;
        self.store
            .values()
            .any(|existing| existing.unique_key().as_deref() == Some(key.as_str()))
            .then_some(key)
    }

    /// Records the collection as it will look once `staged` is applied.
    fn record(&self, staged: Staged<'_, T>) -> Result<(), FrameworkError> {
        let Some(journal) = &self.journal else {
            return Ok(());
        };
        let mut entities: Vec<&T> = Vec::with_capacity(self.order.len() + 1);
        for id in &self.order {
            match &staged {
                Staged::Replace { id: replaced, item } if *replaced == id => entities.push(*item),
                Staged::Remove(removed) if *removed == id => {}
                _ => entities.extend(self.store.get(id)),
            }
        }
        if let Staged::Insert(item) = staged {
            entities.push(item);
        }
        journal.record(&entities)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. Entities can
    /// reach dependencies (other clients) that were created after the actor was
    /// instantiated but before the loop started.
    pub async fn run(mut self, context: T::Context) {
        // "Cart" instead of "foodsaas::model::cart::Cart"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, size = self.store.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let Some(id) = self.fresh_id() else {
                        warn!(entity_type, "Id generator kept colliding");
                        let _ = respond_to.send(Err(FrameworkError::Conflict(
                            "no unused id available".to_string(),
                        )));
                        continue;
                    };

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Some(key) = self.unique_key_taken(&item) {
                        warn!(entity_type, %key, "Unique key taken");
                        let _ = respond_to.send(Err(FrameworkError::Conflict(key)));
                        continue;
                    }
                    if let Err(e) = self.record(Staged::Insert(&item)) {
                        warn!(entity_type, %id, error = %e, "Journal write failed");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }

                    self.store.insert(id.clone(), item);
                    self.order.push(id.clone());
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items: Vec<T> = self
                        .order
                        .iter()
                        .filter_map(|id| self.store.get(id).cloned())
                        .collect();
                    debug!(entity_type, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(mut staged) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = staged.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Err(e) = self.record(Staged::Replace { id: &id, item: &staged }) {
                        warn!(entity_type, %id, error = %e, "Journal write failed");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    self.store.insert(id.clone(), staged.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(staged));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Err(e) = self.record(Staged::Remove(&id)) {
                        warn!(entity_type, %id, error = %e, "Journal write failed");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    self.store.remove(&id);
                    self.order.retain(|kept| kept != &id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(mut staged) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mutating = T::mutates(&action);
                    let result = match staged.handle_action(action, &context).await {
                        Ok(result) => result,
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if mutating {
                        if let Err(e) = self.record(Staged::Replace { id: &id, item: &staged }) {
                            warn!(entity_type, %id, error = %e, "Journal write failed");
                            let _ = respond_to.send(Err(e));
                            continue;
                        }
                        self.store.insert(id.clone(), staged);
                    }
                    info!(entity_type, %id, mutating, "Action ok");
                    let _ = respond_to.send(Ok(result));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
