//! # Mock Clients
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of scripted expectations instead of a running actor.
//! Use it to test code that sits *around* a client (orchestrators such as a
//! checkout) and to inject failures that are awkward to provoke for real, like
//! a journal that refuses to write.
//!
//! | | MockClient | Real Actor |
//! |---|---|---|
//! | **State** | None, replies are scripted | Real entity store |
//! | **Error injection** | `return_err` | Needs a failing store |
//! | **Use case** | Logic around the client | The actor itself, full flows |
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError, StoreError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Ticket { id: u32 }
//! #[derive(Debug)] struct TicketCreate;
//! #[derive(Debug)] struct TicketUpdate;
//! #[derive(Debug)] enum TicketAction {}
//! #[derive(Debug, thiserror::Error)] #[error("ticket error")] struct TicketError;
//!
//! #[async_trait]
//! impl ActorEntity for Ticket {
//!     type Id = u32; type Create = TicketCreate; type Update = TicketUpdate;
//!     type Action = TicketAction; type ActionResult = (); type Context = (); type Error = TicketError;
//!     fn id(&self) -> &u32 { &self.id }
//!     fn from_create_params(id: u32, _: TicketCreate) -> Result<Self, TicketError> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: TicketUpdate, _: &()) -> Result<(), TicketError> { Ok(()) }
//!     async fn handle_action(&mut self, _: TicketAction, _: &()) -> Result<(), TicketError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Ticket>::new();
//!     mock.expect_create().return_err(FrameworkError::Persistence(
//!         StoreError::Unavailable("quota exceeded".into()),
//!     ));
//!
//!     let result = mock.client().create(TicketCreate).await;
//!     assert!(matches!(result, Err(FrameworkError::Persistence(_))));
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

/// A scripted reply, consumed in FIFO order.
enum Expectation<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    Update(Result<T, FrameworkError>),
    Delete(Result<(), FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
}

impl<T: ActorEntity> Expectation<T> {
    fn name(&self) -> &'static str {
        match self {
            Expectation::Get(_) => "get",
            Expectation::List(_) => "list",
            Expectation::Create(_) => "create",
            Expectation::Update(_) => "update",
            Expectation::Delete(_) => "delete",
            Expectation::Action(_) => "action",
        }
    }
}

fn request_name<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Get { .. } => "get",
        ResourceRequest::List { .. } => "list",
        ResourceRequest::Create { .. } => "create",
        ResourceRequest::Update { .. } => "update",
        ResourceRequest::Delete { .. } => "delete",
        ResourceRequest::Action { .. } => "action",
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock client with expectation tracking.
///
/// Requests that do not match the next expectation are answered by dropping the
/// reply channel (the caller sees [`FrameworkError::ActorDropped`]) and are
/// reported by [`MockClient::verify`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a
    /// Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let seen = mismatches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get(reply))) => {
                        let _ = respond_to.send(reply);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List(reply))) => {
                        let _ = respond_to.send(reply);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create(reply)),
                    ) => {
                        let _ = respond_to.send(reply);
                    }
                    (
                        ResourceRequest::Update { respond_to, .. },
                        Some(Expectation::Update(reply)),
                    ) => {
                        let _ = respond_to.send(reply);
                    }
                    (
                        ResourceRequest::Delete { respond_to, .. },
                        Some(Expectation::Delete(reply)),
                    ) => {
                        let _ = respond_to.send(reply);
                    }
                    (
                        ResourceRequest::Action { respond_to, .. },
                        Some(Expectation::Action(reply)),
                    ) => {
                        let _ = respond_to.send(reply);
                    }
                    (request, expectation) => {
                        let expected = expectation.as_ref().map_or("nothing", Expectation::name);
                        lock(&seen).push(format!(
                            "got {} request, expected {expected}",
                            request_name(&request)
                        ));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        lock(&self.expectations).push_back(expectation);
    }

    /// Expects a `get`.
    pub fn expect_get(&mut self) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, Expectation::Get)
    }

    /// Expects a `list`.
    pub fn expect_list(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(self, Expectation::List)
    }

    /// Expects a `create`.
    pub fn expect_create(&mut self) -> ExpectationBuilder<'_, T, T::Id> {
        ExpectationBuilder::new(self, Expectation::Create)
    }

    /// Expects an `update`.
    pub fn expect_update(&mut self) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, Expectation::Update)
    }

    /// Expects a `delete`.
    pub fn expect_delete(&mut self) -> ExpectationBuilder<'_, T, ()> {
        ExpectationBuilder::new(self, Expectation::Delete)
    }

    /// Expects a `perform_action`.
    pub fn expect_action(&mut self) -> ExpectationBuilder<'_, T, T::ActionResult> {
        ExpectationBuilder::new(self, Expectation::Action)
    }

    /// Panics unless every expectation was consumed by a matching request.
    pub fn verify(&self) {
        let mismatches = lock(&self.mismatches);
        if !mismatches.is_empty() {
            panic!("Unexpected requests: {}", mismatches.join("; "));
        }
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Fluent builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<'a, T: ActorEntity, R> {
    mock: &'a MockClient<T>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<'a, T: ActorEntity, R> ExpectationBuilder<'a, T, R> {
    fn new(mock: &'a MockClient<T>, wrap: fn(Result<R, FrameworkError>) -> Expectation<T>) -> Self {
        Self { mock, wrap }
    }

    /// Answers the request with `value`.
    pub fn return_ok(self, value: R) {
        self.mock.push((self.wrap)(Ok(value)));
    }

    /// Answers the request with `error`.
    pub fn return_err(self, error: FrameworkError) {
        self.mock.push((self.wrap)(Err(error)));
    }
}

/// Creates a client wired to a bare receiver, for tests that want to inspect
/// the raw requests and answer them by hand.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}
