//! # Generic Messages
//!
//! Request types exchanged between `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants are the CRUD lifecycle of a resource plus `List` for ordered
/// reads of the whole collection and `Action` for resource-specific logic:
///
/// - **Create**: uses [`ActorEntity::Create`] to initialize a new resource.
/// - **Get**: fetches the current state of one resource by id.
/// - **List**: every live resource, in insertion (or restore) order.
/// - **Update**: modifies an existing resource with [`ActorEntity::Update`].
/// - **Delete**: removes the resource.
/// - **Action**: executes a custom [`ActorEntity::Action`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
