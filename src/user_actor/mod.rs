//! # User Actor
//!
//! The user directory. Registration creates a [`UserRecord`]; the email is the
//! record's unique key, so a second registration with the same email is turned
//! away by the actor before anything is written. Login reads the directory and
//! checks the salted hash.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`UserRecord`]
//! - [`credentials`] - salted SHA-256 password hashes
//! - [`error`] - [`UserError`]
//! - [`new()`] / [`journaled()`] - Factory functions that create the actor and its client

pub mod credentials;
pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::ids::monotonic_millis;
use crate::model::{UserId, UserRecord};
use actor_framework::{FrameworkError, JsonJournal, KeyValueStore, ResourceActor};
use std::sync::atomic::AtomicI64;
use std::sync::Arc;

/// Namespace the user directory is journaled under.
pub const USER_NAMESPACE: &str = "foodsaas_users";

fn user_ids() -> impl FnMut() -> UserId + Send + 'static {
    let last = AtomicI64::new(0);
    move || UserId(format!("user-{}", monotonic_millis(&last)))
}

/// Creates an in-memory User actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<UserRecord>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(capacity, user_ids());
    (actor, UserClient::new(generic_client))
}

/// Creates a User actor restored from, and journaled to, `store`.
pub fn journaled(
    capacity: usize,
    store: Arc<dyn KeyValueStore>,
) -> Result<(ResourceActor<UserRecord>, UserClient), FrameworkError> {
    let journal = JsonJournal::new(store, USER_NAMESPACE);
    let (actor, generic_client) = ResourceActor::journaled(capacity, user_ids(), journal)?;
    Ok((actor, UserClient::new(generic_client)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, UserCreate};
    use actor_framework::ActorClient;

    #[tokio::test]
    async fn test_registered_identity_is_fixed() {
        let (actor, client) = new(8);
        tokio::spawn(actor.run(()));

        let identity = client
            .register(UserCreate {
                name: "Carla".into(),
                email: "carla@example.com".into(),
                password: "tacos".into(),
                role: Role::Client,
            })
            .await
            .unwrap();

        let updated = client.inner().update(identity.id.clone(), ()).await.unwrap();
        assert_eq!(updated.identity(), identity);

        let stored = client.get(identity.id.clone()).await.unwrap().unwrap();
        assert_eq!(stored.identity(), identity);
        assert!(stored.credential.verify("tacos"));
    }
}
