//! [`ActorEntity`] implementation for [`UserRecord`].

use crate::model::{Credential, UserCreate, UserId, UserRecord};
use crate::user_actor::UserError;
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for UserRecord {
    type Id = UserId;
    type Create = UserCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = UserError;

    fn id(&self) -> &UserId {
        &self.id
    }

    /// The password never leaves this function; only its salted hash is kept.
    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, UserError> {
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            role: params.role,
            credential: Credential::derive(&params.password),
        })
    }

    /// Emails are compared exactly, as typed.
    fn unique_key(&self) -> Option<String> {
        Some(self.email.clone())
    }

    /// Identities are fixed once registered.
    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), UserError> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), UserError> {
        Ok(())
    }
}
