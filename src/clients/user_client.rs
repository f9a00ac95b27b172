//! # User Client
//!
//! Registration and login against the user directory.
use crate::model::{Identity, UserCreate, UserRecord};
use crate::user_actor::UserError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument, warn};

/// Client for interacting with the User actor.
#[derive(Clone, Debug)]
pub struct UserClient {
    inner: ResourceClient<UserRecord>,
}

impl ActorClient<UserRecord> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<UserRecord> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> UserError {
        match e {
            FrameworkError::Conflict(email) => UserError::DuplicateEmail(email),
            FrameworkError::Persistence(e) => UserError::Persistence(e.to_string()),
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            other => other
                .into_entity_error::<UserError>()
                .unwrap_or_else(|e| UserError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl UserClient {
    pub fn new(inner: ResourceClient<UserRecord>) -> Self {
        Self { inner }
    }

    /// Adds a user to the directory. Fails with [`UserError::DuplicateEmail`]
    /// when the email is taken, leaving the directory unchanged.
    #[instrument(skip(self))]
    pub async fn register(&self, params: UserCreate) -> Result<Identity, UserError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        let record = self
            .get(id.clone())
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        Ok(record.identity())
    }

    /// Looks up `email` (exact match) and checks `password` against its hash.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, UserError> {
        let directory = self.list().await?;
        match directory.iter().find(|user| user.email == email) {
            Some(user) if user.credential.verify(password) => Ok(user.identity()),
            _ => {
                warn!("Login rejected");
                Err(UserError::InvalidCredentials)
            }
        }
    }
}
