//! Error types for the User actor.

use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// Another user already registered this email.
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The requested user was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// The user directory could not be written; nothing was changed.
    #[error("User directory persistence error: {0}")]
    Persistence(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
