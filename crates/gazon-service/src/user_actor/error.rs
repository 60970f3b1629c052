//! Error types for the User actor.

use gazon_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The requested user was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// The user data provided is invalid.
    #[error("User validation error: {0}")]
    ValidationError(String),

    /// The user exists but may not perform the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl UserError {
    /// Recovers the entity's own error from a store reply.
    pub fn from_framework(e: FrameworkError) -> Self {
        if let Some(inner) = e.entity_error::<UserError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            other => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}
