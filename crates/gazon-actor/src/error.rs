//! # Framework Errors
//!
//! Failures of the store plumbing itself, shared by every actor and client.
//! Entity-level failures travel inside [`FrameworkError::EntityError`].

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("No ids left to assign")]
    IdsExhausted,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's own error type if this wraps one.
    pub fn entity_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            FrameworkError::EntityError(e) => e.downcast_ref::<E>(),
            _ => None,
        }
    }
}
