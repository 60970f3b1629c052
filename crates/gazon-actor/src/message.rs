//! # Store Messages
//!
//! Requests sent from a `ResourceClient` to its `ResourceActor`, each carrying a
//! oneshot channel for the reply.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A caller-supplied filter evaluated inside the actor against every stored entity.
pub struct Predicate<T>(Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Predicate<T> {
    pub fn new(f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Message type sent to the actor to request operations.
///
/// CRUD on a single resource, a custom `Action`, and two queries:
///
/// - **FindByTag**: direct lookup through the tag index maintained by the actor.
/// - **Filter**: scan of the whole store with a [`Predicate`].
///
/// Both queries return entities in id order.
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
    FindByTag {
        tag: T::Tag,
        respond_to: Response<Vec<T>>,
    },
    Filter {
        predicate: Predicate<T>,
        respond_to: Response<Vec<T>>,
    },
}
