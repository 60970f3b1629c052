//! # Order Actor
//!
//! The order store. Orders depend on the other two stores, which are injected as
//! the actor's context when it is started:
//!
//! ```rust,ignore
//! let (order_actor, orders) = order_actor::new(32);
//! tokio::spawn(order_actor.run((users.clone(), products.clone())));
//! ```
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](gazon_actor::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`actions`] - [`OrderAction`], [`OrderActionResult`] and [`Expiry`]
//!
//! ## Atomicity
//!
//! The store handles one message at a time, and an action's hook runs to
//! completion (including its calls to the product store) before the next message
//! is read. `ExpireIfUnpaid` therefore cannot interleave with a `Pay` for the same
//! order. Whichever arrives first wins and the other sees the new status.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use gazon_actor::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
