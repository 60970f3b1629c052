//! # Gazon Actor
//!
//! Channel-driven resource stores for the Gazon backend.
//!
//! Each resource type (users, products, orders) lives in its own store task, a
//! [`ResourceActor`], which owns its entities outright and applies requests one at
//! a time. Callers talk to it through a cheap, cloneable [`ResourceClient`]. Because
//! a store is the single writer of its entities, every request (including a domain
//! [`Action`](ActorEntity::Action) that reads, checks and writes an entity) is
//! atomic with respect to every other request on that store. The order store uses
//! this to make "expire if still unpaid" a compare-and-set on the order's status.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the domain type, its DTOs, hooks and actions.
//! 2. **Store** ([`ResourceActor`]): sequential message processing, id assignment,
//!    tag index.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed async requests.
//!
//! ## Queries
//!
//! Entities report a [`tag`](ActorEntity::tag) (an order's status, a product's
//! status). The store keeps an index from tag to ids, so
//! [`ResourceClient::find_by_tag`] is a direct lookup. Arbitrary conditions go
//! through [`ResourceClient::filter`], which scans the store.
//!
//! ## Context Injection
//!
//! Dependencies are passed to `run()`, not `new()`, so stores that call each other
//! can be created first and wired afterwards:
//!
//! ```rust,ignore
//! let (user_actor, users) = ResourceActor::<User>::new(32);
//! let (product_actor, products) = ResourceActor::<Product>::new(32);
//! let (order_actor, orders) = ResourceActor::<Order>::new(32);
//!
//! tokio::spawn(user_actor.run(()));
//! tokio::spawn(product_actor.run(()));
//! tokio::spawn(order_actor.run((users.clone(), products.clone())));
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a store's requests from scripted expectations, so an
//! actor can be tested against mocked dependencies.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Predicate, ResourceRequest, Response};
