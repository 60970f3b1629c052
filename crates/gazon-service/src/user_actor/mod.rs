//! # User Actor
//!
//! Manages customer and staff accounts.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](gazon_actor::ActorEntity) implementation for [`User`]
//! - [`error`] - [`UserError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use gazon_service::model::{Role, UserCreate};
//! use gazon_service::user_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = user_actor::new(32);
//!
//!     // No dependencies, so the context is ()
//!     tokio::spawn(actor.run(()));
//!
//!     let params = UserCreate {
//!         name: "Alice".to_string(),
//!         email: "alice@example.com".to_string(),
//!         role: Role::Customer,
//!     };
//!     let id = client.create_user(params).await?;
//!     client.deactivate(id).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Soft delete**: [`UserClient::deactivate`] clears `active`; the account stays queryable
//! - **Role index**: users are filed under their [`Role`](crate::model::Role)
//! - **Role check**: [`UserClient::require_admin`]

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::model::User;
use gazon_actor::ResourceActor;

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, UserClient::new(generic_client))
}
