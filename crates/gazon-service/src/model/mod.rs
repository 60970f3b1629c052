//! Plain data types for the Gazon stores: ids, entities and their DTOs.
//!
//! The [`ActorEntity`](gazon_actor::ActorEntity) implementations live next to each
//! actor (`user_actor::entity`, `product_actor::entity`, `order_actor::entity`).

pub mod order;
pub mod product;
pub mod user;

pub use order::*;
pub use product::*;
pub use user::*;
