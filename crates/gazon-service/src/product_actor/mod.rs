//! # Product Actor
//!
//! The inventory store: catalog entries and their sellable stock.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](gazon_actor::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for stock management
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Custom Actions
//!
//! ```rust,ignore
//! // Read the stock level
//! let stock = product_client.check_stock(product_id).await?;
//!
//! // Take units for an order (fails if not enough, or the product is not active)
//! product_client.reserve_stock(product_id, quantity).await?;
//!
//! // Give units back (expired or failed orders)
//! let stock = product_client.restock(product_id, quantity).await?;
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use gazon_service::model::ProductCreate;
//! use gazon_service::product_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let params = ProductCreate {
//!         name: "Widget".to_string(),
//!         price: 29.99,
//!         stock: 100,
//!     };
//!     let id = client.create_product(params).await?;
//!     client.reserve_stock(id, 5).await?;
//!     assert_eq!(client.check_stock(id).await?, 95);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use gazon_actor::ResourceActor;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}
