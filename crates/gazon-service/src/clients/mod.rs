//! Typed clients for the three stores.
//!
//! Each wraps a [`ResourceClient`](gazon_actor::ResourceClient), turns framework
//! errors into the store's own error type and exposes domain methods. `get`,
//! `delete` and `find_by_tag` come from [`ActorClient`](gazon_actor::ActorClient).

pub mod order_client;
pub mod product_client;
pub mod user_client;

pub use order_client::OrderClient;
pub use product_client::ProductClient;
pub use user_client::UserClient;
