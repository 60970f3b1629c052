//! # System Lifecycle
//!
//! Starting, wiring and stopping the Gazon stores and their background work.
//!
//! ## Wiring
//!
//! Stores are created first and given their dependencies when started (see
//! [`GazonSystem::start`]):
//!
//! ```rust,ignore
//! let (user_actor, user_client) = user_actor::new(capacity);
//! let (product_actor, product_client) = product_actor::new(capacity);
//! let (order_actor, order_client) = order_actor::new(capacity);
//!
//! tokio::spawn(user_actor.run(()));
//! tokio::spawn(product_actor.run(()));
//! tokio::spawn(order_actor.run((user_client.clone(), product_client.clone())));
//! ```
//!
//! The order store depends on the user and product stores; nothing depends on the
//! order store except the sweep. The graph is acyclic, so channel closure is
//! enough to stop everything.
//!
//! ## Shutdown
//!
//! 1. **Signal the sweep** over its `watch` channel and wait for the pass in
//!    flight to finish. The sweep holds an order client.
//! 2. **Drop all clients** the system holds, including the search's.
//! 3. **Await the stores.** Each one drains its queue and exits when its last
//!    client is gone. The order store goes first, which releases its context and
//!    lets the user and product stores stop.
//!
//! ## Observability
//!
//! Binaries call [`gazon_actor::tracing::setup_tracing`] once at startup:
//!
//! ```bash
//! RUST_LOG=info gazon       # Compact logs
//! RUST_LOG=debug gazon      # Full payloads
//! ```

pub mod system;

pub use system::*;
