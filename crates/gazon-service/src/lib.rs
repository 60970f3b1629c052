//! # Gazon Service
//!
//! The order backend of the Gazon shop, built on `gazon-actor` stores:
//!
//! - **[model]**: ids, entities and DTOs ([`User`](model::User), [`Product`](model::Product), [`Order`](model::Order)).
//! - **[user_actor]**, **[product_actor]**, **[order_actor]**: the three stores and their domain rules.
//! - **[clients]**: typed wrappers such as [`OrderClient`](clients::OrderClient).
//! - **[sweep]**: expires orders left unpaid past the payment timeout and returns their stock.
//! - **[search]**: fuzzy and substring product search over the active catalog.
//! - **[config]**: environment-driven settings.
//! - **[lifecycle]**: [`GazonSystem`](lifecycle::GazonSystem), which starts and stops it all.

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod search;
pub mod sweep;
pub mod user_actor;
