//! # Observability
//!
//! Every store logs through `tracing` with `entity_type` and the entity id as
//! structured fields:
//!
//! ```text
//! INFO Actor started entity_type="Order"
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO Action ok entity_type="Product" id=product_5
//! ```
//!
//! Payloads are only logged at `debug` (`RUST_LOG=debug`).

/// Installs the global subscriber for binaries.
///
/// Filtering follows `RUST_LOG` (defaulting to `info`). Module paths are hidden
/// since every event already carries `entity_type` or a span name.
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
