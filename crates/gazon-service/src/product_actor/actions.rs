//! Custom actions for the Product actor.
//!
//! Stock moves through actions rather than plain updates so each check-and-write
//! happens inside one message. See
//! [`impl ActorEntity for Product`](crate::model::Product#impl-ActorEntity-for-Product)
//! for the implementation.

/// Custom actions for Product entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Takes units out of sellable stock for an order.
    ///
    /// # Errors
    /// Fails if the quantity is zero, exceeds the available stock, or the product
    /// is not active.
    ReserveStock(u32),
    /// Puts units back into stock. Allowed in any status.
    Restock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// Current stock level.
    CheckStock(u32),
    /// Stock remaining after the reservation.
    ReserveStock(u32),
    /// Stock after the units were returned.
    Restock(u32),
}
