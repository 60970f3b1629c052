//! Error types for the Product actor.

use crate::model::ProductStatus;
use gazon_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The provided quantity is invalid (zero).
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Adding the quantity would overflow the stock counter.
    #[error("Restocking {quantity} would overflow stock of {stock}")]
    StockOverflow { stock: u32, quantity: u32 },

    /// The product is not on sale.
    #[error("Product is not available: status {0}")]
    Unavailable(ProductStatus),

    /// The product data provided is invalid.
    #[error("Product validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ProductError {
    /// Recovers the entity's own error from a store reply.
    ///
    /// A missing id becomes [`ProductError::NotFound`], so callers can tell an
    /// absent product apart from a store that could not be reached.
    pub fn from_framework(e: FrameworkError) -> Self {
        if let Some(inner) = e.entity_error::<ProductError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}
