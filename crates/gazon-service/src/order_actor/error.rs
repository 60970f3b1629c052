//! Error types for the Order actor.

use crate::model::{OrderId, OrderStatus, ProductId};
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use gazon_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// A product in the order is missing or not on sale.
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// The user placing the order is missing or deactivated.
    #[error("Invalid user: {0}")]
    InvalidUser(String),

    /// There is insufficient stock to fulfill the order.
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The order's status does not allow this step.
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Returning stock stopped part way. The order is still unpaid; lines already
    /// returned are recorded on it, and `pending` names the products whose units
    /// this order still holds. The next expiry returns only those.
    #[error("Restock failed for {order} ({restocked} units returned, pending {pending:?}): {reason}")]
    RestockFailed {
        order: OrderId,
        reason: String,
        restocked: u64,
        pending: Vec<ProductId>,
    },

    /// Expiry has already returned part of this order's stock.
    #[error("Order {0} is being expired")]
    Expiring(OrderId),

    /// An unpaid order still holds reserved stock.
    #[error("Order {0} still holds reserved stock")]
    StillReserved(OrderId),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    /// Recovers the entity's own error from a store reply.
    pub fn from_framework(e: FrameworkError) -> Self {
        if let Some(inner) = e.entity_error::<OrderError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<UserError> for OrderError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
            other => OrderError::InvalidUser(other.to_string()),
        }
    }
}

impl From<ProductError> for OrderError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::InsufficientStock { .. } => OrderError::InsufficientStock(e.to_string()),
            ProductError::InvalidQuantity(_) => OrderError::ValidationError(e.to_string()),
            ProductError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
            other => OrderError::InvalidProduct(other.to_string()),
        }
    }
}
