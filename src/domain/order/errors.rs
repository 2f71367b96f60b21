use uuid::Uuid;

use super::value_objects::{OrderId, OrderStatus};

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    #[error("Order is already cancelled")]
    AlreadyCancelled,

    #[error("Cannot move order from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    #[error("Item name cannot be empty")]
    EmptyItemName,

    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Invalid order value: {0}")]
    InvalidValue(f64),

    #[error("Unknown priority: {0}")]
    UnknownPriority(String),

    #[error("Unknown order status: {0}")]
    UnknownStatus(String),

    #[error("Aggregate not initialized")]
    NotInitialized,
}
