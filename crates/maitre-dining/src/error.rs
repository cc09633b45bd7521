//! Error types for the dining services.

use thiserror::Error;

use maitre_models::{OrderId, TableId};
use maitre_persistence::StoreError;

/// Errors that can occur in dining-floor operations.
#[derive(Error, Debug)]
pub enum DiningError {
    /// A referenced entity has no match in its store.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. "table" or "guest".
        kind: &'static str,
        /// The id that failed to resolve.
        id: String,
    },

    /// The table already holds a guest. The condition will not change on
    /// its own, so callers must not retry.
    #[error("table already occupied: {0}")]
    TableOccupied(TableId),

    /// The order was already placed; placed orders are immutable.
    #[error("order already placed: {0}")]
    OrderAlreadyPlaced(OrderId),

    /// Placement was requested for an order with no dishes.
    #[error("no dishes in order: {0}")]
    EmptyOrder(OrderId),

    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for dining operations.
pub type Result<T> = std::result::Result<T, DiningError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DiningError::NotFound {
            kind: "table",
            id: "T9".to_string(),
        };
        assert_eq!(err.to_string(), "table not found: T9");

        let err = DiningError::TableOccupied(TableId::from("T1"));
        assert_eq!(err.to_string(), "table already occupied: T1");

        let err = DiningError::EmptyOrder(OrderId::from("order-1"));
        assert_eq!(err.to_string(), "no dishes in order: order-1");
    }
}
