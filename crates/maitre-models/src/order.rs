//! Guest orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{DishId, GuestId, OrderId};
use crate::modifications::Modifications;

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    /// Order is being assembled and may still change.
    #[default]
    Open,
    /// Order has been sent to the kitchen and is immutable.
    Placed,
}

/// One dish on an order, with its final modification set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// The dish being ordered.
    pub dish_id: DishId,

    /// Modifications as accepted in the recommendation ledger at add time.
    #[serde(default)]
    pub modifications: Modifications,
}

/// A guest's order.
///
/// `dishes` preserves add order; a dish id appears at most once, and
/// re-adding a dish updates its modification set in place. State
/// transitions here are unconditional; the aggregator service enforces the
/// placement preconditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier for the order.
    pub id: OrderId,

    /// The guest this order belongs to. One active order per guest.
    pub guest_id: GuestId,

    /// Ordered dishes, oldest first.
    #[serde(default)]
    pub dishes: Vec<OrderLine>,

    /// Current lifecycle state.
    #[serde(default)]
    pub state: OrderState,

    /// When the order was created.
    pub created_at: DateTime<Utc>,

    /// When the order was placed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Creates an empty open order for a guest.
    pub fn new(guest_id: GuestId) -> Self {
        Self {
            id: OrderId::new(),
            guest_id,
            dishes: Vec::new(),
            state: OrderState::Open,
            created_at: Utc::now(),
            placed_at: None,
        }
    }

    /// Returns true once the order has been placed.
    pub fn is_placed(&self) -> bool {
        self.state == OrderState::Placed
    }

    /// Returns true if no dishes have been added.
    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    /// Adds a dish or replaces the modification set of an existing line.
    pub fn upsert_line(&mut self, dish_id: DishId, modifications: Modifications) {
        match self.dishes.iter_mut().find(|line| line.dish_id == dish_id) {
            Some(line) => line.modifications = modifications,
            None => self.dishes.push(OrderLine {
                dish_id,
                modifications,
            }),
        }
    }

    /// Marks the order placed and stamps the placement time.
    pub fn place(&mut self) {
        self.state = OrderState::Placed;
        self.placed_at = Some(Utc::now());
    }
}
