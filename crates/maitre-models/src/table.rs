//! Dining tables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::ids::{GuestId, TableId};

/// A table on the floor.
///
/// Invariant: `occupied` is true exactly when `guest_id` is set. The two
/// fields are only ever mutated together through [`Table::assign`] and
/// [`Table::release`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Unique identifier for the table.
    pub id: TableId,

    /// Number of seats.
    pub capacity: u32,

    /// Environment tags, e.g. "window", "outdoor", "quiet".
    #[serde(default)]
    pub environment: BTreeSet<String>,

    /// Whether a guest currently holds the table.
    #[serde(default)]
    pub occupied: bool,

    /// The guest the table is allotted to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<GuestId>,
}

impl Table {
    /// Creates a new unoccupied table.
    pub fn new(capacity: u32) -> Self {
        Self {
            id: TableId::new(),
            capacity,
            environment: BTreeSet::new(),
            occupied: false,
            guest_id: None,
        }
    }

    /// Sets the environment tags.
    pub fn with_environment<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environment = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if the table can be allotted.
    pub fn is_available(&self) -> bool {
        !self.occupied
    }

    /// Assigns the table to a guest, setting both occupancy fields together.
    pub fn assign(&mut self, guest_id: GuestId) {
        self.occupied = true;
        self.guest_id = Some(guest_id);
    }

    /// Clears occupancy, making the table allotable again.
    pub fn release(&mut self) {
        self.occupied = false;
        self.guest_id = None;
    }

    /// Number of the given preference tags this table's environment matches,
    /// case-insensitively.
    pub fn preference_matches(&self, preferences: &[String]) -> usize {
        preferences
            .iter()
            .filter(|p| {
                let p = p.to_lowercase();
                self.environment.iter().any(|tag| tag.to_lowercase() == p)
            })
            .count()
    }
}
