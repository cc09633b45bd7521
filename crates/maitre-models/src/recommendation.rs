//! Per-guest recommendation records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ids::{DishId, GuestId, RecommendationId};
use crate::modifications::Modifications;

/// The accepted-modifications record for one guest.
///
/// `dishes` is an explicit ordered mapping of dish id to modification set,
/// so a dish appears at most once and lookups never scan. Updates merge
/// key-wise into the existing set; an empty incoming set leaves prior state
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Unique identifier for the record.
    pub id: RecommendationId,

    /// The guest this recommendation belongs to. One active record per guest.
    pub guest_id: GuestId,

    /// Recommended dishes and their accepted modification sets.
    #[serde(default)]
    pub dishes: BTreeMap<DishId, Modifications>,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When a modification set last changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Recommendation {
    /// Creates an empty recommendation record for a guest.
    pub fn new(guest_id: GuestId) -> Self {
        Self {
            id: RecommendationId::new(),
            guest_id,
            dishes: BTreeMap::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Returns the recorded modification set for a dish, empty if none.
    pub fn modifications_for(&self, dish_id: &DishId) -> Modifications {
        self.dishes.get(dish_id).cloned().unwrap_or_default()
    }

    /// Merges a modification set into the entry for a dish.
    ///
    /// An empty incoming set is a no-op and returns false; prior state is
    /// preserved rather than cleared. Otherwise the incoming keys merge into
    /// any existing set (incoming values win), creating the entry if absent,
    /// and true is returned.
    pub fn merge_dish(&mut self, dish_id: DishId, incoming: &Modifications) -> bool {
        if incoming.is_empty() {
            return false;
        }
        self.dishes.entry(dish_id).or_default().merge(incoming);
        self.updated_at = Some(Utc::now());
        true
    }
}
