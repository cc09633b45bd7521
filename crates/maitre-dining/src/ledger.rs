//! Per-guest recommendation ledger.

use std::sync::Arc;

use tracing::debug;

use maitre_models::{DishId, GuestId, Modifications, Recommendation};
use maitre_persistence::JsonStore;

use crate::error::Result;

/// The accepted-modifications ledger for one guest.
///
/// Opening the ledger loads the guest's existing recommendation record (a
/// prior visit may have left one) or starts an empty one; there is exactly
/// one record per guest. Stored modification sets merge rather than
/// replace; an empty incoming set is a no-op, never a clear.
pub struct RecommendationLedger {
    store: Arc<JsonStore<Recommendation>>,
    record: Recommendation,
}

impl RecommendationLedger {
    /// Opens the ledger for a guest, creating an empty record if none is
    /// stored.
    pub fn open(store: Arc<JsonStore<Recommendation>>, guest_id: GuestId) -> Self {
        let record = store
            .find(|r| r.guest_id == guest_id)
            .unwrap_or_else(|| Recommendation::new(guest_id.clone()));

        debug!(guest_id = %guest_id, dishes = record.dishes.len(), "opened ledger");
        Self { store, record }
    }

    /// The guest this ledger belongs to.
    pub fn guest_id(&self) -> &GuestId {
        &self.record.guest_id
    }

    /// Returns the accepted modification set for a dish, empty if none.
    pub fn modifications_for(&self, dish_id: &DishId) -> Modifications {
        self.record.modifications_for(dish_id)
    }

    /// Merges a modification set into the dish's ledger entry and persists.
    ///
    /// An empty set is a no-op (nothing is written). Merging is idempotent:
    /// storing the same set twice leaves the ledger as after the first.
    pub fn store_modifications(
        &mut self,
        dish_id: DishId,
        modifications: &Modifications,
    ) -> Result<()> {
        if !self.record.merge_dish(dish_id, modifications) {
            return Ok(());
        }
        self.store.save(&self.record)?;
        Ok(())
    }

    /// The full ledger record.
    pub fn record(&self) -> &Recommendation {
        &self.record
    }

    /// Dish ids with accepted modifications, in id order.
    pub fn dish_ids(&self) -> Vec<DishId> {
        self.record.dishes.keys().cloned().collect()
    }
}
