//! Per-guest order assembly and placement.

use std::sync::Arc;

use tracing::{debug, info};

use maitre_models::{DishId, Guest, GuestId, Modifications, Order, OrderLine};
use maitre_persistence::JsonStore;

use crate::error::{DiningError, Result};
use crate::ledger::RecommendationLedger;

/// Assembles one guest's order and places it exactly once.
///
/// Opening the aggregator loads the guest's open order if a prior call left
/// one, or starts a new order. Placement is terminal: an empty order cannot
/// be placed, a second placement is rejected, and any mutation after
/// placement is a protocol violation surfaced as
/// [`DiningError::OrderAlreadyPlaced`].
pub struct OrderAggregator {
    store: Arc<JsonStore<Order>>,
    guests: Arc<JsonStore<Guest>>,
    order: Order,
}

impl OrderAggregator {
    /// Opens the aggregator for a guest, resuming an open order if one is
    /// stored. Placed orders are history, not resumable state.
    pub fn open(
        store: Arc<JsonStore<Order>>,
        guests: Arc<JsonStore<Guest>>,
        guest_id: GuestId,
    ) -> Self {
        let order = store
            .find(|o| o.guest_id == guest_id && !o.is_placed())
            .unwrap_or_else(|| Order::new(guest_id.clone()));

        debug!(guest_id = %guest_id, dishes = order.dishes.len(), "opened order");
        Self {
            store,
            guests,
            order,
        }
    }

    /// The guest this order belongs to.
    pub fn guest_id(&self) -> &GuestId {
        &self.order.guest_id
    }

    /// Adds a dish or replaces an existing line's modification set, then
    /// persists.
    pub fn add_or_update(&mut self, dish_id: DishId, modifications: Modifications) -> Result<()> {
        if self.order.is_placed() {
            return Err(DiningError::OrderAlreadyPlaced(self.order.id.clone()));
        }

        self.order.upsert_line(dish_id, modifications);
        self.store.save(&self.order)?;
        Ok(())
    }

    /// Upserts each dish with its accepted modifications from the ledger.
    pub fn update_from_ledger(
        &mut self,
        dish_ids: &[DishId],
        ledger: &RecommendationLedger,
    ) -> Result<()> {
        for dish_id in dish_ids {
            let modifications = ledger.modifications_for(dish_id);
            self.add_or_update(dish_id.clone(), modifications)?;
        }
        Ok(())
    }

    /// Places the order.
    ///
    /// Fails with [`DiningError::EmptyOrder`] when no dishes were added and
    /// [`DiningError::OrderAlreadyPlaced`] on a second call. On success the
    /// order is persisted as placed and each ordered dish is appended to
    /// the guest's history.
    pub fn place(&mut self) -> Result<()> {
        if self.order.is_placed() {
            return Err(DiningError::OrderAlreadyPlaced(self.order.id.clone()));
        }
        if self.order.is_empty() {
            return Err(DiningError::EmptyOrder(self.order.id.clone()));
        }

        self.order.place();
        self.store.save(&self.order)?;

        if let Some(mut guest) = self.guests.get(self.order.guest_id.as_str()) {
            for line in &self.order.dishes {
                guest.record_dish(line.dish_id.clone());
            }
            self.guests.save(&guest)?;
        }

        info!(
            order_id = %self.order.id,
            guest_id = %self.order.guest_id,
            dishes = self.order.dishes.len(),
            "order placed"
        );
        Ok(())
    }

    /// The order's lines, in add order.
    pub fn dishes(&self) -> &[OrderLine] {
        &self.order.dishes
    }

    /// Returns true once the order has been placed.
    pub fn is_placed(&self) -> bool {
        self.order.is_placed()
    }

    /// The underlying order record.
    pub fn order(&self) -> &Order {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn mods(pairs: &[(&str, &str)]) -> Modifications {
        pairs.iter().copied().collect()
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        orders: Arc<JsonStore<Order>>,
        guests: Arc<JsonStore<Guest>>,
        guest_id: GuestId,
    }

    fn fixture() -> Fixture {
        let dir = tempdir().unwrap();
        let guest = Guest::new("Ada");
        let guest_id = guest.id.clone();
        let guests = Arc::new(JsonStore::create(dir.path(), vec![guest]).unwrap());
        let orders = Arc::new(JsonStore::create(dir.path(), Vec::new()).unwrap());
        Fixture {
            _dir: dir,
            orders,
            guests,
            guest_id,
        }
    }

    #[test]
    fn test_place_empty_order_fails() {
        let f = fixture();
        let mut agg = OrderAggregator::open(f.orders.clone(), f.guests.clone(), f.guest_id.clone());

        let result = agg.place();

        assert!(matches!(result, Err(DiningError::EmptyOrder(_))));
        assert!(!agg.is_placed());
    }

    #[test]
    fn test_add_then_place_succeeds() {
        let f = fixture();
        let mut agg = OrderAggregator::open(f.orders.clone(), f.guests.clone(), f.guest_id.clone());

        agg.add_or_update(DishId::from("D001"), mods(&[("basil", "remove")]))
            .unwrap();
        agg.place().unwrap();

        assert!(agg.is_placed());
        let stored = f.orders.find(|o| o.is_placed()).unwrap();
        assert_eq!(stored.dishes.len(), 1);
    }

    #[test]
    fn test_second_place_fails() {
        let f = fixture();
        let mut agg = OrderAggregator::open(f.orders.clone(), f.guests.clone(), f.guest_id.clone());
        agg.add_or_update(DishId::from("D001"), Modifications::new())
            .unwrap();
        agg.place().unwrap();

        let result = agg.place();

        assert!(matches!(result, Err(DiningError::OrderAlreadyPlaced(_))));
    }

    #[test]
    fn test_mutation_after_place_fails() {
        let f = fixture();
        let mut agg = OrderAggregator::open(f.orders.clone(), f.guests.clone(), f.guest_id.clone());
        agg.add_or_update(DishId::from("D001"), Modifications::new())
            .unwrap();
        agg.place().unwrap();

        let result = agg.add_or_update(DishId::from("D002"), Modifications::new());

        assert!(matches!(result, Err(DiningError::OrderAlreadyPlaced(_))));
        assert_eq!(agg.dishes().len(), 1);
    }

    #[test]
    fn test_readd_updates_in_place() {
        let f = fixture();
        let mut agg = OrderAggregator::open(f.orders.clone(), f.guests.clone(), f.guest_id.clone());
        let dish = DishId::from("D001");

        agg.add_or_update(dish.clone(), mods(&[("cream", "less")]))
            .unwrap();
        agg.add_or_update(dish.clone(), mods(&[("basil", "remove")]))
            .unwrap();

        assert_eq!(agg.dishes().len(), 1);
        assert_eq!(agg.dishes()[0].modifications.get("basil"), Some("remove"));
    }

    #[test]
    fn test_place_appends_guest_history() {
        let f = fixture();
        let mut agg = OrderAggregator::open(f.orders.clone(), f.guests.clone(), f.guest_id.clone());
        agg.add_or_update(DishId::from("D001"), Modifications::new())
            .unwrap();
        agg.add_or_update(DishId::from("D002"), Modifications::new())
            .unwrap();

        agg.place().unwrap();

        let guest = f.guests.get(f.guest_id.as_str()).unwrap();
        assert_eq!(
            guest.history,
            vec![DishId::from("D001"), DishId::from("D002")]
        );
    }

    #[test]
    fn test_update_from_ledger_pulls_modifications() {
        let f = fixture();
        let recs = Arc::new(JsonStore::create(f._dir.path(), Vec::new()).unwrap());
        let mut ledger = RecommendationLedger::open(recs, f.guest_id.clone());
        let dish = DishId::from("D001");
        ledger
            .store_modifications(dish.clone(), &mods(&[("basil", "remove")]))
            .unwrap();

        let mut agg = OrderAggregator::open(f.orders.clone(), f.guests.clone(), f.guest_id.clone());
        agg.update_from_ledger(&[dish.clone()], &ledger).unwrap();

        assert_eq!(agg.dishes()[0].modifications.get("basil"), Some("remove"));
    }

    #[test]
    fn test_open_resumes_open_order_not_placed_one() {
        let f = fixture();

        {
            let mut agg =
                OrderAggregator::open(f.orders.clone(), f.guests.clone(), f.guest_id.clone());
            agg.add_or_update(DishId::from("D001"), Modifications::new())
                .unwrap();
            agg.place().unwrap();
        }

        // A fresh aggregator starts a new open order; the placed one is done.
        let agg = OrderAggregator::open(f.orders.clone(), f.guests.clone(), f.guest_id.clone());
        assert!(!agg.is_placed());
        assert!(agg.dishes().is_empty());
    }
}
