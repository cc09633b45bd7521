//! Exclusive table-to-guest assignment.

use std::sync::Arc;

use tracing::{debug, info};

use maitre_models::{GuestId, Table, TableId};
use maitre_persistence::JsonStore;

use crate::error::{DiningError, Result};

/// Allots tables to guests, one guest per table.
pub struct TableAllocator {
    store: Arc<JsonStore<Table>>,
}

impl TableAllocator {
    /// Creates an allocator over the table store.
    pub fn new(store: Arc<JsonStore<Table>>) -> Self {
        Self { store }
    }

    /// Lists unoccupied tables.
    ///
    /// With preference tags, tables are ranked by how many tags their
    /// environment matches (most first); ties, including the no-preference
    /// case, break by lowest table id, so the listing is deterministic.
    pub fn available(&self, preferences: &[String]) -> Vec<Table> {
        let mut tables: Vec<Table> = self
            .store
            .all()
            .into_iter()
            .filter(Table::is_available)
            .collect();

        tables.sort_by(|a, b| {
            b.preference_matches(preferences)
                .cmp(&a.preference_matches(preferences))
                .then_with(|| a.id.cmp(&b.id))
        });

        debug!(
            candidates = tables.len(),
            preferences = preferences.len(),
            "listed available tables"
        );
        tables
    }

    /// Allots a table to a guest.
    ///
    /// Occupancy is re-checked against the store at allotment time, not
    /// only at listing time. Fails with [`DiningError::TableOccupied`] if
    /// the table is already held.
    pub fn allot(&self, table_id: &TableId, guest_id: GuestId) -> Result<Table> {
        let mut table = self
            .store
            .get(table_id.as_str())
            .ok_or_else(|| DiningError::NotFound {
                kind: "table",
                id: table_id.to_string(),
            })?;

        if table.occupied {
            return Err(DiningError::TableOccupied(table.id));
        }

        table.assign(guest_id.clone());
        self.store.save(&table)?;

        info!(table_id = %table.id, guest_id = %guest_id, "table allotted");
        Ok(table)
    }

    /// Releases a table so it can be allotted again.
    pub fn release(&self, table_id: &TableId) -> Result<Table> {
        let mut table = self
            .store
            .get(table_id.as_str())
            .ok_or_else(|| DiningError::NotFound {
                kind: "table",
                id: table_id.to_string(),
            })?;

        table.release();
        self.store.save(&table)?;

        debug!(table_id = %table.id, "table released");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn table(id: &str, capacity: u32, tags: &[&str]) -> Table {
        let mut t = Table::new(capacity).with_environment(tags.iter().copied());
        t.id = TableId::from(id);
        t
    }

    fn allocator(tables: Vec<Table>) -> (TableAllocator, Arc<JsonStore<Table>>) {
        let dir = tempdir().unwrap();
        // Persist the temp directory for the lifetime of the test; the store
        // keeps only the path, so a dropped TempDir would delete it out from
        // under later writes.
        let path = dir.keep();
        let store = Arc::new(JsonStore::create(&path, tables).unwrap());
        (TableAllocator::new(store.clone()), store)
    }

    #[test]
    fn test_available_sorted_by_id_without_preferences() {
        let (alloc, _) = allocator(vec![
            table("T3", 2, &[]),
            table("T1", 4, &[]),
            table("T2", 2, &[]),
        ]);

        let tables = alloc.available(&[]);
        let ids: Vec<&str> = tables.iter().map(|t| t.id.as_str()).collect();

        assert_eq!(ids, vec!["T1", "T2", "T3"]);
    }

    #[test]
    fn test_available_ranks_preference_matches_first() {
        let (alloc, _) = allocator(vec![
            table("T1", 2, &["booth"]),
            table("T2", 2, &["window", "quiet"]),
            table("T3", 2, &["window"]),
        ]);

        let prefs = vec!["window".to_string(), "quiet".to_string()];
        let ids: Vec<String> = alloc
            .available(&prefs)
            .iter()
            .map(|t| t.id.to_string())
            .collect();

        assert_eq!(ids, vec!["T2", "T3", "T1"]);
    }

    #[test]
    fn test_available_ties_break_by_lowest_id() {
        let (alloc, _) = allocator(vec![
            table("T2", 2, &["window"]),
            table("T1", 2, &["window"]),
        ]);

        let prefs = vec!["window".to_string()];
        let tables = alloc.available(&prefs);

        assert_eq!(tables[0].id.as_str(), "T1");
    }

    #[test]
    fn test_available_excludes_occupied() {
        let mut occupied = table("T1", 2, &[]);
        occupied.assign(GuestId::new());
        let (alloc, _) = allocator(vec![occupied, table("T2", 2, &[])]);

        let listed = alloc.available(&[]);

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id.as_str(), "T2");
    }

    #[test]
    fn test_allot_sets_occupancy_and_persists() {
        let (alloc, store) = allocator(vec![table("T1", 2, &[])]);
        let guest = GuestId::from("guest-1");

        let allotted = alloc.allot(&TableId::from("T1"), guest.clone()).unwrap();

        assert!(allotted.occupied);
        assert_eq!(allotted.guest_id, Some(guest.clone()));

        let stored = store.get("T1").unwrap();
        assert!(stored.occupied);
        assert_eq!(stored.guest_id, Some(guest));
    }

    #[test]
    fn test_double_allot_fails() {
        let (alloc, _) = allocator(vec![table("T1", 2, &[])]);
        alloc.allot(&TableId::from("T1"), GuestId::new()).unwrap();

        let result = alloc.allot(&TableId::from("T1"), GuestId::new());

        assert!(matches!(result, Err(DiningError::TableOccupied(_))));
    }

    #[test]
    fn test_allot_unknown_table_fails() {
        let (alloc, _) = allocator(Vec::new());

        let result = alloc.allot(&TableId::from("T9"), GuestId::new());

        assert!(matches!(result, Err(DiningError::NotFound { .. })));
    }

    #[test]
    fn test_release_restores_allotability() {
        let (alloc, store) = allocator(vec![table("T1", 2, &[])]);
        let id = TableId::from("T1");
        alloc.allot(&id, GuestId::new()).unwrap();

        alloc.release(&id).unwrap();

        let stored = store.get("T1").unwrap();
        assert!(!stored.occupied);
        assert!(stored.guest_id.is_none());

        // Allotment works again after release.
        alloc.allot(&id, GuestId::new()).unwrap();
    }

    #[test]
    fn test_occupied_always_implies_guest() {
        let (alloc, store) = allocator(vec![table("T1", 2, &[]), table("T2", 4, &[])]);
        alloc.allot(&TableId::from("T1"), GuestId::new()).unwrap();

        for t in store.all() {
            assert_eq!(t.occupied, t.guest_id.is_some());
        }
    }
}
