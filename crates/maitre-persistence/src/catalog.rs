//! Read-only view over the dish store.

use std::path::Path;

use maitre_models::{Dish, DishId};

use crate::error::Result;
use crate::store::JsonStore;

/// The menu: a lookup-oriented wrapper around the dish store.
///
/// Dishes are reference data; nothing in the session flow mutates them, so
/// the catalog only exposes reads.
pub struct DishCatalog {
    store: JsonStore<Dish>,
}

impl DishCatalog {
    /// Opens the catalog from `dish.json` under the data directory.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            store: JsonStore::open(data_dir)?,
        })
    }

    /// Builds a catalog from an already-open dish store.
    pub fn from_store(store: JsonStore<Dish>) -> Self {
        Self { store }
    }

    /// Every dish on the menu.
    pub fn all(&self) -> Vec<Dish> {
        self.store.all()
    }

    /// Today's card. The whole catalog doubles as the specials board.
    pub fn specials(&self) -> Vec<Dish> {
        self.store.all()
    }

    /// Looks up a dish by id.
    pub fn by_id(&self, id: &DishId) -> Option<Dish> {
        self.store.get(id.as_str())
    }

    /// Looks up a dish by name, case-insensitively.
    pub fn by_name(&self, name: &str) -> Option<Dish> {
        let needle = name.to_lowercase();
        self.store.find(|d| d.name.to_lowercase() == needle)
    }

    /// Number of dishes on the menu.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if the menu is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_menu() -> Vec<Dish> {
        vec![
            Dish::new("Margherita Pizza", 299.0)
                .with_ingredients(["wheat flour", "tomato sauce", "mozzarella cheese", "basil"]),
            Dish::new("Penne Alfredo", 349.0)
                .with_ingredients(["penne pasta", "cream", "parmesan", "garlic", "butter"]),
        ]
    }

    #[test]
    fn test_by_name_case_insensitive() {
        let dir = tempdir().unwrap();
        let store = JsonStore::create(dir.path(), sample_menu()).unwrap();
        let catalog = DishCatalog::from_store(store);

        assert!(catalog.by_name("margherita pizza").is_some());
        assert!(catalog.by_name("MARGHERITA PIZZA").is_some());
        assert!(catalog.by_name("Quattro Formaggi").is_none());
    }

    #[test]
    fn test_by_id() {
        let dir = tempdir().unwrap();
        let menu = sample_menu();
        let id = menu[0].id.clone();
        let store = JsonStore::create(dir.path(), menu).unwrap();
        let catalog = DishCatalog::from_store(store);

        assert_eq!(catalog.by_id(&id).unwrap().name, "Margherita Pizza");
        assert!(catalog.by_id(&DishId::from("missing")).is_none());
    }

    #[test]
    fn test_specials_cover_the_menu() {
        let dir = tempdir().unwrap();
        let store = JsonStore::create(dir.path(), sample_menu()).unwrap();
        let catalog = DishCatalog::from_store(store);

        assert_eq!(catalog.specials().len(), 2);
        assert_eq!(catalog.len(), 2);
    }
}
