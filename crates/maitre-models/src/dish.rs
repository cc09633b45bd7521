//! Dish catalog entries.

use serde::{Deserialize, Serialize};

use crate::ids::DishId;

/// A dish on the menu.
///
/// Catalog entries are read-mostly reference data: they are loaded from the
/// backing store at startup and never mutated by the session flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    /// Unique identifier for the dish.
    pub id: DishId,

    /// Display name, e.g. "Margherita Pizza".
    pub name: String,

    /// Price in the restaurant's currency.
    pub price: f64,

    /// Ingredients in kitchen order.
    #[serde(default)]
    pub ingredients: Vec<String>,

    /// Menu category, e.g. "Main Course".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Menu description shown to guests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Dish {
    /// Creates a new dish with the given name and price.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: DishId::new(),
            name: name.into(),
            price,
            ingredients: Vec::new(),
            category: None,
            description: None,
        }
    }

    /// Sets the ingredient list.
    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the menu category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the menu description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns true if any ingredient matches the given name,
    /// case-insensitively ("Basil" matches "basil").
    pub fn contains_ingredient(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.ingredients
            .iter()
            .any(|i| i.to_lowercase().contains(&needle))
    }
}
