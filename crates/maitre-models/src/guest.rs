//! Guest records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::ids::{DishId, GuestId};

/// A guest being served.
///
/// Created once per visit on first contact. Preferences and allergies grow
/// over the introduction phase; history is appended when an order is placed.
/// Guests are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    /// Unique identifier for the guest.
    pub id: GuestId,

    /// Full name of the guest.
    pub name: String,

    /// Preferred cuisines, categories, or seating qualities.
    #[serde(default)]
    pub preferences: BTreeSet<String>,

    /// Ingredients the guest must not be served.
    #[serde(default)]
    pub allergies: BTreeSet<String>,

    /// Dishes the guest has ordered, oldest first.
    #[serde(default)]
    pub history: Vec<DishId>,

    /// When the guest record was created.
    pub created_at: DateTime<Utc>,
}

impl Guest {
    /// Creates a new guest with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GuestId::new(),
            name: name.into(),
            preferences: BTreeSet::new(),
            allergies: BTreeSet::new(),
            history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds preferences; duplicates are ignored.
    pub fn add_preferences<I, S>(&mut self, preferences: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferences.extend(preferences.into_iter().map(Into::into));
    }

    /// Adds allergies; duplicates are ignored.
    pub fn add_allergies<I, S>(&mut self, allergies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergies.extend(allergies.into_iter().map(Into::into));
    }

    /// Appends a dish to the guest's history unless already present.
    pub fn record_dish(&mut self, dish_id: DishId) {
        if !self.history.contains(&dish_id) {
            self.history.push(dish_id);
        }
    }

    /// Returns true if the ingredient conflicts with a recorded allergy.
    ///
    /// Matching is a case-insensitive containment check, so an allergy to
    /// "flour" flags the ingredient "wheat flour".
    pub fn is_allergic_to(&self, ingredient: &str) -> bool {
        let ingredient = ingredient.to_lowercase();
        self.allergies
            .iter()
            .any(|a| ingredient.contains(&a.to_lowercase()))
    }
}
