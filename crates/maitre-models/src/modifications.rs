//! Ingredient modification sets.
//!
//! A modification set maps an ingredient to an instruction, e.g.
//! `{"basil": "remove", "cream": "less"}`. Sets merge key-wise with
//! incoming values winning, which is what lets repeated refinement rounds
//! accumulate modifications for a dish without losing earlier ones.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Instruction used to strike an ingredient from a dish.
pub const REMOVE_INSTRUCTION: &str = "remove";

/// An ordered mapping of ingredient name to modification instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifications(BTreeMap<String, String>);

impl Modifications {
    /// Creates an empty modification set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an instruction for an ingredient, replacing any prior one.
    pub fn set(&mut self, ingredient: impl Into<String>, instruction: impl Into<String>) {
        self.0.insert(ingredient.into(), instruction.into());
    }

    /// Returns the instruction for an ingredient, if any.
    pub fn get(&self, ingredient: &str) -> Option<&str> {
        self.0.get(ingredient).map(String::as_str)
    }

    /// Returns true if the ingredient is marked for removal.
    pub fn removes(&self, ingredient: &str) -> bool {
        self.get(ingredient) == Some(REMOVE_INSTRUCTION)
    }

    /// Merges another set into this one; incoming values win on key conflict.
    pub fn merge(&mut self, incoming: &Modifications) {
        for (ingredient, instruction) in incoming.iter() {
            self.0.insert(ingredient.to_string(), instruction.to_string());
        }
    }

    /// Number of modified ingredients.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no modifications are recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over (ingredient, instruction) pairs in ingredient order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Modifications {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Modifications {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}
