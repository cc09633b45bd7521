//! Capacity-based admission control for dish modifications.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use maitre_models::{DishId, Modifications};
use maitre_persistence::DishCatalog;

use crate::load::LoadSignal;

/// Score above which a modification request is rejected.
const ADMISSION_THRESHOLD: u32 = 100;

/// Rejection reason for a dish that is not on the menu.
pub const REASON_DISH_NOT_AVAILABLE: &str = "dish not available";

/// Rejection reason when the kitchen cannot absorb the modification.
pub const REASON_CAPACITY_EXCEEDED: &str = "capacity exceeded";

/// Outcome of an admission check.
///
/// Rejections are expected, user-facing outcomes; they travel as values,
/// never as errors, and are not retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admission {
    /// Whether the modification was accepted.
    pub allowed: bool,

    /// Reason for a rejection; empty when allowed.
    pub reason: String,
}

impl Admission {
    /// An accepted request.
    pub fn granted() -> Self {
        Self {
            allowed: true,
            reason: String::new(),
        }
    }

    /// A rejected request with the given reason.
    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
        }
    }
}

/// Stateless admission check for requested dish modifications.
///
/// The score is `current_load * modification_count`; requests scoring above
/// [`ADMISSION_THRESHOLD`] are rejected. The check has no side effects;
/// accepted modifications are persisted separately by the ledger.
pub struct ModificationNegotiator {
    catalog: Arc<DishCatalog>,
    load: Arc<dyn LoadSignal>,
}

impl ModificationNegotiator {
    /// Creates a negotiator over the given catalog and load signal.
    pub fn new(catalog: Arc<DishCatalog>, load: Arc<dyn LoadSignal>) -> Self {
        Self { catalog, load }
    }

    /// Decides whether a dish can be modified as requested.
    pub fn request_modification(
        &self,
        dish_id: &DishId,
        modifications: &Modifications,
    ) -> Admission {
        if self.catalog.by_id(dish_id).is_none() {
            return Admission::denied(REASON_DISH_NOT_AVAILABLE);
        }

        let load = u32::from(self.load.current_load());
        let score = load * modifications.len() as u32;

        debug!(
            dish_id = %dish_id,
            load,
            modifications = modifications.len(),
            score,
            "admission check"
        );

        if score > ADMISSION_THRESHOLD {
            return Admission::denied(REASON_CAPACITY_EXCEEDED);
        }

        Admission::granted()
    }
}
