//! The [`Record`] trait binding entity types to their backing stores.

use serde::de::DeserializeOwned;
use serde::Serialize;

use maitre_models::{Dish, Guest, Order, Recommendation, Table};

/// A persistable entity.
///
/// `KIND` is the file stem of the backing store (`"guest"` → `guest.json`);
/// `record_id` is the identity used for overwrite-by-id saves.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + 'static {
    /// File stem of the backing store.
    const KIND: &'static str;

    /// The record's unique identifier.
    fn record_id(&self) -> &str;
}

impl Record for Dish {
    const KIND: &'static str = "dish";

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl Record for Guest {
    const KIND: &'static str = "guest";

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl Record for Table {
    const KIND: &'static str = "table";

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl Record for Recommendation {
    const KIND: &'static str = "recommendation";

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl Record for Order {
    const KIND: &'static str = "order";

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}
