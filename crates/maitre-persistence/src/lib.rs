//! Persistence layer for Maitre.
//!
//! Each entity kind lives in one JSON array file (`dish.json`, `guest.json`,
//! `table.json`, `recommendation.json`, `order.json`). A store loads the
//! whole array into an in-memory cache at open time and writes the whole
//! array back on every save, using a temp-file-then-rename so a partially
//! written file is never observable.
//!
//! Stores are explicitly constructed and dependency-injected; there is no
//! process-global singleton. Opening a store whose backing file is missing
//! is a fatal error; stores are created by an operator action (see
//! [`JsonStore::create`] and the binary's `seed` command).
//!
//! # Example
//!
//! ```no_run
//! use maitre_models::Guest;
//! use maitre_persistence::JsonStore;
//!
//! let store: JsonStore<Guest> = JsonStore::open("/var/lib/maitre").unwrap();
//! let guest = Guest::new("Ada Moretti");
//! store.save(&guest).unwrap();
//! ```

pub mod catalog;
pub mod error;
pub mod record;
pub mod store;

pub use catalog::DishCatalog;
pub use error::{Result, StoreError};
pub use record::Record;
pub use store::JsonStore;
