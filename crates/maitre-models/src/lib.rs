//! Entity types for the Maitre guest-service core.
//!
//! These are the records persisted by `maitre-persistence` and manipulated by
//! the dining services: guests, the dish catalog, tables, per-guest
//! recommendations, and orders. Identifiers are typed newtypes so a
//! `TableId` can never be handed to an API expecting a `GuestId`.

pub mod dish;
pub mod guest;
pub mod ids;
pub mod modifications;
pub mod order;
pub mod recommendation;
pub mod table;

pub use dish::Dish;
pub use guest::Guest;
pub use ids::{DishId, GuestId, OrderId, RecommendationId, TableId};
pub use modifications::Modifications;
pub use order::{Order, OrderLine, OrderState};
pub use recommendation::Recommendation;
pub use table::Table;
