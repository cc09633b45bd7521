//! Dining-floor services for Maitre.
//!
//! Four store-backed services sit between the phase toolsets and the
//! persistence layer:
//!
//! - [`ModificationNegotiator`]: stateless capacity-based admission check
//!   for a requested dish modification.
//! - [`RecommendationLedger`]: per-guest record of accepted modifications,
//!   merged across refinement rounds.
//! - [`OrderAggregator`]: per-guest order assembly and one-shot placement.
//! - [`TableAllocator`]: exclusive table-to-guest assignment.
//!
//! Admission rejections are expected, user-facing outcomes and are returned
//! as [`Admission`] values; conflicting-state violations (double allotment,
//! placing twice) are typed [`DiningError`]s.

pub mod aggregator;
pub mod allocator;
pub mod error;
pub mod ledger;
pub mod load;
pub mod negotiator;

pub use aggregator::OrderAggregator;
pub use allocator::TableAllocator;
pub use error::{DiningError, Result};
pub use ledger::RecommendationLedger;
pub use load::{FixedLoad, LoadSignal};
pub use negotiator::{
    Admission, ModificationNegotiator, REASON_CAPACITY_EXCEEDED, REASON_DISH_NOT_AVAILABLE,
};
