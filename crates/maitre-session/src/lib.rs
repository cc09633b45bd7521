//! Session core for one guest's visit.
//!
//! A visit walks through ordered phases: introduction (registration and
//! seating), selection (recommendation refinement), and order placement,
//! ending in the completed state. This crate provides:
//!
//! - [`SessionContext`]: the typed, mutable state shared by every phase
//!   handler within one visit. Fields are statically declared; a missing
//!   prerequisite is a checked `Option`, not a runtime key miss.
//! - [`PhaseMachine`]: gates entry to each phase on prerequisite state and
//!   initializes phase state idempotently, so retried entries never discard
//!   what earlier calls accumulated.
//! - [`RefinementLoop`]: the bounded produce/critique cycle used by the
//!   selection phase. Each round returns a tagged outcome and the
//!   controller alone decides when to stop.

pub mod context;
pub mod error;
pub mod phase;
pub mod refinement;

pub use context::SessionContext;
pub use error::{Result, SessionError};
pub use phase::{Phase, PhaseMachine};
pub use refinement::{
    Candidate, Critique, CritiqueStep, Problem, ProduceStep, RefinementLoop, RefinementOutcome,
    RoundOutcome, DEFAULT_MAX_ROUNDS,
};
