//! Tool-call surface consumed by the agent-orchestration runtime.
//!
//! The runtime (the part that talks to the language model) sees this crate
//! as a set of named operations per phase. A call carries a named operation
//! and a mapping of named arguments; operations with accept/reject
//! semantics (modification requests, placements, allotments) come back as a
//! `(success, message)`-shaped [`ToolResult`], while structural violations
//! raise a typed [`AgentError`] for the runtime to turn into a
//! retry-or-reroute decision.
//!
//! Toolsets mirror the waiter's sub-agents: reception (guest registration),
//! seating, recommendation, and ordering. The deterministic
//! [`steps::SpecialsProducer`] and [`steps::AdmissionCritic`] plug into the
//! session crate's refinement loop in place of model-driven steps.

pub mod error;
pub mod steps;
pub mod tool;
pub mod toolsets;

pub use error::{AgentError, Result};
pub use steps::{AdmissionCritic, SpecialsProducer};
pub use tool::{ToolCall, ToolDefinition, ToolResult};
pub use toolsets::{
    OrderingToolset, ReceptionToolset, RecommendationToolset, SeatingToolset,
};
