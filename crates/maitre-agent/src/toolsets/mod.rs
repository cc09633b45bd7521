//! Per-phase toolsets.
//!
//! Each toolset exposes its operations as [`ToolDefinition`]s and executes
//! [`ToolCall`]s against the session context. The sets mirror the phases:
//! reception and seating serve the introduction, recommendation serves the
//! selection phase, and ordering serves order placement.
//!
//! [`ToolDefinition`]: crate::tool::ToolDefinition
//! [`ToolCall`]: crate::tool::ToolCall

pub mod ordering;
pub mod reception;
pub mod recommendation;
pub mod seating;

pub use ordering::OrderingToolset;
pub use reception::ReceptionToolset;
pub use recommendation::RecommendationToolset;
pub use seating::SeatingToolset;
