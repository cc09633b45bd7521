//! Error types for the agent tool surface.

use thiserror::Error;

use maitre_dining::DiningError;
use maitre_persistence::StoreError;
use maitre_session::SessionError;

/// Errors that can occur while executing tool calls.
#[derive(Error, Debug)]
pub enum AgentError {
    /// The named operation does not exist in the dispatched toolset.
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// A call argument was missing or of the wrong shape.
    #[error("invalid tool arguments for {tool_name}: {message}")]
    InvalidArguments {
        /// Name of the tool.
        tool_name: String,
        /// What was wrong.
        message: String,
    },

    /// Tool execution failed for a reason other than an accept/reject
    /// outcome (those travel inside the `ToolResult`).
    #[error("tool execution failed: {tool_name}: {message}")]
    ToolExecution {
        /// Name of the tool that failed.
        tool_name: String,
        /// Error message.
        message: String,
    },

    /// Session-core failure (e.g. a phase prerequisite).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Dining service failure.
    #[error(transparent)]
    Dining(#[from] DiningError),

    /// Persistence-store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for tool operations.
pub type Result<T> = std::result::Result<T, AgentError>;
