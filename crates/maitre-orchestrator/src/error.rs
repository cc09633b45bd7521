//! Error types for the orchestration layer.

use thiserror::Error;

use maitre_agent::AgentError;
use maitre_dining::DiningError;
use maitre_persistence::StoreError;
use maitre_session::SessionError;

/// Errors surfaced to the front end.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// Tool surface failure.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// Session-core failure.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Dining service failure.
    #[error(transparent)]
    Dining(#[from] DiningError),

    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The visit is not in a state the operation needs.
    #[error("visit state error: {0}")]
    VisitState(String),
}

/// Result type alias for orchestration operations.
pub type Result<T> = std::result::Result<T, OrchestratorError>;
