//! Error types for the session core.

use thiserror::Error;

use maitre_dining::DiningError;
use maitre_persistence::StoreError;

use crate::phase::Phase;

/// Errors that can occur while driving a visit.
#[derive(Error, Debug)]
pub enum SessionError {
    /// A phase was entered before its prerequisite state existed.
    /// Recoverable: the caller is expected to re-route to the right phase,
    /// not abort the visit.
    #[error("prerequisite not met for {phase}: {missing}")]
    PrerequisiteNotMet {
        /// The phase whose entry was refused.
        phase: Phase,
        /// What was missing, e.g. "guest not registered".
        missing: String,
    },

    /// Dining service failure.
    #[error(transparent)]
    Dining(#[from] DiningError),

    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
