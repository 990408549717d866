//! Error types for the tactics engine.
//!
//! Decision and geometry queries never fail: "no path", "no sightline" and
//! "nothing to do" are ordinary outcomes. Errors are reserved for misuse of
//! the mutation API and for configuration or serialization problems.

use thiserror::Error;

use crate::components::{ActorId, Position};

/// Result type alias using [`TacticsError`].
pub type Result<T> = std::result::Result<T, TacticsError>;

/// Top-level error type for the tactics engine.
#[derive(Debug, Error)]
pub enum TacticsError {
    /// No actor with this identifier is active.
    #[error("Actor not found: {0}")]
    ActorNotFound(ActorId),

    /// Grid construction was given inconsistent input.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// An actor could not be placed at the requested tile.
    #[error("Cannot spawn actor at {position}: {reason}")]
    InvalidSpawn {
        /// Requested tile.
        position: Position,
        /// Why the tile was refused.
        reason: String,
    },

    /// Failed to parse a configuration document.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    /// Failed to encode or decode encounter state.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Invalid engine state.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}
