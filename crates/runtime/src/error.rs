//! Errors surfaced by the runtime API.
//!
//! Wraps repository and visibility failures so callers can bubble them up
//! with a single error type.

use thiserror::Error;
use vision_core::{ObserverId, Position, VisibilityError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("unknown observer {0}")]
    UnknownObserver(ObserverId),

    #[error("position {position} lies outside the {width}x{height} map")]
    OutOfBounds {
        position: Position,
        width: u32,
        height: u32,
    },

    #[error("position {position} is already occupied by observer {occupant}")]
    Occupied {
        position: Position,
        occupant: ObserverId,
    },

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no snapshot saved for turn {0}")]
    MissingSnapshot(u64),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Visibility(#[from] VisibilityError),
}
