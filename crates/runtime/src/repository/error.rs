//! Error types raised by repository implementations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("snapshot repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted snapshot for turn {turn}: {reason}")]
    CorruptedData { turn: u64, reason: String },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
