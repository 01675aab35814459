//! Visibility bookkeeping errors.
//!
//! Every variant here means the reference counts and the recorded
//! contributions disagree. None of them are produced by ordinary play: they
//! indicate a bug in the caller (double removal, removal without a matching
//! add) or a corrupted snapshot.

use crate::error::{CoreError, ErrorSeverity};
use crate::state::{ObserverId, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisibilityError {
    /// A removal asked for more occurrences than the counter holds.
    #[error(
        "cannot retract visibility at {position}: count is {count}, retraction requested {requested}"
    )]
    CountUnderflow {
        position: Position,
        count: u32,
        requested: u32,
    },

    /// The counter disagrees with the sum of recorded contributions.
    #[error("visibility count at {position} is {actual}, contributions add up to {expected}")]
    CountMismatch {
        position: Position,
        expected: u32,
        actual: u32,
    },

    /// A snapshot lists the same observer twice.
    #[error("snapshot lists observer {0} more than once")]
    DuplicateObserver(ObserverId),

    /// A snapshot lists the same eyeball source twice.
    #[error("snapshot lists eyeball at {0} more than once")]
    DuplicateEyeball(Position),

    /// A snapshot lists the same counter cell twice.
    #[error("snapshot lists visibility count for {0} more than once")]
    DuplicateCount(Position),
}

impl CoreError for VisibilityError {
    fn severity(&self) -> ErrorSeverity {
        use VisibilityError::*;
        match self {
            CountUnderflow { .. } | CountMismatch { .. } => ErrorSeverity::Fatal,
            DuplicateObserver(_) | DuplicateEyeball(_) | DuplicateCount(_) => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use VisibilityError::*;
        match self {
            CountUnderflow { .. } => "VISIBILITY_COUNT_UNDERFLOW",
            CountMismatch { .. } => "VISIBILITY_COUNT_MISMATCH",
            DuplicateObserver(_) => "VISIBILITY_DUPLICATE_OBSERVER",
            DuplicateEyeball(_) => "VISIBILITY_DUPLICATE_EYEBALL",
            DuplicateCount(_) => "VISIBILITY_DUPLICATE_COUNT",
        }
    }
}
