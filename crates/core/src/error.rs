use thiserror::Error;

use crate::types::{MIN_GRID_SIZE, MIN_PALETTE_SIZE};

/// Construction-time validation errors.
///
/// Swap preconditions are not errors; they come back as
/// [`SwapOutcome::Rejected`](crate::types::SwapOutcome::Rejected).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("grid size {0} is below the minimum of {min}", min = MIN_GRID_SIZE)]
    GridTooSmall(usize),

    #[error("palette has {0} colors, at least {min} are required", min = MIN_PALETTE_SIZE)]
    PaletteTooSmall(usize),

    #[error("palette lists {0} more than once")]
    DuplicateColor(&'static str),

    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
}
