//! Error types for board operations.

use thiserror::Error;

use crate::domain::{CardId, ColumnId, SubtaskId, TagId};

/// Errors surfaced by the planner, the cache and the dispatcher.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    /// Bad user input, rejected before the cache is touched.
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    #[error("card not found: {0}")]
    CardNotFound(CardId),

    #[error("tag not found: {0}")]
    TagNotFound(TagId),

    #[error("subtask not found: {0}")]
    SubtaskNotFound(SubtaskId),

    /// A plan was computed against an older snapshot than the current one.
    #[error("plan computed against revision {planned}, cache is at {current}")]
    StalePlan { planned: u64, current: u64 },

    /// A mutation would leave duplicate or gapped positions.
    #[error("ordering invariant violated: {0}")]
    InvariantViolation(String),

    /// The persistence layer rejected the call. The cache has been rolled back.
    #[error("persistence failed: {0}")]
    Persistence(String),

    /// Snapshot fetch failed.
    #[error("failed to load board: {0}")]
    Load(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;

impl BoardError {
    /// Everything except an invariant violation can be recovered locally.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, BoardError::InvariantViolation(_))
    }

    /// Whether repeating the same user action may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BoardError::Persistence(_) | BoardError::Load(_))
    }
}
