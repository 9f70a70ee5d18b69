use agora_types::Timepoint;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckpointError {
    /// Checkpoints must be written in non-decreasing timepoint order. The
    /// hosting runtime's clock is monotonic, so hitting this indicates a
    /// caller bug, not a user error.
    #[error("checkpoint key out of order: last recorded {last}, attempted {attempted}")]
    KeyOutOfOrder {
        last: Timepoint,
        attempted: Timepoint,
    },
}
