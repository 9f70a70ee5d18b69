use agora_checkpoints::CheckpointError;
use agora_types::{AccountId, Timepoint, VotePower};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VotesError {
    /// Historical queries are only valid strictly in the past; the value at
    /// the current timepoint can still change within the same timepoint.
    #[error("timepoint {requested} is not yet in the past (current timepoint {now})")]
    FutureTimepoint {
        requested: Timepoint,
        now: Timepoint,
    },

    /// Fatal invariant violation: delegated power went below zero. Indicates
    /// a bookkeeping bug in the caller, never a user error.
    #[error("voting power underflow for {account}: have {have}, subtracting {subtract}")]
    Underflow {
        account: AccountId,
        have: VotePower,
        subtract: VotePower,
    },

    /// Fatal invariant violation: delegated power overflowed its width.
    #[error("voting power overflow for {account}")]
    Overflow { account: AccountId },

    /// Fatal invariant violation: aggregate supply went below zero.
    #[error("aggregate supply underflow: have {have}, subtracting {subtract}")]
    SupplyUnderflow {
        have: VotePower,
        subtract: VotePower,
    },

    /// Fatal invariant violation: aggregate supply overflowed its width.
    #[error("aggregate supply overflow")]
    SupplyOverflow,

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
}
