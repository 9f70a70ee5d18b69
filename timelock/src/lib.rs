//! Delayed, dependency-aware operation executor.
//!
//! A [`Timelock`] is a keyed registry of scheduled operations. Scheduling
//! enforces a minimum delay between approval and execution; an operation may
//! name a predecessor that must execute first; execution consumes the
//! operation exactly once. The decision that authorized an operation (the
//! governor's vote) is fully decoupled from its execution.
//!
//! Authorization: lifecycle calls are accepted only from the configured
//! governor account. The minimum delay itself can only be changed by the
//! timelock's own identity, i.e. through an operation the timelock
//! previously executed. The configuration is self-amending and cannot be
//! overridden externally.

pub mod error;
pub mod executor;

pub use error::TimelockError;
pub use executor::{Operation, OperationState, Timelock};
