//! Append-only checkpoint sequences with point-in-time lookup.
//!
//! A [`CheckpointSeq`] records the history of one unsigned quantity as a
//! sequence of `(timepoint, value)` pairs with strictly increasing
//! timepoints. Writes at the timepoint of the last entry coalesce into it;
//! writes at earlier timepoints are rejected as a usage error. Reads are
//! either the latest value or a binary-search lookup of the value as of an
//! arbitrary past timepoint.

pub mod error;
pub mod seq;

pub use error::CheckpointError;
pub use seq::{Checkpoint, CheckpointSeq};
