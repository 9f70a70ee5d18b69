//! Timepoint type used throughout the governance core.
//!
//! A timepoint is an opaque ordinal from the hosting ledger's clock, be it
//! a block height or a block timestamp, whichever the runtime uses. The core
//! never reads a wall clock itself; every entry point takes `now` as an
//! argument, supplied by the runtime, and the runtime guarantees it is
//! monotonically non-decreasing across calls.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A ledger timepoint (ordinal, monotonically non-decreasing).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timepoint(u64);

impl Timepoint {
    /// The clock's origin (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(ordinal: u64) -> Self {
        Self(ordinal)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// This timepoint shifted forward by `delta` ticks (saturating).
    pub fn offset(&self, delta: u64) -> Self {
        Self(self.0.saturating_add(delta))
    }

    /// Ticks elapsed since this timepoint (saturating at zero).
    pub fn elapsed_since(&self, now: Timepoint) -> u64 {
        now.0.saturating_sub(self.0)
    }
}

impl fmt::Display for Timepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}
