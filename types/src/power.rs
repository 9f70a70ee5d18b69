//! Voting power amounts.
//!
//! Power is represented as a fixed-point integer (u128) to avoid
//! floating-point errors. All ledger arithmetic goes through the checked
//! operations; an underflow in bookkeeping is an invariant violation, never
//! something to clamp silently.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// An amount of voting power, in raw indivisible units.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct VotePower(u128);

impl VotePower {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Fraction of this amount expressed in basis points, rounded down.
    ///
    /// `10_000` bps is the whole amount. Used for quorum and supermajority
    /// thresholds.
    pub fn mul_bps(self, bps: u32) -> Self {
        Self(self.0 / 10_000 * u128::from(bps) + self.0 % 10_000 * u128::from(bps) / 10_000)
    }
}

impl Add for VotePower {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for VotePower {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for VotePower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} power", self.0)
    }
}
