//! Governor configuration parameters.

use agora_types::VotePower;
use serde::{Deserialize, Serialize};

/// How the for/against comparison decides approval once quorum is met.
/// Abstentions count toward quorum but never toward approval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalRule {
    /// `for > against`.
    SimpleMajority,
    /// `for` must be at least the given fraction (basis points) of
    /// `for + against`.
    SupermajorityBps(u32),
}

/// All tunable governor parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernorParams {
    /// Ticks between the snapshot timepoint and the start of voting.
    /// Must be at least 1 so the snapshot is strictly in the past for every
    /// vote-weight lookup.
    pub voting_delay: u64,

    /// Ticks the voting window stays open.
    pub voting_period: u64,

    /// Minimum current voting power required to submit a proposal.
    pub proposal_threshold: VotePower,

    /// Quorum as a fraction of the historical total supply at the snapshot
    /// (basis points, e.g. 400 = 4%). Counted over for + abstain votes.
    pub quorum_bps: u32,

    /// Approval comparator over for/against votes.
    pub approval: ApprovalRule,
}

impl GovernorParams {
    /// Default configuration: 1-tick delay, week-long voting window on a
    /// one-second clock, 4% quorum, simple majority, open proposing.
    pub fn defaults() -> Self {
        Self {
            voting_delay: 1,
            voting_period: 7 * 24 * 3600,
            proposal_threshold: VotePower::ZERO,
            quorum_bps: 400,
            approval: ApprovalRule::SimpleMajority,
        }
    }
}

impl Default for GovernorParams {
    fn default() -> Self {
        Self::defaults()
    }
}
