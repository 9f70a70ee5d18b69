//! Proposal records, receipts, and the derived lifecycle state.

use crate::action::Action;
use agora_types::{AccountId, OperationId, ProposalId, Timepoint, VotePower};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The lifecycle states of a proposal.
///
/// `Defeated` and `Succeeded` are derived from the stored tallies and the
/// clock; only `Canceled`, `Queued` and `Executed` come from stored flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalState {
    /// Before the voting window opens.
    Pending,
    /// Voting window is open.
    Active,
    /// Withdrawn; terminal.
    Canceled,
    /// Voting closed without quorum or approval; terminal.
    Defeated,
    /// Voting closed with quorum and approval; awaiting `queue`.
    Succeeded,
    /// Scheduled in the timelock; awaiting `execute`.
    Queued,
    /// Executed; terminal.
    Executed,
}

/// A voter's position on a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteSupport {
    Against,
    For,
    Abstain,
}

/// Proof that a voter's weight was counted, recorded at most once per
/// `(proposal, voter)` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub voter: AccountId,
    pub support: VoteSupport,
    pub weight: VotePower,
}

/// A stored proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub proposer: AccountId,
    pub actions: Vec<Action>,
    /// Digest of the human-readable description; the full text lives
    /// off-ledger.
    pub description_hash: [u8; 32],
    /// Timepoint at which voting power is read for every vote on this
    /// proposal. Fixed at creation, never updated.
    pub snapshot: Timepoint,
    pub vote_start: Timepoint,
    pub vote_end: Timepoint,
    pub votes_for: VotePower,
    pub votes_against: VotePower,
    pub votes_abstain: VotePower,
    pub canceled: bool,
    pub executed: bool,
    /// Set when the proposal is handed to the timelock.
    pub operation: Option<OperationId>,
    receipts: HashMap<AccountId, VoteReceipt>,
}

impl Proposal {
    pub(crate) fn new(
        id: ProposalId,
        proposer: AccountId,
        actions: Vec<Action>,
        description_hash: [u8; 32],
        snapshot: Timepoint,
        vote_start: Timepoint,
        vote_end: Timepoint,
    ) -> Self {
        Self {
            id,
            proposer,
            actions,
            description_hash,
            snapshot,
            vote_start,
            vote_end,
            votes_for: VotePower::ZERO,
            votes_against: VotePower::ZERO,
            votes_abstain: VotePower::ZERO,
            canceled: false,
            executed: false,
            operation: None,
            receipts: HashMap::new(),
        }
    }

    /// The receipt recorded for `voter`, if they voted.
    pub fn receipt(&self, voter: &AccountId) -> Option<&VoteReceipt> {
        self.receipts.get(voter)
    }

    pub fn has_voted(&self, voter: &AccountId) -> bool {
        self.receipts.contains_key(voter)
    }

    pub(crate) fn record_vote(&mut self, receipt: VoteReceipt) {
        match receipt.support {
            VoteSupport::For => self.votes_for = self.votes_for + receipt.weight,
            VoteSupport::Against => self.votes_against = self.votes_against + receipt.weight,
            VoteSupport::Abstain => self.votes_abstain = self.votes_abstain + receipt.weight,
        }
        self.receipts.insert(receipt.voter.clone(), receipt);
    }

    /// Votes counted toward quorum: for + abstain.
    pub fn quorum_votes(&self) -> VotePower {
        self.votes_for + self.votes_abstain
    }
}
