//! The governor engine: orchestrates the proposal lifecycle.

use crate::action::{Action, ActionDispatcher};
use crate::error::GovernorError;
use crate::params::{ApprovalRule, GovernorParams};
use crate::proposal::{Proposal, ProposalState, VoteReceipt, VoteSupport};
use agora_timelock::Timelock;
use agora_types::{digest_chunks, AccountId, OperationId, ProposalId, Timepoint, VotePower};
use agora_votes::VotingLedger;
use std::collections::HashMap;

/// Orchestrates proposals: snapshots voting power at creation, accepts
/// weighted votes, tallies quorum and approval, and hands approved actions
/// to the timelock.
///
/// The governor reads the voting ledger but never writes it; the timelock
/// is the only component it mutates, through the operations it is
/// authorized for.
#[derive(Clone, Debug)]
pub struct Governor {
    /// The governor's account identity, used as the caller on every
    /// timelock interaction.
    id: AccountId,
    params: GovernorParams,
    proposals: HashMap<ProposalId, Proposal>,
}

impl Governor {
    /// # Panics
    /// Panics if `voting_delay` or `voting_period` is zero: the snapshot
    /// must be strictly in the past once voting opens, and a zero-length
    /// window could never go Active.
    pub fn new(id: AccountId, params: GovernorParams) -> Self {
        assert!(params.voting_delay >= 1, "voting_delay must be at least 1");
        assert!(params.voting_period >= 1, "voting_period must be at least 1");
        Self {
            id,
            params,
            proposals: HashMap::new(),
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn params(&self) -> &GovernorParams {
        &self.params
    }

    pub fn proposal(&self, id: &ProposalId) -> Option<&Proposal> {
        self.proposals.get(id)
    }

    /// Compute the id a proposal with this content would get.
    pub fn hash_proposal(
        actions: &[Action],
        description_hash: &[u8; 32],
    ) -> Result<ProposalId, GovernorError> {
        let encoded =
            bincode::serialize(actions).map_err(|e| GovernorError::Serialization(e.to_string()))?;
        Ok(ProposalId::derive(&[&encoded, description_hash]))
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Submit a proposal. Fixes the snapshot at `now` and the voting window
    /// at `[now + voting_delay, now + voting_delay + voting_period)`.
    ///
    /// The snapshot is taken at the creation timepoint itself; because
    /// `voting_delay >= 1` and historical queries are strictly-past only,
    /// no vote can observe power movements from the creating transaction's
    /// own timepoint.
    pub fn propose(
        &mut self,
        ledger: &VotingLedger,
        proposer: &AccountId,
        actions: Vec<Action>,
        description: &str,
        now: Timepoint,
    ) -> Result<ProposalId, GovernorError> {
        if actions.is_empty() {
            return Err(GovernorError::EmptyProposal);
        }
        let have = ledger.get_votes(proposer);
        if have < self.params.proposal_threshold {
            return Err(GovernorError::BelowProposalThreshold {
                have,
                need: self.params.proposal_threshold,
            });
        }

        let description_hash = digest_chunks(&[description.as_bytes()]);
        let id = Self::hash_proposal(&actions, &description_hash)?;
        if self.proposals.contains_key(&id) {
            return Err(GovernorError::AlreadyExists(id));
        }

        let snapshot = now;
        let vote_start = snapshot.offset(self.params.voting_delay);
        let vote_end = vote_start.offset(self.params.voting_period);
        self.proposals.insert(
            id,
            Proposal::new(
                id,
                proposer.clone(),
                actions,
                description_hash,
                snapshot,
                vote_start,
                vote_end,
            ),
        );
        tracing::info!(
            proposal = %id,
            proposer = %proposer,
            snapshot = %snapshot,
            vote_start = %vote_start,
            vote_end = %vote_end,
            "proposal created"
        );
        Ok(id)
    }

    /// Derived lifecycle state as of `now`. Pure read; never mutates.
    pub fn state(
        &self,
        ledger: &VotingLedger,
        id: &ProposalId,
        now: Timepoint,
    ) -> Result<ProposalState, GovernorError> {
        let proposal = self.proposals.get(id).ok_or(GovernorError::NotFound(*id))?;
        derive_state(&self.params, ledger, proposal, now)
    }

    /// Cast `voter`'s vote, weighted by their power at the snapshot.
    /// Zero-weight votes are accepted and recorded. Returns the weight.
    pub fn cast_vote(
        &mut self,
        ledger: &VotingLedger,
        id: &ProposalId,
        voter: &AccountId,
        support: VoteSupport,
        now: Timepoint,
    ) -> Result<VotePower, GovernorError> {
        let proposal = self
            .proposals
            .get_mut(id)
            .ok_or(GovernorError::NotFound(*id))?;
        let state = derive_state(&self.params, ledger, proposal, now)?;
        if state != ProposalState::Active {
            return Err(GovernorError::WrongState { actual: state });
        }
        if proposal.has_voted(voter) {
            return Err(GovernorError::AlreadyVoted {
                proposal: *id,
                voter: voter.clone(),
            });
        }

        let weight = ledger.get_past_votes(voter, proposal.snapshot, now)?;
        proposal.record_vote(VoteReceipt {
            voter: voter.clone(),
            support,
            weight,
        });
        tracing::debug!(
            proposal = %id,
            voter = %voter,
            support = ?support,
            weight = %weight,
            "vote cast"
        );
        Ok(weight)
    }

    /// Hand a succeeded proposal to the timelock.
    ///
    /// The operation id is derived from the action payload plus the
    /// proposal id as salt, so two proposals carrying identical actions
    /// never collide in the timelock.
    pub fn queue(
        &mut self,
        ledger: &VotingLedger,
        timelock: &mut Timelock,
        id: &ProposalId,
        now: Timepoint,
    ) -> Result<OperationId, GovernorError> {
        let proposal = self
            .proposals
            .get_mut(id)
            .ok_or(GovernorError::NotFound(*id))?;
        let state = derive_state(&self.params, ledger, proposal, now)?;
        if state != ProposalState::Succeeded {
            return Err(GovernorError::WrongState { actual: state });
        }

        let encoded = bincode::serialize(&proposal.actions)
            .map_err(|e| GovernorError::Serialization(e.to_string()))?;
        let operation = Timelock::hash_operation(
            &Timelock::hash_payload(&encoded),
            None,
            proposal.id.as_bytes(),
        );

        timelock.schedule(&self.id, operation, timelock.min_delay(), None, now)?;
        proposal.operation = Some(operation);
        tracing::info!(proposal = %id, operation = %operation, "proposal queued");
        Ok(operation)
    }

    /// Execute a queued proposal once its timelock delay has elapsed.
    ///
    /// The timelock operation is consumed and the proposal marked
    /// `Executed` *before* any action is dispatched, so reentrant calls
    /// observe terminal state. If a target rejects an action the failure is
    /// surfaced as [`GovernorError::ActionFailed`], but the proposal stays
    /// `Executed` and the operation stays consumed; a failed execution
    /// cannot be retried under the same proposal.
    pub fn execute(
        &mut self,
        ledger: &VotingLedger,
        timelock: &mut Timelock,
        dispatcher: &mut dyn ActionDispatcher,
        id: &ProposalId,
        now: Timepoint,
    ) -> Result<(), GovernorError> {
        let proposal = self
            .proposals
            .get_mut(id)
            .ok_or(GovernorError::NotFound(*id))?;
        let state = derive_state(&self.params, ledger, proposal, now)?;
        let Some(operation) = proposal.operation.filter(|_| state == ProposalState::Queued)
        else {
            return Err(GovernorError::WrongState { actual: state });
        };

        timelock.execute(&self.id, &operation, now)?;

        // Transition before any external call.
        proposal.executed = true;
        let actions = proposal.actions.clone();
        tracing::info!(proposal = %id, operation = %operation, "proposal executed");

        for (index, action) in actions.iter().enumerate() {
            dispatcher
                .dispatch(action)
                .map_err(|source| GovernorError::ActionFailed { index, source })?;
        }
        Ok(())
    }

    /// Withdraw a proposal. Only the proposer may cancel, and only while
    /// the proposal is non-terminal; a queued proposal's timelock operation
    /// is canceled along with it.
    pub fn cancel(
        &mut self,
        ledger: &VotingLedger,
        timelock: &mut Timelock,
        caller: &AccountId,
        id: &ProposalId,
        now: Timepoint,
    ) -> Result<(), GovernorError> {
        let proposal = self
            .proposals
            .get_mut(id)
            .ok_or(GovernorError::NotFound(*id))?;
        let state = derive_state(&self.params, ledger, proposal, now)?;
        if !matches!(
            state,
            ProposalState::Pending
                | ProposalState::Active
                | ProposalState::Succeeded
                | ProposalState::Queued
        ) {
            return Err(GovernorError::WrongState { actual: state });
        }
        if caller != &proposal.proposer {
            return Err(GovernorError::NotProposer);
        }
        if let Some(operation) = proposal.operation {
            timelock.cancel(&self.id, &operation)?;
        }
        proposal.canceled = true;
        tracing::info!(proposal = %id, "proposal canceled");
        Ok(())
    }

    /// Quorum requirement for a snapshot: a fraction of the total supply
    /// that was in circulation at that timepoint, not the live supply.
    pub fn quorum_at(
        &self,
        ledger: &VotingLedger,
        snapshot: Timepoint,
        now: Timepoint,
    ) -> Result<VotePower, GovernorError> {
        quorum_at(&self.params, ledger, snapshot, now)
    }
}

// ── State derivation ─────────────────────────────────────────────────────

fn quorum_at(
    params: &GovernorParams,
    ledger: &VotingLedger,
    snapshot: Timepoint,
    now: Timepoint,
) -> Result<VotePower, GovernorError> {
    let supply = ledger.get_past_total_supply(snapshot, now)?;
    Ok(supply.mul_bps(params.quorum_bps))
}

/// Lifecycle state as a pure function of the stored proposal and the clock.
fn derive_state(
    params: &GovernorParams,
    ledger: &VotingLedger,
    proposal: &Proposal,
    now: Timepoint,
) -> Result<ProposalState, GovernorError> {
    if proposal.canceled {
        return Ok(ProposalState::Canceled);
    }
    if proposal.executed {
        return Ok(ProposalState::Executed);
    }
    if proposal.operation.is_some() {
        return Ok(ProposalState::Queued);
    }
    if now < proposal.vote_start {
        return Ok(ProposalState::Pending);
    }
    if now < proposal.vote_end {
        return Ok(ProposalState::Active);
    }

    // Voting closed: tally. Quorum counts for + abstain against the
    // historical supply; approval compares for vs against only.
    let quorum = quorum_at(params, ledger, proposal.snapshot, now)?;
    if proposal.quorum_votes() < quorum {
        return Ok(ProposalState::Defeated);
    }
    let approved = match params.approval {
        ApprovalRule::SimpleMajority => proposal.votes_for > proposal.votes_against,
        ApprovalRule::SupermajorityBps(bps) => {
            let cast = proposal.votes_for + proposal.votes_against;
            proposal.votes_for >= cast.mul_bps(bps)
        }
    };
    Ok(if approved {
        ProposalState::Succeeded
    } else {
        ProposalState::Defeated
    })
}
