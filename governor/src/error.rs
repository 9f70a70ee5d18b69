use crate::action::DispatchError;
use crate::proposal::ProposalState;
use agora_timelock::TimelockError;
use agora_types::{AccountId, ProposalId, VotePower};
use agora_votes::VotesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernorError {
    #[error("proposal {0} already exists")]
    AlreadyExists(ProposalId),

    #[error("proposal {0} not found")]
    NotFound(ProposalId),

    #[error("proposal is {actual:?}, which forbids this action")]
    WrongState { actual: ProposalState },

    #[error("proposer power {have} is below the proposal threshold {need}")]
    BelowProposalThreshold { have: VotePower, need: VotePower },

    #[error("a proposal must contain at least one action")]
    EmptyProposal,

    #[error("{voter} has already voted on proposal {proposal}")]
    AlreadyVoted {
        proposal: ProposalId,
        voter: AccountId,
    },

    #[error("only the proposer may cancel a proposal")]
    NotProposer,

    /// The timelock consumed the operation but an action's target rejected
    /// the call. The proposal stays `Executed`; there is no retry.
    #[error("action {index} failed: {source}")]
    ActionFailed {
        index: usize,
        #[source]
        source: DispatchError,
    },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Timelock(#[from] TimelockError),

    #[error(transparent)]
    Votes(#[from] VotesError),
}
