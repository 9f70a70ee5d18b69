//! Proposal actions and their dispatch boundary.

use agora_types::{AccountId, VotePower};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One external call a proposal wants made: a target account, an attached
/// value, and an opaque payload the target interprets. The governance core
/// assumes nothing about the target's interface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub target: AccountId,
    pub value: VotePower,
    pub payload: Vec<u8>,
}

/// A target rejected a dispatched action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("target {target} rejected the call: {reason}")]
pub struct DispatchError {
    pub target: AccountId,
    pub reason: String,
}

/// The boundary through which approved actions reach the outside world.
///
/// Implemented by the hosting runtime. Dispatch happens only after the
/// proposal and its timelock operation have been marked terminal, so a
/// dispatcher that calls back into the governor observes `Executed` and
/// cannot re-trigger anything.
pub trait ActionDispatcher {
    fn dispatch(&mut self, action: &Action) -> Result<(), DispatchError>;
}
