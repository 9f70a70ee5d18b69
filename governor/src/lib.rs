//! Proposal state machine for the Agora governance core.
//!
//! A proposal bundles a list of [`Action`]s with a description. At creation
//! the governor fixes a voting-power snapshot timepoint and a voting
//! window; votes are weighted by the [`agora_votes`] ledger's historical
//! power at the snapshot; once the window closes, quorum and approval rules
//! decide the outcome; approved proposals are handed to the
//! [`agora_timelock`] executor and run only after its delay elapses.
//!
//! Lifecycle: `Pending → Active → {Defeated | Succeeded} → Queued →
//! Executed`, with `Canceled` reachable from every non-terminal state.

pub mod action;
pub mod error;
pub mod governor;
pub mod params;
pub mod proposal;

pub use action::{Action, ActionDispatcher, DispatchError};
pub use error::GovernorError;
pub use governor::Governor;
pub use params::{ApprovalRule, GovernorParams};
pub use proposal::{Proposal, ProposalState, VoteReceipt, VoteSupport};
