//! Fundamental types for the Agora governance core.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: account identifiers, the ledger timepoint, voting power
//! amounts, and the content-addressed proposal/operation ids.

pub mod account;
pub mod id;
pub mod power;
pub mod time;

pub use account::{AccountId, InvalidAccountId};
pub use id::{digest_chunks, OperationId, ProposalId};
pub use power::VotePower;
pub use time::Timepoint;
