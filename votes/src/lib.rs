//! Checkpointed voting ledger for the Agora governance core.
//!
//! Tracks each account's power balance and delegation target, and keeps a
//! checkpointed history of the power delegated to every account plus the
//! aggregate supply in circulation. The balance-bearing collaborator (the
//! asset layer) reports every movement through
//! [`VotingLedger::transfer_power`]; the ledger itself never reads balances
//! from anywhere else.
//!
//! Key invariant: at every timepoint, the sum of all delegatee checkpoint
//! values equals the aggregate supply. Delegation moves conserve the total;
//! only mints and burns change it.

pub mod error;
pub mod event;
pub mod ledger;

pub use error::VotesError;
pub use event::VotesEvent;
pub use ledger::VotingLedger;
