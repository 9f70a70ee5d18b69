//! Power-movement notifications.
//!
//! Every mutating ledger call returns the events it produced so observers
//! (the hosting runtime, indexers, the governor's host) can react to power
//! movements. The ledger itself holds no proposal-specific logic.

use agora_types::{AccountId, VotePower};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VotesEvent {
    /// An account redirected its delegation.
    DelegateChanged {
        account: AccountId,
        previous: AccountId,
        current: AccountId,
    },
    /// The power checkpointed for a delegatee changed.
    DelegateVotesChanged {
        delegate: AccountId,
        previous: VotePower,
        current: VotePower,
    },
    /// The aggregate supply in circulation changed (mint or burn).
    SupplyChanged {
        previous: VotePower,
        current: VotePower,
    },
}
