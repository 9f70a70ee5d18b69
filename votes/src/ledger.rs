//! The voting ledger: balances, delegation, and checkpointed history.

use crate::error::VotesError;
use crate::event::VotesEvent;
use agora_checkpoints::{CheckpointError, CheckpointSeq};
use agora_types::{AccountId, Timepoint, VotePower};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-account balance and delegation target.
///
/// `delegate == None` means the account delegates to itself, so an account
/// that never touched delegation still contributes its balance to its own
/// checkpoint sequence. This keeps the conservation invariant (sum of
/// delegatee sequences == aggregate supply) unconditional.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct AccountRecord {
    balance: VotePower,
    delegate: Option<AccountId>,
}

/// Tracks current and historical voting power for all accounts.
#[derive(Clone, Debug, Default)]
pub struct VotingLedger {
    accounts: HashMap<AccountId, AccountRecord>,
    /// Power delegated *to* each account, checkpointed over time.
    checkpoints: HashMap<AccountId, CheckpointSeq>,
    /// Aggregate supply in circulation, checkpointed over time.
    total_supply: CheckpointSeq,
}

impl VotingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Reads ────────────────────────────────────────────────────────────

    /// The raw balance an account holds (as reported by the asset layer).
    pub fn balance_of(&self, account: &AccountId) -> VotePower {
        self.accounts
            .get(account)
            .map(|r| r.balance)
            .unwrap_or(VotePower::ZERO)
    }

    /// The account `account` currently routes its power to (itself, if it
    /// never delegated).
    pub fn delegatee_of(&self, account: &AccountId) -> AccountId {
        self.accounts
            .get(account)
            .and_then(|r| r.delegate.clone())
            .unwrap_or_else(|| account.clone())
    }

    /// Current voting power of `account`: everything delegated to it.
    pub fn get_votes(&self, account: &AccountId) -> VotePower {
        self.checkpoints
            .get(account)
            .map(|seq| seq.latest())
            .unwrap_or(VotePower::ZERO)
    }

    /// Voting power of `account` as of the past `timepoint`.
    pub fn get_past_votes(
        &self,
        account: &AccountId,
        timepoint: Timepoint,
        now: Timepoint,
    ) -> Result<VotePower, VotesError> {
        Self::require_past(timepoint, now)?;
        Ok(self
            .checkpoints
            .get(account)
            .map(|seq| seq.lookup(timepoint))
            .unwrap_or(VotePower::ZERO))
    }

    /// Current aggregate supply in circulation.
    pub fn total_supply(&self) -> VotePower {
        self.total_supply.latest()
    }

    /// Aggregate supply as of the past `timepoint`.
    pub fn get_past_total_supply(
        &self,
        timepoint: Timepoint,
        now: Timepoint,
    ) -> Result<VotePower, VotesError> {
        Self::require_past(timepoint, now)?;
        Ok(self.total_supply.lookup(timepoint))
    }

    /// The checkpoint history for a delegatee (for inspection and tests).
    pub fn checkpoints_of(&self, account: &AccountId) -> Option<&CheckpointSeq> {
        self.checkpoints.get(account)
    }

    /// All delegatees with a checkpoint history, with their sequences.
    pub fn delegatees(&self) -> impl Iterator<Item = (&AccountId, &CheckpointSeq)> {
        self.checkpoints.iter()
    }

    fn require_past(timepoint: Timepoint, now: Timepoint) -> Result<(), VotesError> {
        if timepoint >= now {
            Err(VotesError::FutureTimepoint {
                requested: timepoint,
                now,
            })
        } else {
            Ok(())
        }
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Route `account`'s power to `new_delegatee`.
    ///
    /// Subtracts the account's balance from the old delegatee's sequence and
    /// adds it to the new one, both checkpointed at `now`, in one atomic
    /// step. Re-delegating to the current delegatee is a no-op and produces
    /// no checkpoint churn.
    pub fn delegate(
        &mut self,
        account: &AccountId,
        new_delegatee: &AccountId,
        now: Timepoint,
    ) -> Result<Vec<VotesEvent>, VotesError> {
        let previous = self.delegatee_of(account);
        if &previous == new_delegatee {
            return Ok(Vec::new());
        }

        let weight = self.balance_of(account);
        let mut events = Vec::new();
        self.move_delegated(&previous, new_delegatee, weight, now, &mut events)?;
        self.accounts.entry(account.clone()).or_default().delegate = Some(new_delegatee.clone());

        tracing::debug!(
            account = %account,
            from = %previous,
            to = %new_delegatee,
            weight = %weight,
            "delegation moved"
        );
        events.push(VotesEvent::DelegateChanged {
            account: account.clone(),
            previous,
            current: new_delegatee.clone(),
        });
        Ok(events)
    }

    /// Record a movement of power-bearing units, reported by the asset
    /// collaborator.
    ///
    /// `from = None` is a mint, `to = None` is a burn; both adjust the
    /// aggregate supply. A plain transfer conserves it; a transfer from an
    /// account to itself is a no-op. Each side resolves through its current
    /// delegation before the checkpoint sequences are adjusted. All
    /// validation happens before any state is written, so a failed call
    /// leaves the ledger untouched.
    pub fn transfer_power(
        &mut self,
        from: Option<&AccountId>,
        to: Option<&AccountId>,
        amount: VotePower,
        now: Timepoint,
    ) -> Result<Vec<VotesEvent>, VotesError> {
        if amount.is_zero() || from == to {
            return Ok(Vec::new());
        }

        // Validate balances.
        let from_new_balance = match from {
            Some(a) => {
                let have = self.balance_of(a);
                Some(have.checked_sub(amount).ok_or(VotesError::Underflow {
                    account: a.clone(),
                    have,
                    subtract: amount,
                })?)
            }
            None => None,
        };
        let to_new_balance = match to {
            Some(a) => Some(
                self.balance_of(a)
                    .checked_add(amount)
                    .ok_or(VotesError::Overflow { account: a.clone() })?,
            ),
            None => None,
        };

        // Validate the supply adjustment (mint/burn only).
        let supply_change = match (from, to) {
            (None, Some(_)) => {
                let previous = self.total_supply.latest();
                let current = previous
                    .checked_add(amount)
                    .ok_or(VotesError::SupplyOverflow)?;
                Self::writable(&self.total_supply, now)?;
                Some((previous, current))
            }
            (Some(_), None) => {
                let previous = self.total_supply.latest();
                let current = previous
                    .checked_sub(amount)
                    .ok_or(VotesError::SupplyUnderflow {
                        have: previous,
                        subtract: amount,
                    })?;
                Self::writable(&self.total_supply, now)?;
                Some((previous, current))
            }
            _ => None,
        };

        // Validate the delegatee checkpoint moves. When both sides resolve
        // to the same delegatee the sequence is unchanged and skipped.
        let from_delegatee = from.map(|a| self.delegatee_of(a));
        let to_delegatee = to.map(|a| self.delegatee_of(a));
        let (sub_move, add_move) = if from_delegatee == to_delegatee {
            (None, None)
        } else {
            let sub = match &from_delegatee {
                Some(d) => Some(self.validate_sub(d, amount, now)?),
                None => None,
            };
            let add = match &to_delegatee {
                Some(d) => Some(self.validate_add(d, amount, now)?),
                None => None,
            };
            (sub, add)
        };

        // Apply. Nothing below can fail.
        let mut events = Vec::new();
        if let (Some(a), Some(b)) = (from, from_new_balance) {
            self.accounts.entry(a.clone()).or_default().balance = b;
        }
        if let (Some(a), Some(b)) = (to, to_new_balance) {
            self.accounts.entry(a.clone()).or_default().balance = b;
        }
        for (delegate, previous, current) in [sub_move, add_move].into_iter().flatten() {
            self.apply_checkpoint(&delegate, current, now);
            events.push(VotesEvent::DelegateVotesChanged {
                delegate,
                previous,
                current,
            });
        }
        if let Some((previous, current)) = supply_change {
            // writable() was checked above; push cannot fail here.
            let _ = self.total_supply.push(now, current);
            tracing::debug!(previous = %previous, current = %current, "aggregate supply changed");
            events.push(VotesEvent::SupplyChanged { previous, current });
        }
        Ok(events)
    }

    /// Move `weight` between two delegatee sequences at `now`.
    fn move_delegated(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        weight: VotePower,
        now: Timepoint,
        events: &mut Vec<VotesEvent>,
    ) -> Result<(), VotesError> {
        if weight.is_zero() || from == to {
            return Ok(());
        }
        let sub = self.validate_sub(from, weight, now)?;
        let add = self.validate_add(to, weight, now)?;
        for (delegate, previous, current) in [sub, add] {
            self.apply_checkpoint(&delegate, current, now);
            events.push(VotesEvent::DelegateVotesChanged {
                delegate,
                previous,
                current,
            });
        }
        Ok(())
    }

    /// Check that subtracting from a delegatee's sequence is valid; returns
    /// `(delegate, previous, new)` without writing anything.
    fn validate_sub(
        &self,
        delegatee: &AccountId,
        amount: VotePower,
        now: Timepoint,
    ) -> Result<(AccountId, VotePower, VotePower), VotesError> {
        let seq = self.checkpoints.get(delegatee);
        if let Some(seq) = seq {
            Self::writable(seq, now)?;
        }
        let previous = seq.map(|s| s.latest()).unwrap_or(VotePower::ZERO);
        let current = previous
            .checked_sub(amount)
            .ok_or(VotesError::Underflow {
                account: delegatee.clone(),
                have: previous,
                subtract: amount,
            })?;
        Ok((delegatee.clone(), previous, current))
    }

    /// Check that adding to a delegatee's sequence is valid; returns
    /// `(delegate, previous, new)` without writing anything.
    fn validate_add(
        &self,
        delegatee: &AccountId,
        amount: VotePower,
        now: Timepoint,
    ) -> Result<(AccountId, VotePower, VotePower), VotesError> {
        let seq = self.checkpoints.get(delegatee);
        if let Some(seq) = seq {
            Self::writable(seq, now)?;
        }
        let previous = seq.map(|s| s.latest()).unwrap_or(VotePower::ZERO);
        let current = previous
            .checked_add(amount)
            .ok_or(VotesError::Overflow {
                account: delegatee.clone(),
            })?;
        Ok((delegatee.clone(), previous, current))
    }

    /// Push a pre-validated checkpoint value.
    fn apply_checkpoint(&mut self, delegatee: &AccountId, value: VotePower, now: Timepoint) {
        let seq = self.checkpoints.entry(delegatee.clone()).or_default();
        // Monotonicity was verified during validation; push cannot fail.
        let _ = seq.push(now, value);
        tracing::debug!(delegate = %delegatee, value = %value, at = %now, "delegate votes checkpointed");
    }

    /// A sequence is writable at `now` if its last key does not lie in the
    /// future; the runtime clock never goes backwards.
    fn writable(seq: &CheckpointSeq, now: Timepoint) -> Result<(), VotesError> {
        match seq.last_key() {
            Some(last) if last > now => Err(CheckpointError::KeyOutOfOrder {
                last,
                attempted: now,
            }
            .into()),
            _ => Ok(()),
        }
    }
}

// ── Persistence ──────────────────────────────────────────────────────────

/// Serializable snapshot of the ledger's in-memory state.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct LedgerSnapshot {
    accounts: HashMap<AccountId, AccountRecord>,
    checkpoints: HashMap<AccountId, CheckpointSeq>,
    total_supply: CheckpointSeq,
}

/// Meta-store key used for persisting the voting ledger state.
const VOTING_LEDGER_META_KEY: &str = "voting_ledger_state";

impl VotingLedger {
    /// Serialize the ledger to bytes for persistence.
    pub fn save_state(&self) -> Vec<u8> {
        let snapshot = LedgerSnapshot {
            accounts: self.accounts.clone(),
            checkpoints: self.checkpoints.clone(),
            total_supply: self.total_supply.clone(),
        };
        bincode::serialize(&snapshot).unwrap_or_default()
    }

    /// Restore a ledger from serialized bytes (empty ledger on decode failure).
    pub fn load_state(data: &[u8]) -> Self {
        match bincode::deserialize::<LedgerSnapshot>(data) {
            Ok(snapshot) => Self {
                accounts: snapshot.accounts,
                checkpoints: snapshot.checkpoints,
                total_supply: snapshot.total_supply,
            },
            Err(_) => Self::default(),
        }
    }

    /// The meta-store key used for voting ledger persistence.
    pub fn meta_key() -> &'static str {
        VOTING_LEDGER_META_KEY
    }
}
