//! The timelock executor itself.

use crate::error::TimelockError;
use agora_types::{digest_chunks, AccountId, OperationId, Timepoint};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lifecycle state of an operation id. `Ready` is derived from the clock
/// and the predecessor, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationState {
    /// Unknown id (never scheduled, or canceled).
    Unset,
    /// Scheduled but the delay or a predecessor still gates it.
    Waiting,
    /// Scheduled, the delay has elapsed and the predecessor (if any) is done.
    Ready,
    /// Executed; terminal.
    Done,
}

/// A scheduled operation record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Earliest timepoint at which execution is allowed.
    pub ready_at: Timepoint,
    /// Operation that must be done before this one may execute.
    pub predecessor: Option<OperationId>,
    /// Set exactly once, by `execute`.
    pub done: bool,
}

/// Keyed registry of delay-gated operations.
#[derive(Clone, Debug)]
pub struct Timelock {
    /// The timelock's own account identity; the only caller allowed to
    /// amend its configuration (reached via an executed operation that
    /// targets the timelock itself).
    self_id: AccountId,
    /// The governing proposal mechanism; the only caller allowed to
    /// schedule, execute, and cancel operations.
    governor: AccountId,
    min_delay: u64,
    operations: HashMap<OperationId, Operation>,
}

impl Timelock {
    pub fn new(self_id: AccountId, governor: AccountId, min_delay: u64) -> Self {
        Self {
            self_id,
            governor,
            min_delay,
            operations: HashMap::new(),
        }
    }

    /// The timelock's own account identity.
    pub fn self_id(&self) -> &AccountId {
        &self.self_id
    }

    /// The current minimum delay, in clock ticks.
    pub fn min_delay(&self) -> u64 {
        self.min_delay
    }

    /// The stored record for an operation id, if scheduled.
    pub fn operation(&self, id: &OperationId) -> Option<&Operation> {
        self.operations.get(id)
    }

    /// Derive the operation id for an action payload digest, an optional
    /// predecessor, and a caller-chosen salt. Binding the predecessor and
    /// salt into the id means two identical payloads scheduled independently
    /// never collide, and the stored predecessor cannot be substituted at
    /// execution time.
    pub fn hash_operation(
        payload_digest: &[u8; 32],
        predecessor: Option<&OperationId>,
        salt: &[u8; 32],
    ) -> OperationId {
        let predecessor_bytes = predecessor
            .map(|p| *p.as_bytes())
            .unwrap_or([0u8; 32]);
        OperationId::derive(&[payload_digest, &predecessor_bytes, salt])
    }

    /// Digest an opaque action payload for use with [`hash_operation`].
    ///
    /// [`hash_operation`]: Self::hash_operation
    pub fn hash_payload(payload: &[u8]) -> [u8; 32] {
        digest_chunks(&[payload])
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Lifecycle state of `id` as of `now`.
    pub fn state(&self, id: &OperationId, now: Timepoint) -> OperationState {
        match self.operations.get(id) {
            None => OperationState::Unset,
            Some(op) if op.done => OperationState::Done,
            Some(op) => {
                let delay_elapsed = now >= op.ready_at;
                let predecessor_done = op
                    .predecessor
                    .as_ref()
                    .map(|p| self.is_done(p))
                    .unwrap_or(true);
                if delay_elapsed && predecessor_done {
                    OperationState::Ready
                } else {
                    OperationState::Waiting
                }
            }
        }
    }

    /// Whether `id` is scheduled (waiting, ready, or done).
    pub fn is_scheduled(&self, id: &OperationId) -> bool {
        self.operations.contains_key(id)
    }

    /// Whether `id` may execute right now.
    pub fn is_ready(&self, id: &OperationId, now: Timepoint) -> bool {
        self.state(id, now) == OperationState::Ready
    }

    /// Whether `id` has been executed.
    pub fn is_done(&self, id: &OperationId) -> bool {
        self.operations.get(id).map(|op| op.done).unwrap_or(false)
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Schedule `id` to become executable `delay` ticks from `now`,
    /// optionally gated on `predecessor` executing first.
    pub fn schedule(
        &mut self,
        caller: &AccountId,
        id: OperationId,
        delay: u64,
        predecessor: Option<OperationId>,
        now: Timepoint,
    ) -> Result<(), TimelockError> {
        self.require_governor(caller)?;
        if self.operations.contains_key(&id) {
            return Err(TimelockError::AlreadyScheduled(id));
        }
        if delay < self.min_delay {
            return Err(TimelockError::InsufficientDelay {
                delay,
                min_delay: self.min_delay,
            });
        }
        let ready_at = now.offset(delay);
        self.operations.insert(
            id,
            Operation {
                ready_at,
                predecessor,
                done: false,
            },
        );
        tracing::info!(operation = %id, ready_at = %ready_at, "operation scheduled");
        Ok(())
    }

    /// Consume `id`: verify it is ready and mark it done.
    ///
    /// The `done` flag is set before this returns, so a second call (even
    /// one arriving from reentrant external code) observes the terminal
    /// state and fails. The caller dispatches the actual action payload
    /// after this succeeds.
    pub fn execute(
        &mut self,
        caller: &AccountId,
        id: &OperationId,
        now: Timepoint,
    ) -> Result<(), TimelockError> {
        self.require_governor(caller)?;
        let Some(op) = self.operations.get(id) else {
            return Err(TimelockError::NotFound(*id));
        };
        if op.done {
            return Err(TimelockError::AlreadyExecuted(*id));
        }
        if now < op.ready_at {
            return Err(TimelockError::NotReady {
                id: *id,
                ready_at: op.ready_at,
                now,
            });
        }
        let predecessor = op.predecessor;
        if let Some(predecessor) = predecessor {
            if !self.is_done(&predecessor) {
                return Err(TimelockError::MissingDependency {
                    id: *id,
                    predecessor,
                });
            }
        }

        if let Some(op) = self.operations.get_mut(id) {
            op.done = true;
        }
        tracing::info!(operation = %id, at = %now, "operation executed");
        Ok(())
    }

    /// Remove a scheduled-but-unexecuted operation, returning its id to
    /// `Unset` (the same id may be rescheduled later).
    pub fn cancel(&mut self, caller: &AccountId, id: &OperationId) -> Result<(), TimelockError> {
        self.require_governor(caller)?;
        match self.operations.get(id) {
            None => Err(TimelockError::NotFound(*id)),
            Some(op) if op.done => Err(TimelockError::AlreadyExecuted(*id)),
            Some(_) => {
                self.operations.remove(id);
                tracing::info!(operation = %id, "operation canceled");
                Ok(())
            }
        }
    }

    /// Change the minimum delay. Only the timelock's own identity may call
    /// this, which in practice means the change itself went through a
    /// scheduled and executed operation.
    pub fn update_min_delay(
        &mut self,
        caller: &AccountId,
        new_delay: u64,
    ) -> Result<(), TimelockError> {
        if caller != &self.self_id {
            return Err(TimelockError::Unauthorized {
                caller: caller.clone(),
                expected: self.self_id.clone(),
            });
        }
        tracing::info!(old = self.min_delay, new = new_delay, "minimum delay updated");
        self.min_delay = new_delay;
        Ok(())
    }

    fn require_governor(&self, caller: &AccountId) -> Result<(), TimelockError> {
        if caller != &self.governor {
            return Err(TimelockError::Unauthorized {
                caller: caller.clone(),
                expected: self.governor.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timelock(min_delay: u64) -> (Timelock, AccountId) {
        let governor = AccountId::new("agr_governor");
        let tl = Timelock::new(AccountId::new("agr_timelock"), governor.clone(), min_delay);
        (tl, governor)
    }

    fn op_id(seed: u8) -> OperationId {
        OperationId::new([seed; 32])
    }

    fn t(n: u64) -> Timepoint {
        Timepoint::new(n)
    }

    #[test]
    fn schedule_then_execute_after_delay() {
        let (mut tl, gov) = timelock(86_400);
        let id = op_id(1);
        tl.schedule(&gov, id, 86_400, None, t(0)).unwrap();
        assert_eq!(tl.state(&id, t(0)), OperationState::Waiting);

        // One tick early: rejected.
        let err = tl.execute(&gov, &id, t(86_399)).unwrap_err();
        assert!(matches!(err, TimelockError::NotReady { .. }));

        // On time: executes exactly once.
        assert!(tl.is_ready(&id, t(86_400)));
        tl.execute(&gov, &id, t(86_400)).unwrap();
        assert!(tl.is_done(&id));
        assert_eq!(
            tl.execute(&gov, &id, t(86_401)).unwrap_err(),
            TimelockError::AlreadyExecuted(id)
        );
    }

    #[test]
    fn schedule_rejects_duplicates_and_short_delays() {
        let (mut tl, gov) = timelock(100);
        let id = op_id(1);
        tl.schedule(&gov, id, 100, None, t(0)).unwrap();
        assert_eq!(
            tl.schedule(&gov, id, 100, None, t(1)).unwrap_err(),
            TimelockError::AlreadyScheduled(id)
        );
        assert_eq!(
            tl.schedule(&gov, op_id(2), 99, None, t(0)).unwrap_err(),
            TimelockError::InsufficientDelay {
                delay: 99,
                min_delay: 100,
            }
        );
    }

    #[test]
    fn predecessor_gates_execution() {
        let (mut tl, gov) = timelock(10);
        let first = op_id(1);
        let second = op_id(2);
        tl.schedule(&gov, first, 10, None, t(0)).unwrap();
        tl.schedule(&gov, second, 10, Some(first), t(0)).unwrap();

        // Delay elapsed for both, but the dependency is unmet.
        assert_eq!(tl.state(&second, t(50)), OperationState::Waiting);
        let err = tl.execute(&gov, &second, t(50)).unwrap_err();
        assert_eq!(
            err,
            TimelockError::MissingDependency {
                id: second,
                predecessor: first,
            }
        );

        // Once the predecessor is done, the dependent executes immediately.
        tl.execute(&gov, &first, t(50)).unwrap();
        assert_eq!(tl.state(&second, t(50)), OperationState::Ready);
        tl.execute(&gov, &second, t(50)).unwrap();
    }

    #[test]
    fn cancel_before_execution_allows_rescheduling() {
        let (mut tl, gov) = timelock(10);
        let id = op_id(1);
        tl.schedule(&gov, id, 10, None, t(0)).unwrap();
        tl.cancel(&gov, &id).unwrap();
        assert_eq!(tl.state(&id, t(100)), OperationState::Unset);

        // Same id can be scheduled again.
        tl.schedule(&gov, id, 10, None, t(5)).unwrap();
    }

    #[test]
    fn cancel_after_execution_is_rejected() {
        let (mut tl, gov) = timelock(10);
        let id = op_id(1);
        tl.schedule(&gov, id, 10, None, t(0)).unwrap();
        tl.execute(&gov, &id, t(10)).unwrap();
        assert_eq!(
            tl.cancel(&gov, &id).unwrap_err(),
            TimelockError::AlreadyExecuted(id)
        );
    }

    #[test]
    fn lifecycle_calls_require_the_governor() {
        let (mut tl, _gov) = timelock(10);
        let outsider = AccountId::new("agr_mallory");
        let id = op_id(1);
        assert!(matches!(
            tl.schedule(&outsider, id, 10, None, t(0)).unwrap_err(),
            TimelockError::Unauthorized { .. }
        ));
        assert!(matches!(
            tl.execute(&outsider, &id, t(100)).unwrap_err(),
            TimelockError::Unauthorized { .. }
        ));
        assert!(matches!(
            tl.cancel(&outsider, &id).unwrap_err(),
            TimelockError::Unauthorized { .. }
        ));
    }

    #[test]
    fn min_delay_is_self_amending_only() {
        let (mut tl, gov) = timelock(10);
        // Not even the governor may change it directly.
        assert!(matches!(
            tl.update_min_delay(&gov, 5).unwrap_err(),
            TimelockError::Unauthorized { .. }
        ));

        let self_id = tl.self_id().clone();
        tl.update_min_delay(&self_id, 5).unwrap();
        assert_eq!(tl.min_delay(), 5);
    }

    #[test]
    fn hash_operation_binds_predecessor_and_salt() {
        let payload = Timelock::hash_payload(b"transfer 100 to treasury");
        let base = Timelock::hash_operation(&payload, None, &[0u8; 32]);
        let with_pred = Timelock::hash_operation(&payload, Some(&op_id(1)), &[0u8; 32]);
        let with_salt = Timelock::hash_operation(&payload, None, &[1u8; 32]);
        assert_ne!(base, with_pred);
        assert_ne!(base, with_salt);
        assert_eq!(base, Timelock::hash_operation(&payload, None, &[0u8; 32]));
    }

    #[test]
    fn unknown_id_is_unset_and_not_executable() {
        let (mut tl, gov) = timelock(10);
        let id = op_id(9);
        assert_eq!(tl.state(&id, t(0)), OperationState::Unset);
        assert_eq!(
            tl.execute(&gov, &id, t(100)).unwrap_err(),
            TimelockError::NotFound(id)
        );
        assert_eq!(tl.cancel(&gov, &id).unwrap_err(), TimelockError::NotFound(id));
    }
}
