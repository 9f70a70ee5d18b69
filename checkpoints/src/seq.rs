//! The checkpoint sequence itself.

use crate::error::CheckpointError;
use agora_types::{Timepoint, VotePower};
use serde::{Deserialize, Serialize};

/// One recorded `(timepoint, value)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub key: Timepoint,
    pub value: VotePower,
}

/// An append-only sequence of checkpoints with strictly increasing keys.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CheckpointSeq {
    entries: Vec<Checkpoint>,
}

impl CheckpointSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` as of `key`.
    ///
    /// If `key` equals the last recorded key the entry is overwritten in
    /// place (same-timepoint writes coalesce); if `key` is newer a new
    /// checkpoint is appended; if `key` is older the write is rejected.
    pub fn push(&mut self, key: Timepoint, value: VotePower) -> Result<(), CheckpointError> {
        match self.entries.last_mut() {
            Some(last) if key < last.key => Err(CheckpointError::KeyOutOfOrder {
                last: last.key,
                attempted: key,
            }),
            Some(last) if key == last.key => {
                last.value = value;
                Ok(())
            }
            _ => {
                self.entries.push(Checkpoint { key, value });
                Ok(())
            }
        }
    }

    /// The value of the most recent checkpoint, or zero if none.
    pub fn latest(&self) -> VotePower {
        self.entries
            .last()
            .map(|cp| cp.value)
            .unwrap_or(VotePower::ZERO)
    }

    /// The most recent checkpoint, if any.
    pub fn latest_checkpoint(&self) -> Option<&Checkpoint> {
        self.entries.last()
    }

    /// The key of the most recent checkpoint, if any.
    pub fn last_key(&self) -> Option<Timepoint> {
        self.entries.last().map(|cp| cp.key)
    }

    /// The value as of `key`: the value of the latest checkpoint whose key
    /// is `<= key`, or zero if `key` precedes the first checkpoint.
    ///
    /// Binary search, O(log n). Callers that know the current timepoint are
    /// responsible for restricting `key` to the past; looking up the present
    /// value must go through [`latest`](Self::latest) instead, since the
    /// current timepoint's value can still change.
    pub fn lookup(&self, key: Timepoint) -> VotePower {
        // partition_point returns the count of entries with cp.key <= key,
        // which is also the index one past the entry we want.
        let idx = self.entries.partition_point(|cp| cp.key <= key);
        if idx == 0 {
            VotePower::ZERO
        } else {
            self.entries[idx - 1].value
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all checkpoints, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.entries.iter()
    }
}
