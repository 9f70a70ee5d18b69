use proptest::prelude::*;

use agora_checkpoints::CheckpointSeq;
use agora_types::{Timepoint, VotePower};

/// Sorted, deduplicated keys paired with arbitrary values: a valid write
/// history for one sequence.
fn write_history() -> impl Strategy<Value = Vec<(u64, u128)>> {
    prop::collection::btree_map(0u64..10_000, 0u128..1_000_000, 0..64)
        .prop_map(|m| m.into_iter().collect())
}

proptest! {
    /// Writing in key order always succeeds and `latest` is the last value.
    #[test]
    fn ordered_writes_succeed(history in write_history()) {
        let mut seq = CheckpointSeq::new();
        for &(k, v) in &history {
            seq.push(Timepoint::new(k), VotePower::new(v)).unwrap();
        }
        prop_assert_eq!(seq.len(), history.len());
        let expected = history.last().map(|&(_, v)| VotePower::new(v)).unwrap_or(VotePower::ZERO);
        prop_assert_eq!(seq.latest(), expected);
    }

    /// For any query key, lookup returns the value of the latest checkpoint
    /// at or before it (zero before the first).
    #[test]
    fn lookup_betweenness(history in write_history(), query in 0u64..11_000) {
        let mut seq = CheckpointSeq::new();
        for &(k, v) in &history {
            seq.push(Timepoint::new(k), VotePower::new(v)).unwrap();
        }
        let expected = history
            .iter()
            .rev()
            .find(|&&(k, _)| k <= query)
            .map(|&(_, v)| VotePower::new(v))
            .unwrap_or(VotePower::ZERO);
        prop_assert_eq!(seq.lookup(Timepoint::new(query)), expected);
    }

    /// Keys recorded in the sequence are strictly increasing.
    #[test]
    fn keys_strictly_increasing(history in write_history()) {
        let mut seq = CheckpointSeq::new();
        for &(k, v) in &history {
            seq.push(Timepoint::new(k), VotePower::new(v)).unwrap();
        }
        let keys: Vec<_> = seq.iter().map(|cp| cp.key).collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    /// A same-key rewrite coalesces: length unchanged, value replaced.
    #[test]
    fn coalescing_rewrite(key in 0u64..10_000, v1 in 0u128..1_000, v2 in 0u128..1_000) {
        let mut seq = CheckpointSeq::new();
        seq.push(Timepoint::new(key), VotePower::new(v1)).unwrap();
        seq.push(Timepoint::new(key), VotePower::new(v2)).unwrap();
        prop_assert_eq!(seq.len(), 1);
        prop_assert_eq!(seq.latest(), VotePower::new(v2));
    }
}
