#![no_main]

use libfuzzer_sys::fuzz_target;

use agora_checkpoints::CheckpointSeq;
use agora_types::{Timepoint, VotePower};

// Push arbitrary (key, value) pairs and probe with arbitrary lookup keys.
// Out-of-order pushes are rejected with an error; nothing here may panic.
fuzz_target!(|data: &[u8]| {
    let mut seq = CheckpointSeq::new();

    let mut chunks = data.chunks_exact(16);
    for chunk in &mut chunks {
        let key = u64::from_le_bytes([
            chunk[0], chunk[1], chunk[2], chunk[3], chunk[4], chunk[5], chunk[6], chunk[7],
        ]);
        let value = u64::from_le_bytes([
            chunk[8], chunk[9], chunk[10], chunk[11], chunk[12], chunk[13], chunk[14], chunk[15],
        ]);
        let _ = seq.push(Timepoint::new(key), VotePower::new(value as u128));
    }

    let rest = chunks.remainder();
    if rest.len() >= 8 {
        let probe = u64::from_le_bytes([
            rest[0], rest[1], rest[2], rest[3], rest[4], rest[5], rest[6], rest[7],
        ]);
        let at = Timepoint::new(probe);
        let found = seq.lookup(at);
        if let Some(last) = seq.last_key() {
            if at >= last {
                assert_eq!(found, seq.latest());
            }
        }
    }
});
