#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Restoring a ledger from arbitrary bytes must never panic; malformed
    // snapshots fall back to an empty ledger.
    let _ = agora_votes::VotingLedger::load_state(data);

    // The same holds for the raw value types.
    let _ = bincode::deserialize::<agora_types::ProposalId>(data);
    let _ = bincode::deserialize::<agora_types::OperationId>(data);
    let _ = bincode::deserialize::<agora_types::Timepoint>(data);
    let _ = bincode::deserialize::<agora_types::VotePower>(data);
});
