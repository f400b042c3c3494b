//! Property tests over randomly generated programs.
//!
//! Branches only jump forward, so every generated program terminates.

use pipeline_sim::core::pipeline::events::HazardKind;
use pipeline_sim::core::PipelineEngine;
use pipeline_sim::sim::Snapshot;
use proptest::prelude::*;

fn reg() -> impl Strategy<Value = u8> {
    0u8..8
}

fn instruction() -> impl Strategy<Value = String> {
    prop_oneof![
        (0usize..4, reg(), reg(), reg()).prop_map(|(op, rd, rs, rt)| {
            let mnemonic = ["ADD", "SUB", "AND", "OR"][op];
            format!("{mnemonic} R{rd}, R{rs}, R{rt}")
        }),
        (reg(), 0i32..16, reg())
            .prop_map(|(rt, word, base)| format!("LW R{rt}, {}(R{base})", word * 4)),
        (reg(), 0i32..16, reg())
            .prop_map(|(rt, word, base)| format!("SW R{rt}, {}(R{base})", word * 4)),
        (reg(), reg(), 0i32..4).prop_map(|(rs, rt, off)| format!("BEQ R{rs}, R{rt}, {off}")),
        Just("NOP".to_string()),
    ]
}

fn program() -> impl Strategy<Value = String> {
    prop::collection::vec(instruction(), 1..24).prop_map(|lines| lines.join("\n"))
}

/// Runs `source` to completion, returning every snapshot.
fn run(source: &str, seed: &[i32]) -> Vec<Snapshot> {
    let mut engine = PipelineEngine::new();
    let result = engine.load_program_from_source(source);
    assert!(result.is_ok(), "{:?}", result.errors);
    for (idx, value) in seed.iter().enumerate() {
        engine.preload_register(idx, *value).unwrap();
    }
    let bound = 4 * engine.program().len() + 8;
    let mut snaps = Vec::new();
    for _ in 0..bound {
        let snap = engine.step();
        let halted = snap.halted;
        snaps.push(snap);
        if halted {
            break;
        }
    }
    snaps
}

proptest! {
    /// Tests that every forward-branching program halts and stays halted.
    #[test]
    fn test_random_programs_halt(source in program(), seed in prop::collection::vec(-4i32..64, 8)) {
        let snaps = run(&source, &seed);
        let last = snaps.last().unwrap();
        prop_assert!(last.halted, "did not halt within bound:\n{}", source);

        let mut engine = PipelineEngine::new();
        engine.load_program_from_source(&source);
        for (idx, value) in seed.iter().enumerate() {
            engine.preload_register(idx, *value).unwrap();
        }
        while !engine.step().halted {}
        let halted = engine.snapshot();
        prop_assert_eq!(engine.step(), halted);
    }

    /// Tests that identical inputs give identical snapshot sequences.
    #[test]
    fn test_random_programs_deterministic(source in program(), seed in prop::collection::vec(-4i32..64, 8)) {
        prop_assert_eq!(run(&source, &seed), run(&source, &seed));
    }

    /// Tests that R0 reads zero and counters stay consistent on every cycle.
    #[test]
    fn test_random_programs_invariants(source in program(), seed in prop::collection::vec(-4i32..64, 8)) {
        for snap in run(&source, &seed) {
            let stats = snap.stats.counters;
            prop_assert_eq!(snap.register(0), 0);
            prop_assert!(stats.branch_mispredictions <= stats.branch_count);
            prop_assert!(stats.instructions_completed <= stats.cycle_count);
            let stall_event = snap.events.iter().any(|e| e.kind == HazardKind::Stall);
            prop_assert_eq!(snap.stalled, stall_event);
            let flush_event = snap.events.iter().any(|e| e.kind == HazardKind::Flush);
            prop_assert_eq!(snap.flushed, flush_event);
            prop_assert!((0.0..=100.0).contains(&snap.stats.branch_accuracy));
        }
    }
}
