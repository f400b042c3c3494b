//! Tests for step-back sessions.

use pipeline_sim::core::EngineOptions;
use pipeline_sim::sim::{self, History, Seed, Session};
use pretty_assertions::assert_eq;

/// Creates a session running the sample program with its demo seed.
fn create_session() -> Session {
    let mut session = Session::default();
    session.set_seed(sim::default_seed()).unwrap();
    let result = session.load_source(sim::DEFAULT_PROGRAM_SOURCE).unwrap();
    assert!(result.is_ok());
    session
}

/// Tests that stepping back restores the previous snapshot and state.
#[test]
fn test_step_back() {
    let mut session = create_session();
    let start = session.snapshot().clone();
    assert_eq!(start.register(2), 100, "seed applied");

    let first = session.step().clone();
    let second = session.step().clone();
    assert_eq!(session.history_depth(), 2);

    assert_eq!(session.step_back(), Some(&first));
    assert_eq!(session.engine().snapshot(), first);
    assert_eq!(session.step_back(), Some(&start));
    assert_eq!(session.step_back(), None);
    assert!(!session.can_step_back());

    assert_eq!(session.step(), &first);
    assert_eq!(session.step(), &second, "replay matches the original run");
}

/// Tests that a halted session does not grow its history.
#[test]
fn test_step_when_halted() {
    let mut session = create_session();
    let steps = session.run(500);
    assert!(session.snapshot().halted);
    assert_eq!(session.history_depth() as u64, steps);

    let halted = session.snapshot().clone();
    assert_eq!(session.step(), &halted);
    assert_eq!(session.history_depth() as u64, steps);
}

/// Tests that loading and resetting discard history and reapply the seed.
#[test]
fn test_load_and_reset_clear_history() {
    let mut session = create_session();
    session.step();
    session.step();

    session.reset().unwrap();
    assert_eq!(session.history_depth(), 0);
    assert_eq!(session.snapshot().cycle, 0);
    assert_eq!(session.snapshot().register(1), 5);

    session.step();
    let result = session.load_source("NOT AN INSTRUCTION").unwrap();
    assert!(!result.is_ok());
    assert_eq!(session.history_depth(), 0);
    assert_eq!(session.snapshot().cycle, 1, "rejected source keeps the run");
}

/// Tests a bounded history dropping its oldest entries.
#[test]
fn test_bounded_history() {
    let mut session = Session::with_history(EngineOptions::default(), History::with_capacity(2));
    session
        .set_seed(Seed {
            registers: vec![(1, 1)],
            memory: Vec::new(),
        })
        .unwrap();
    assert!(session
        .load_source("ADD R2, R1, R1\nADD R3, R2, R2\nADD R4, R3, R3")
        .unwrap()
        .is_ok());

    for _ in 0..4 {
        session.step();
    }
    assert_eq!(session.history_depth(), 2);
    assert_eq!(session.step_back().map(|s| s.cycle), Some(3));
    assert_eq!(session.step_back().map(|s| s.cycle), Some(2));
    assert!(session.step_back().is_none());
}

/// Tests that a bad seed is reported.
#[test]
fn test_invalid_seed() {
    let mut session = Session::default();
    let err = session.set_seed(Seed {
        registers: vec![(40, 1)],
        memory: Vec::new(),
    });
    assert!(err.is_err());
}
