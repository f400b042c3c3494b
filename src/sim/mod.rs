//! Simulation harness built on the engine.
//!
//! Snapshots, step-back history, interactive sessions and the built-in
//! demonstration programs.

/// Step-back history stack.
pub mod history;

/// Built-in programs and seeds.
pub mod programs;

/// Engine with step-back history.
pub mod session;

/// Per-cycle snapshots.
pub mod snapshot;

pub use history::{History, HistoryEntry};
pub use programs::{
    default_program, default_seed, find_demo, DemoProgram, Seed, DEFAULT_PROGRAM_SOURCE,
    DEMO_PROGRAMS,
};
pub use session::Session;
pub use snapshot::{Snapshot, StageView};
