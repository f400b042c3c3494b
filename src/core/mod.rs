//! CPU core implementation.
//!
//! Architectural state, the five-stage pipeline with its latches and hazard
//! logic, the ALU, and the [`PipelineEngine`](engine::PipelineEngine) that
//! drives them cycle by cycle.

/// Architectural register state.
pub mod arch;

/// CPU state: program counter, registers, memory and counters.
pub mod cpu;

/// Cycle driver, state export and restore.
pub mod engine;

/// Pipeline stages, latches, control signals and hazard handling.
pub mod pipeline;

/// Functional units.
pub mod units;

pub use cpu::CpuState;
pub use engine::{EngineOptions, EngineState, PipelineEngine};
