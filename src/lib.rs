//! Five-Stage Pipeline Simulator Library.
//!
//! This crate implements a cycle-accurate simulator of a classic in-order
//! five-stage pipeline (IF, ID, EX, MEM, WB) for a small MIPS-like
//! instruction set: `ADD`, `SUB`, `AND`, `OR`, `LW`, `SW`, `BEQ` and `NOP`.
//!
//! # Architecture
//!
//! * **Assembler**: Two-pass text parser with labels and per-line error reporting.
//! * **Core**: Synchronous pipeline with load-use stalls, EX/MEM and MEM/WB
//!   forwarding, and predict-not-taken branches resolved in execute.
//! * **Harness**: Immutable per-cycle snapshots and state export/restore for step-back.
//!
//! # Modules
//!
//! * `asm`: Assembly parser.
//! * `common`: Shared constants and error types.
//! * `config`: Configuration loading and parsing.
//! * `core`: CPU core and pipeline engine.
//! * `isa`: Instruction Set Architecture definitions.
//! * `sim`: Snapshots, history, sessions and built-in programs.
//! * `stats`: Performance statistics collection.
//!
//! # Example
//!
//! ```
//! use pipeline_sim::core::PipelineEngine;
//!
//! let mut engine = PipelineEngine::new();
//! let parsed = engine.load_program_from_source("ADD R1, R0, R0\nSUB R2, R1, R1\n");
//! assert!(parsed.is_ok());
//! while !engine.step().halted {}
//! assert_eq!(engine.snapshot().stats.counters.instructions_completed, 2);
//! ```

/// Two-pass assembler for the simulated instruction set.
///
/// Converts source text into decoded instructions, collecting one error per
/// rejected line instead of stopping at the first.
pub mod asm;

/// Shared constants and error types.
///
/// Provides the architectural sizes and the error enums used by the
/// assembler, configuration loader and command-line front end.
pub mod common;

/// Configuration system for memory size, run limits and initial state.
///
/// Loads and parses TOML configuration files to customize simulator behavior.
pub mod config;

/// CPU core implementation including pipeline stages and the cycle engine.
///
/// Implements the 5-stage in-order pipeline (Fetch, Decode, Execute, Memory, Writeback),
/// hazard detection and forwarding, and architectural state management.
pub mod core;

/// Instruction Set Architecture definitions.
pub mod isa;

/// Simulation harness: snapshots, step-back history and demonstration programs.
pub mod sim;

/// Performance statistics collection and reporting.
///
/// Tracks cycle, completion, stall, forwarding and branch counters and
/// derives CPI and prediction accuracy.
pub mod stats;
