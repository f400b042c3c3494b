//! Common utilities and types used throughout the pipeline simulator.
//!
//! This module provides the architectural constants and the error types
//! shared by the assembler, the engine and the command-line front end.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for assembly, configuration and preloading.
pub mod error;

pub use constants::{MEMORY_WORDS, NUM_REGISTERS, WORD_BYTES, ZERO_REG};
pub use error::{ParseError, ParseErrorKind, SimError};
