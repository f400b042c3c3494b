//! Error types for the simulator.
//!
//! Assembly problems are reported as [`ParseError`] values collected by the
//! parser, never as early returns, so one pass reports every bad line.
//! [`SimError`] covers the fallible outer surfaces: configuration loading,
//! state preloading and the command-line front end. Stepping the engine
//! itself cannot fail.

use std::fmt;
use std::io;

use thiserror::Error;

/// Cause of a rejected assembly line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// Mnemonic is not part of the instruction set.
    #[error("Unknown opcode \"{0}\".")]
    UnknownOpcode(String),

    /// Label text does not match `[A-Za-z_][A-Za-z0-9_]*`.
    #[error("Invalid label \"{0}\". Labels must start with a letter and contain only alphanumeric characters or underscores.")]
    InvalidLabel(String),

    /// Label was already defined on an earlier line.
    #[error("Duplicate label \"{0}\".")]
    DuplicateLabel(String),

    /// Wrong number of comma-separated operands.
    #[error("{mnemonic} expects {expected} operands ({usage}).")]
    OperandCount {
        /// Upper-case mnemonic.
        mnemonic: &'static str,
        /// Required operand count.
        expected: usize,
        /// Operand layout shown to the user.
        usage: &'static str,
    },

    /// Operands are not allowed for this opcode.
    #[error("{0} does not accept operands.")]
    UnexpectedOperands(&'static str),

    /// Operand is not a register in `R0`..`R31`.
    #[error("Operand {position} \"{token}\" is not a valid register. Expected format R0-R31.")]
    InvalidRegister {
        /// One-based operand position.
        position: usize,
        /// Offending operand text.
        token: String,
    },

    /// Memory operand is not of the form `offset(Rx)`.
    #[error("Invalid address operand \"{0}\". Expected format offset(Rx).")]
    InvalidAddress(String),

    /// Branch operand is neither a label nor an immediate displacement.
    #[error("Invalid branch target \"{0}\". Expected label or immediate offset.")]
    InvalidBranchTarget(String),

    /// Branch names a label that is never defined.
    #[error("Unknown branch target label \"{0}\".")]
    UnresolvedLabel(String),
}

/// A rejected source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// One-based source line number.
    pub line: usize,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }

    /// Human-readable message without the line prefix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for ParseError {}

/// Errors raised outside the cycle loop.
#[derive(Debug, Error)]
pub enum SimError {
    /// Reading a program or configuration file failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file is not valid TOML for [`crate::config::Config`].
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Snapshot serialization failed.
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    /// Source text produced parse errors; nothing was loaded.
    #[error("program rejected with {} parse error(s)", .0.len())]
    Assembly(Vec<ParseError>),

    /// Preload targeted a register outside the register file.
    #[error("register index {0} is out of range")]
    RegisterIndex(usize),

    /// Preload targeted an unaligned or out-of-range memory address.
    #[error("memory address {0:#x} is unaligned or outside data memory")]
    MemoryAddress(u32),

    /// No built-in demo program carries this name.
    #[error("unknown demo program \"{0}\"")]
    UnknownDemo(String),
}
