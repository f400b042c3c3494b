//! Instruction set definitions.
//!
//! The simulated machine understands eight opcodes: four register-register
//! ALU operations, a word load, a word store, a conditional branch and a
//! no-op. Programs are flat sequences of decoded [`Instruction`]s laid out
//! at 4-byte aligned addresses starting at zero.

/// Opcode enumeration and mnemonic handling.
pub mod opcode;

/// Decoded instruction representation.
pub mod instruction;

pub use instruction::Instruction;
pub use opcode::Opcode;
