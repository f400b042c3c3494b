//! Architectural constants shared across the simulator.

/// Number of general-purpose registers.
pub const NUM_REGISTERS: usize = 32;

/// Default data memory size in 32-bit words.
pub const MEMORY_WORDS: usize = 1024;

/// Size of one instruction slot and one memory word in bytes.
pub const WORD_BYTES: u32 = 4;

/// Shift converting a byte address into a word index.
pub const WORD_SHIFT: u32 = 2;

/// Register whose writes are discarded.
pub const ZERO_REG: u8 = 0;
