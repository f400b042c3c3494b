//! Architectural CPU state.
//!
//! Everything the pipeline commits to: the program counter, the register
//! file, data memory, the halted flag and the cumulative counters.

/// Data memory.
pub mod memory;

use serde::Serialize;

use crate::core::arch::Gpr;
use crate::stats::PipelineStats;
pub use memory::DataMemory;

/// CPU state owned by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CpuState {
    /// Address of the next instruction to fetch.
    pub pc: u32,
    /// General-purpose registers.
    pub regs: Gpr,
    /// Data memory.
    pub mem: DataMemory,
    /// Set once the pipeline has drained past the end of the program.
    pub halted: bool,
    /// Cumulative counters.
    pub stats: PipelineStats,
}

impl CpuState {
    /// Creates a reset CPU.
    ///
    /// # Arguments
    ///
    /// * `memory_words` - Data memory capacity in words.
    pub fn new(memory_words: usize) -> Self {
        Self {
            pc: 0,
            regs: Gpr::new(),
            mem: DataMemory::new(memory_words),
            halted: false,
            stats: PipelineStats::default(),
        }
    }
}
