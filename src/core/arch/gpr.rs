//! General-Purpose Register File.
//!
//! This module implements the general-purpose register file, containing
//! 32 signed 32-bit registers (R0-R31). Writes to R0 are discarded, so it
//! always reads as zero.
//!
//! Storage is shared copy-on-write: cloning a `Gpr` is cheap and the first
//! write after a clone detaches the writer's copy. Snapshots and exported
//! states therefore never observe later writes.

use std::sync::Arc;

use serde::Serialize;

use crate::common::{NUM_REGISTERS, ZERO_REG};

/// General-Purpose Register file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Gpr {
    regs: Arc<[i32; NUM_REGISTERS]>,
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}

impl Gpr {
    /// Creates a register file with every register set to zero.
    pub fn new() -> Self {
        Self {
            regs: Arc::new([0; NUM_REGISTERS]),
        }
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31)
    ///
    /// # Returns
    ///
    /// The stored value. Out-of-range indices read as zero.
    pub fn read(&self, idx: u8) -> i32 {
        self.regs.get(idx as usize).copied().unwrap_or(0)
    }

    /// Writes a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31)
    /// * `val` - The value to write
    ///
    /// # Note
    ///
    /// Writes to R0 and to out-of-range indices are silently ignored.
    pub fn write(&mut self, idx: u8, val: i32) {
        if idx == ZERO_REG || idx as usize >= NUM_REGISTERS {
            return;
        }
        Arc::make_mut(&mut self.regs)[idx as usize] = val;
    }

    /// All register values, R0 first.
    pub fn as_slice(&self) -> &[i32] {
        &self.regs[..]
    }

    /// Whether two register files share the same backing storage.
    pub fn shares_storage(&self, other: &Gpr) -> bool {
        Arc::ptr_eq(&self.regs, &other.regs)
    }

    /// Formats all registers, four per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (row, chunk) in self.regs.chunks(4).enumerate() {
            let line: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(col, val)| format!("R{:<2}={:>11}", row * 4 + col, val))
                .collect();
            out.push_str(&line.join("  "));
            out.push('\n');
        }
        out
    }
}
