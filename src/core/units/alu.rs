//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage.
//! Arithmetic wraps on overflow, matching 32-bit two's complement hardware.

use crate::core::pipeline::signals::AluOp;

/// Arithmetic Logic Unit (ALU) for integer operations.
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a` - First operand
    /// * `b` - Second operand
    ///
    /// # Returns
    ///
    /// The 32-bit result of the operation.
    pub fn execute(op: AluOp, a: i32, b: i32) -> i32 {
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::And => a & b,
            AluOp::Or => a | b,
        }
    }
}
