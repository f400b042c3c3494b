//! Pipeline control signals and operation types.
//!
//! Control signals are derived once, at decode, by [`control_unit`]. Every
//! later stage steers on these flags alone and never looks at the opcode.

use serde::Serialize;

use crate::isa::Opcode;

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum AluOp {
    /// Integer addition (also address generation).
    #[default]
    Add,
    /// Integer subtraction (also branch comparison).
    Sub,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
}

/// Control signals for pipeline execution.
///
/// Generated during instruction decode and carried with the instruction
/// through the remaining stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ControlSignals {
    /// Write the result back to `dest`.
    pub reg_write: bool,
    /// Read data memory in the MEM stage.
    pub mem_read: bool,
    /// Write data memory in the MEM stage.
    pub mem_write: bool,
    /// Write back the loaded value instead of the ALU result.
    pub mem_to_reg: bool,
    /// Conditional branch resolved in EX.
    pub is_branch: bool,
    /// ALU operation.
    pub alu_op: AluOp,
    /// Operand B comes from the immediate, not `rt`.
    pub use_imm: bool,
    /// No-operation; decode turns it into a bubble.
    pub is_nop: bool,
}

/// Derives the control signals for an opcode.
///
/// # Arguments
///
/// * `opcode` - Decoded opcode.
///
/// # Returns
///
/// The signal set the downstream stages act on.
pub fn control_unit(opcode: Opcode) -> ControlSignals {
    let alu = |alu_op| ControlSignals {
        reg_write: true,
        alu_op,
        ..ControlSignals::default()
    };
    match opcode {
        Opcode::Add => alu(AluOp::Add),
        Opcode::Sub => alu(AluOp::Sub),
        Opcode::And => alu(AluOp::And),
        Opcode::Or => alu(AluOp::Or),
        Opcode::Lw => ControlSignals {
            reg_write: true,
            mem_read: true,
            mem_to_reg: true,
            use_imm: true,
            ..ControlSignals::default()
        },
        Opcode::Sw => ControlSignals {
            mem_write: true,
            use_imm: true,
            ..ControlSignals::default()
        },
        Opcode::Beq => ControlSignals {
            is_branch: true,
            alu_op: AluOp::Sub,
            ..ControlSignals::default()
        },
        Opcode::Nop => ControlSignals {
            is_nop: true,
            ..ControlSignals::default()
        },
    }
}
