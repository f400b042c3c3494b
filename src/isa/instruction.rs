//! Decoded instruction representation.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::isa::Opcode;

/// A decoded program instruction.
///
/// `dest` is the register written at write-back, `rs` and `rt` are the
/// operand A and B registers carried into execute. A store carries the base in
/// `rs` and the stored register in `rt`. A load carries its base in `rs` and
/// its target in both `dest` and `rt`; the target is forwarded into operand B
/// but is not a source for hazard detection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// Operation.
    pub opcode: Opcode,
    /// Register written back, if any.
    pub dest: Option<u8>,
    /// First source register (operand A).
    pub rs: Option<u8>,
    /// Second source register (operand B).
    pub rt: Option<u8>,
    /// Memory offset in bytes, or branch displacement in words.
    pub imm: Option<i32>,
    /// Absolute branch target address.
    pub branch_target: Option<u32>,
    /// Source text with comments stripped.
    pub text: Arc<str>,
    /// Address of this instruction.
    pub pc: u32,
}

impl Instruction {
    /// Creates an instruction with no operands, labelled with its mnemonic.
    pub fn new(opcode: Opcode, pc: u32) -> Self {
        Self {
            opcode,
            dest: None,
            rs: None,
            rt: None,
            imm: None,
            branch_target: None,
            text: Arc::from(opcode.mnemonic()),
            pc,
        }
    }

    pub fn with_dest(mut self, reg: u8) -> Self {
        self.dest = Some(reg);
        self
    }

    pub fn with_sources(mut self, rs: Option<u8>, rt: Option<u8>) -> Self {
        self.rs = rs;
        self.rt = rt;
        self
    }

    pub fn with_imm(mut self, imm: i32) -> Self {
        self.imm = Some(imm);
        self
    }

    pub fn with_branch_target(mut self, target: u32) -> Self {
        self.branch_target = Some(target);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Arc::from(text);
        self
    }

    /// Registers whose values this instruction consumes.
    pub fn sources(&self) -> impl Iterator<Item = u8> {
        let rt = match self.opcode {
            Opcode::Lw => None,
            _ => self.rt,
        };
        [self.rs, rt].into_iter().flatten()
    }

    /// Whether the instruction reads `reg`.
    pub fn reads(&self, reg: u8) -> bool {
        self.sources().any(|src| src == reg)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
