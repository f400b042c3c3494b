//! Pipeline latch structures for inter-stage communication.
//!
//! Pipeline latches store instruction state as it flows through the
//! five pipeline stages. Each latch holds a single entry or nothing;
//! nothing is a bubble.

use serde::Serialize;

use crate::core::pipeline::signals::ControlSignals;
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::{Instruction, Opcode};

/// Entry in the IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IfIdEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Fetched instruction.
    pub inst: Instruction,
}

/// Entry in the ID/EX pipeline latch (Decode to Execute stage).
///
/// Contains register indices and the values read from the register file,
/// the immediate, the branch target and the control signals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IdExEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Instruction being executed.
    pub inst: Instruction,
    /// First source register index (operand A).
    pub rs: Option<u8>,
    /// Second source register index (operand B).
    pub rt: Option<u8>,
    /// Destination register index.
    pub dest: Option<u8>,
    /// Value read from `rs` at decode.
    pub rs_val: i32,
    /// Value read from `rt` at decode.
    pub rt_val: i32,
    /// Immediate operand.
    pub imm: i32,
    /// Absolute branch target, for branches.
    pub branch_target: Option<u32>,
    /// Control signals for downstream pipeline stages.
    pub ctrl: ControlSignals,
}

/// Entry in the EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExMemEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Instruction in the memory stage.
    pub inst: Instruction,
    /// Destination register index.
    pub dest: Option<u8>,
    /// ALU result (effective address for memory operations).
    pub alu: i32,
    /// Forwarded `rt` value, stored by SW.
    pub store_data: i32,
    /// Branch condition held.
    pub branch_taken: bool,
    /// Absolute branch target, for branches.
    pub branch_target: Option<u32>,
    /// Control signals.
    pub ctrl: ControlSignals,
}

/// Entry in the MEM/WB pipeline latch (Memory to Writeback stage).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemWbEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Instruction in write-back.
    pub inst: Instruction,
    /// Destination register index.
    pub dest: Option<u8>,
    /// Loaded value for loads, ALU result otherwise.
    pub write_data: i32,
    /// Control signals.
    pub ctrl: ControlSignals,
}

/// IF/ID pipeline latch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IfId {
    pub entry: Option<IfIdEntry>,
}

/// ID/EX pipeline latch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IdEx {
    pub entry: Option<IdExEntry>,
}

/// EX/MEM pipeline latch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExMem {
    pub entry: Option<ExMemEntry>,
}

/// MEM/WB pipeline latch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MemWb {
    pub entry: Option<MemWbEntry>,
}

impl PipelineLatch for IfId {
    fn flush(&mut self) {
        self.entry = None;
    }

    // Not yet decoded, so the opcode is all there is to go on.
    fn is_bubble(&self) -> bool {
        self.entry
            .as_ref()
            .map_or(true, |e| e.inst.opcode == Opcode::Nop)
    }

    fn instruction(&self) -> Option<&Instruction> {
        self.entry.as_ref().map(|e| &e.inst)
    }
}

macro_rules! decoded_latch {
    ($($latch:ty),+) => {
        $(
            impl PipelineLatch for $latch {
                fn flush(&mut self) {
                    self.entry = None;
                }

                fn is_bubble(&self) -> bool {
                    self.entry.as_ref().map_or(true, |e| e.ctrl.is_nop)
                }

                fn instruction(&self) -> Option<&Instruction> {
                    self.entry.as_ref().map(|e| &e.inst)
                }
            }
        )+
    };
}

decoded_latch!(IdEx, ExMem, MemWb);

/// The four inter-stage latches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PipelineRegisters {
    pub if_id: IfId,
    pub id_ex: IdEx,
    pub ex_mem: ExMem,
    pub mem_wb: MemWb,
}

impl PipelineRegisters {
    /// Whether every latch is a bubble.
    pub fn is_drained(&self) -> bool {
        self.if_id.is_bubble()
            && self.id_ex.is_bubble()
            && self.ex_mem.is_bubble()
            && self.mem_wb.is_bubble()
    }
}
