//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic for detecting data hazards in the pipeline
//! and resolving them through register forwarding or pipeline stalls.
//! A result still in EX/MEM or MEM/WB is forwarded to the instruction in
//! execute; a load immediately followed by a consumer of its result cannot
//! be forwarded in time and stalls decode for one cycle instead.

use std::fmt;

use serde::Serialize;

use crate::common::ZERO_REG;
use crate::core::pipeline::latches::{ExMem, IdEx, IdExEntry, IfId, MemWb};

/// Latch a forwarded value is taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ForwardSource {
    /// Result computed by the instruction one ahead.
    #[serde(rename = "EX/MEM")]
    ExMem,
    /// Result of the instruction two ahead.
    #[serde(rename = "MEM/WB")]
    MemWb,
}

impl fmt::Display for ForwardSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ForwardSource::ExMem => "EX/MEM",
            ForwardSource::MemWb => "MEM/WB",
        })
    }
}

/// ALU input that received a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Operand A, read from `rs`.
    A,
    /// Operand B, read from `rt`.
    B,
}

impl Operand {
    pub fn reason(self) -> &'static str {
        match self {
            Operand::A => "operand-A",
            Operand::B => "operand-B",
        }
    }
}

/// Which operands were forwarded this cycle, and from where.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ForwardingPaths {
    #[serde(rename = "a_from")]
    pub a: Option<ForwardSource>,
    #[serde(rename = "b_from")]
    pub b: Option<ForwardSource>,
}

impl ForwardingPaths {
    pub fn any(&self) -> bool {
        self.a.is_some() || self.b.is_some()
    }
}

/// Operand values after forwarding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Forwarded {
    /// Operand A value.
    pub a: i32,
    /// Operand B value (from `rt`, before immediate selection).
    pub b: i32,
    /// Where each operand came from; `None` means the register file.
    pub paths: ForwardingPaths,
}

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// A load-use hazard occurs when the instruction in decode reads the register
/// that the load now in execute will write. The loaded value only exists
/// after MEM, one cycle too late for forwarding into the consumer's EX.
///
/// # Arguments
///
/// * `id_ex` - The ID/EX pipeline latch containing the executing instruction
/// * `if_id` - The IF/ID pipeline latch containing the instruction being decoded
///
/// # Returns
///
/// The register causing the hazard, or `None` if no stall is needed.
pub fn need_stall_load_use(id_ex: &IdEx, if_id: &IfId) -> Option<u8> {
    let load = id_ex.entry.as_ref().filter(|e| e.ctrl.mem_read)?;
    let dest = load.dest.filter(|&d| d != ZERO_REG)?;
    let consumer = if_id.entry.as_ref()?;
    consumer.inst.reads(dest).then_some(dest)
}

/// Forwards register values from later pipeline stages to resolve data hazards.
///
/// EX/MEM has priority over MEM/WB because it holds the younger result. A
/// load in EX/MEM is skipped since its data is not read until MEM. Register
/// zero is never forwarded.
///
/// # Arguments
///
/// * `id_entry` - The ID/EX entry requiring forwarded register values
/// * `ex_mem` - The EX/MEM pipeline latch at the start of the cycle
/// * `mem_wb` - The MEM/WB pipeline latch at the start of the cycle
///
/// # Returns
///
/// The operand values together with their sources.
pub fn forward_operands(id_entry: &IdExEntry, ex_mem: &ExMem, mem_wb: &MemWb) -> Forwarded {
    let (a, a_from) = forward_one(id_entry.rs, id_entry.rs_val, ex_mem, mem_wb);
    let (b, b_from) = forward_one(id_entry.rt, id_entry.rt_val, ex_mem, mem_wb);
    Forwarded {
        a,
        b,
        paths: ForwardingPaths {
            a: a_from,
            b: b_from,
        },
    }
}

fn forward_one(
    src: Option<u8>,
    current: i32,
    ex_mem: &ExMem,
    mem_wb: &MemWb,
) -> (i32, Option<ForwardSource>) {
    let Some(src) = src.filter(|&r| r != ZERO_REG) else {
        return (current, None);
    };

    if let Some(e) = &ex_mem.entry {
        if e.ctrl.reg_write && !e.ctrl.mem_to_reg && e.dest == Some(src) {
            return (e.alu, Some(ForwardSource::ExMem));
        }
    }
    if let Some(w) = &mem_wb.entry {
        if w.ctrl.reg_write && w.dest == Some(src) {
            return (w.write_data, Some(ForwardSource::MemWb));
        }
    }
    (current, None)
}
