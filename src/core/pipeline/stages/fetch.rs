//! Instruction Fetch (IF) Stage.
//!
//! Fetches the instruction at the program counter and predicts the branch
//! not taken by always continuing at `pc + 4`. While decode is stalled the
//! IF/ID latch is re-issued unchanged and the program counter holds.

use tracing::trace;

use crate::common::WORD_BYTES;
use crate::core::pipeline::latches::{IfId, IfIdEntry};
use crate::isa::Instruction;

/// Result of the fetch stage for one cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Next IF/ID latch contents.
    pub if_id: IfId,
    /// Next program counter, unless a taken branch overrides it.
    pub next_pc: u32,
}

/// Executes the fetch stage.
///
/// # Arguments
///
/// * `program` - Loaded program; the instruction at address `a` is `program[a / 4]`
/// * `pc` - Current program counter
/// * `if_id` - The IF/ID latch at the start of the cycle
/// * `stalled` - Decode requested a stall this cycle
///
/// # Returns
///
/// The next IF/ID contents and program counter.
pub fn fetch_stage(
    program: &[Instruction],
    pc: u32,
    if_id: &IfId,
    stalled: bool,
) -> FetchOutcome {
    if stalled {
        return FetchOutcome {
            if_id: if_id.clone(),
            next_pc: pc,
        };
    }

    let entry = program
        .get((pc / WORD_BYTES) as usize)
        .map(|inst| IfIdEntry {
            pc,
            inst: inst.clone(),
        });
    if let Some(e) = &entry {
        trace!("IF  pc={:#06x} {}", pc, e.inst);
    }

    FetchOutcome {
        if_id: IfId { entry },
        next_pc: pc.wrapping_add(WORD_BYTES),
    }
}
