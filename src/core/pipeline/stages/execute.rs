//! Execute (EX) Stage.
//!
//! This module implements the execution stage of the pipeline. It is responsible for:
//! - Resolving operand values using forwarding logic (from EX/MEM or MEM/WB).
//! - Performing the ALU operation or effective address calculation.
//! - Resolving branches. Fetch always predicts not taken, so every taken
//!   branch is a misprediction and redirects the program counter.

use tracing::trace;

use crate::core::cpu::CpuState;
use crate::core::pipeline::events::{CycleLog, NoteKind, StageName};
use crate::core::pipeline::hazards::{self, ForwardSource, Operand};
use crate::core::pipeline::latches::{ExMem, ExMemEntry, IdEx, MemWb};
use crate::core::units::Alu;

/// Result of the execute stage for one cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecuteOutcome {
    /// Next EX/MEM latch contents.
    pub ex_mem: ExMem,
    /// Target of a taken branch; younger instructions must be flushed.
    pub redirect: Option<u32>,
}

/// Executes the execute stage.
///
/// # Arguments
///
/// * `cpu` - CPU state (statistics are updated here)
/// * `id_ex` - The ID/EX latch at the start of the cycle
/// * `ex_mem` - The EX/MEM latch at the start of the cycle (forwarding source)
/// * `mem_wb` - The MEM/WB latch at the start of the cycle (forwarding source)
/// * `log` - Hazard log for the current cycle
///
/// # Returns
///
/// The next EX/MEM contents and, for a taken branch, the redirect target.
pub fn execute_stage(
    cpu: &mut CpuState,
    id_ex: &IdEx,
    ex_mem: &ExMem,
    mem_wb: &MemWb,
    log: &mut CycleLog,
) -> ExecuteOutcome {
    let Some(id) = &id_ex.entry else {
        return ExecuteOutcome::default();
    };

    let fwd = hazards::forward_operands(id, ex_mem, mem_wb);
    let operands = [
        (Operand::A, fwd.paths.a, id.rs),
        (Operand::B, fwd.paths.b, id.rt),
    ];
    for (operand, source, reg) in operands {
        if let (Some(source), Some(reg)) = (source, reg) {
            cpu.stats.forward_count += 1;
            log.record_forward(operand, source, reg);
        }
    }
    if fwd.paths.any() {
        let describe =
            |op: &str, src: Option<ForwardSource>| src.map(|s| format!("{op}\u{2190}{s}"));
        let parts: Vec<String> = [describe("A", fwd.paths.a), describe("B", fwd.paths.b)]
            .into_iter()
            .flatten()
            .collect();
        log.annotate(
            StageName::Execute,
            NoteKind::Forward,
            format!("Forwarding applied ({})", parts.join(", ")),
        );
    }

    let b = if id.ctrl.use_imm { id.imm } else { fwd.b };
    let alu = Alu::execute(id.ctrl.alu_op, fwd.a, b);

    let mut branch_taken = false;
    if id.ctrl.is_branch {
        cpu.stats.branch_count += 1;
        branch_taken = fwd.a == fwd.b;
        if branch_taken {
            cpu.stats.branch_mispredictions += 1;
        }
    }
    trace!(
        "EX  pc={:#06x} {} a={} b={} alu={} taken={}",
        id.pc, id.inst, fwd.a, b, alu, branch_taken
    );

    ExecuteOutcome {
        ex_mem: ExMem {
            entry: Some(ExMemEntry {
                pc: id.pc,
                inst: id.inst.clone(),
                dest: id.dest,
                alu,
                store_data: fwd.b,
                branch_taken,
                branch_target: id.branch_target,
                ctrl: id.ctrl,
            }),
        },
        redirect: id.branch_target.filter(|_| branch_taken),
    }
}
