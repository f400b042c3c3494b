//! Writeback (WB) Stage.
//!
//! Commits the result in MEM/WB to the register file. Running before the
//! other stages in a cycle lets decode read the value written this cycle.

use tracing::trace;

use crate::core::cpu::CpuState;
use crate::core::pipeline::latches::MemWb;

/// Executes the writeback stage.
///
/// # Arguments
///
/// * `cpu` - CPU state receiving the register write
/// * `mem_wb` - The MEM/WB latch at the start of the cycle
pub fn wb_stage(cpu: &mut CpuState, mem_wb: &MemWb) {
    let Some(wb) = &mem_wb.entry else {
        return;
    };
    if wb.ctrl.is_nop {
        return;
    }

    if wb.ctrl.reg_write {
        if let Some(dest) = wb.dest {
            cpu.regs.write(dest, wb.write_data);
        }
    }
    cpu.stats.instructions_completed += 1;
    trace!("WB  pc={:#06x} {} -> {:?}", wb.pc, wb.inst, wb.dest);
}
