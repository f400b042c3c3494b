//! Memory Access (MEM) Stage.
//!
//! Performs the data memory access for loads and stores and selects the
//! value handed to writeback.

use tracing::trace;

use crate::core::cpu::CpuState;
use crate::core::pipeline::latches::{ExMem, MemWb, MemWbEntry};

/// Executes the memory stage.
///
/// # Arguments
///
/// * `cpu` - CPU state owning data memory
/// * `ex_mem` - The EX/MEM latch at the start of the cycle
///
/// # Returns
///
/// The next MEM/WB latch contents.
pub fn mem_stage(cpu: &mut CpuState, ex_mem: &ExMem) -> MemWb {
    let Some(ex) = &ex_mem.entry else {
        return MemWb::default();
    };

    let addr = ex.alu as u32;
    let mut loaded = 0;
    if ex.ctrl.mem_read {
        loaded = cpu.mem.read(addr);
    }
    if ex.ctrl.mem_write {
        cpu.mem.write(addr, ex.store_data);
    }
    let write_data = if ex.ctrl.mem_to_reg { loaded } else { ex.alu };
    trace!("MEM pc={:#06x} {} addr={:#x}", ex.pc, ex.inst, addr);

    MemWb {
        entry: Some(MemWbEntry {
            pc: ex.pc,
            inst: ex.inst.clone(),
            dest: ex.dest,
            write_data,
            ctrl: ex.ctrl,
        }),
    }
}
