//! Instruction Decode (ID) Stage.
//!
//! Derives control signals, reads the register file and checks for load-use
//! hazards. On a hazard the instruction stays in IF/ID and a bubble is sent
//! to execute instead.

use tracing::trace;

use crate::core::cpu::CpuState;
use crate::core::pipeline::events::CycleLog;
use crate::core::pipeline::hazards::need_stall_load_use;
use crate::core::pipeline::latches::{IdEx, IdExEntry, IfId};
use crate::core::pipeline::signals::control_unit;

/// Result of the decode stage for one cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeOutcome {
    /// Next ID/EX latch contents.
    pub id_ex: IdEx,
    /// Fetch must hold IF/ID and the program counter.
    pub stalled: bool,
}

/// Executes the decode stage.
///
/// # Arguments
///
/// * `cpu` - CPU state (register file is read, stall counter updated)
/// * `if_id` - The IF/ID latch at the start of the cycle
/// * `id_ex` - The ID/EX latch at the start of the cycle (hazard check)
/// * `log` - Hazard log for the current cycle
///
/// # Returns
///
/// The next ID/EX contents and whether the front end stalls.
pub fn decode_stage(
    cpu: &mut CpuState,
    if_id: &IfId,
    id_ex: &IdEx,
    log: &mut CycleLog,
) -> DecodeOutcome {
    let Some(entry) = &if_id.entry else {
        return DecodeOutcome::default();
    };

    let ctrl = control_unit(entry.inst.opcode);
    if ctrl.is_nop {
        return DecodeOutcome::default();
    }

    if let Some(reg) = need_stall_load_use(id_ex, if_id) {
        cpu.stats.stall_count += 1;
        log.record_stall(reg);
        trace!("ID  pc={:#06x} {} stalled on R{}", entry.pc, entry.inst, reg);
        return DecodeOutcome {
            id_ex: IdEx::default(),
            stalled: true,
        };
    }

    let inst = &entry.inst;
    let read = |reg: Option<u8>| reg.map_or(0, |r| cpu.regs.read(r));
    let rs_val = read(inst.rs);
    let rt_val = read(inst.rt);
    trace!("ID  pc={:#06x} {} rs={} rt={}", entry.pc, inst, rs_val, rt_val);

    DecodeOutcome {
        id_ex: IdEx {
            entry: Some(IdExEntry {
                pc: entry.pc,
                inst: inst.clone(),
                rs: inst.rs,
                rt: inst.rt,
                dest: inst.dest,
                rs_val,
                rt_val,
                imm: inst.imm.unwrap_or(0),
                branch_target: inst.branch_target,
                ctrl,
            }),
        },
        stalled: false,
    }
}
