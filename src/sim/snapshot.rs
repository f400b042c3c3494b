//! Immutable per-cycle views of the engine.

use std::sync::Arc;

use serde::Serialize;

use crate::core::arch::Gpr;
use crate::core::cpu::{CpuState, DataMemory};
use crate::core::pipeline::events::{CycleLog, HazardEvent, StageName, StageNote};
use crate::core::pipeline::hazards::ForwardingPaths;
use crate::core::pipeline::latches::PipelineRegisters;
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::{Instruction, Opcode};
use crate::stats::StatsView;

/// What one stage is working on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StageView {
    pub stage: StageName,
    /// Source text of the occupying instruction; `None` for a bubble.
    pub instruction: Option<Arc<str>>,
    /// Hazard annotation for this cycle.
    pub note: Option<StageNote>,
}

/// State of the machine after a cycle.
///
/// Registers and memory share storage with the engine until the engine next
/// writes, so taking a snapshot costs no copies and the snapshot never changes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    /// Cycles completed.
    pub cycle: u64,
    pub halted: bool,
    /// Views in pipeline order: IF, ID, EX, MEM, WB.
    pub stages: [StageView; 5],
    pub registers: Gpr,
    pub memory: DataMemory,
    pub stats: StatsView,
    /// Decode stalled this cycle.
    pub stalled: bool,
    /// A taken branch flushed the front end this cycle.
    pub flushed: bool,
    /// Forwarding used by execute this cycle.
    pub forwarding: ForwardingPaths,
    /// Hazard events of this cycle, in order.
    pub events: Vec<HazardEvent>,
}

impl Snapshot {
    /// Builds a snapshot from engine state.
    ///
    /// # Arguments
    ///
    /// * `cpu` - CPU state after the cycle
    /// * `latches` - Latches after the cycle
    /// * `current_fetch` - Instruction fetched this cycle
    /// * `log` - Hazard log of the cycle
    pub fn capture(
        cpu: &CpuState,
        latches: &PipelineRegisters,
        current_fetch: Option<&Instruction>,
        log: &CycleLog,
    ) -> Self {
        let view = |stage: StageName, instruction: Option<Arc<str>>| StageView {
            stage,
            instruction,
            note: log.note(stage).cloned(),
        };
        let fetch_text = current_fetch
            .filter(|inst| inst.opcode != Opcode::Nop)
            .map(|inst| inst.text.clone());

        Self {
            cycle: cpu.stats.cycle_count,
            halted: cpu.halted,
            stages: [
                view(StageName::Fetch, fetch_text),
                view(StageName::Decode, latches.if_id.display_text()),
                view(StageName::Execute, latches.id_ex.display_text()),
                view(StageName::Memory, latches.ex_mem.display_text()),
                view(StageName::Writeback, latches.mem_wb.display_text()),
            ],
            registers: cpu.regs.clone(),
            memory: cpu.mem.clone(),
            stats: cpu.stats.view(),
            stalled: log.stalled,
            flushed: log.flushed,
            forwarding: log.forwarding,
            events: log.events.clone(),
        }
    }

    pub fn stage(&self, stage: StageName) -> &StageView {
        &self.stages[stage.index()]
    }

    /// Register value, as of this snapshot.
    pub fn register(&self, idx: u8) -> i32 {
        self.registers.read(idx)
    }

    /// Memory word at a byte address, as of this snapshot.
    pub fn memory_word(&self, addr: u32) -> i32 {
        self.memory.read(addr)
    }

    /// One-line summary: cycle number and the occupant of every stage.
    pub fn pipeline_row(&self) -> String {
        let cells: Vec<String> = self
            .stages
            .iter()
            .map(|v| format!("{}: {:<18}", v.stage, v.instruction.as_deref().unwrap_or("-")))
            .collect();
        format!("{:>4} | {}", self.cycle, cells.join(" | "))
    }
}
