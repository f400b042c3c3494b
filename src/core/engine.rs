//! Pipeline engine.
//!
//! [`PipelineEngine`] owns the program, the CPU state, the four latches and
//! the instruction currently in fetch, and advances them one clock cycle per
//! [`step`](PipelineEngine::step). A cycle runs the stages from writeback back
//! to fetch against the latches as they stood at the start of the cycle and
//! commits all new latch values together, so every stage sees a consistent
//! previous cycle.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::asm::{self, ParseResult};
use crate::common::constants::WORD_SHIFT;
use crate::common::{SimError, MEMORY_WORDS, NUM_REGISTERS, WORD_BYTES};
use crate::core::cpu::CpuState;
use crate::core::pipeline::events::CycleLog;
use crate::core::pipeline::latches::PipelineRegisters;
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::Instruction;
use crate::sim::snapshot::Snapshot;

/// Construction parameters for a [`PipelineEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    /// Data memory capacity in 32-bit words.
    pub memory_words: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            memory_words: MEMORY_WORDS,
        }
    }
}

/// Complete restorable engine state.
///
/// Register file and memory are copy-on-write, so an exported state is an
/// independent value: later engine activity never changes it and restoring it
/// never lets the engine write into the caller's copy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EngineState {
    pub cpu: CpuState,
    pub latches: PipelineRegisters,
    /// Instruction fetched in the most recent cycle.
    pub current_fetch: Option<Instruction>,
    /// Hazard log of the most recent cycle.
    pub log: CycleLog,
}

/// Cycle-accurate five-stage pipeline simulator.
#[derive(Clone, Debug)]
pub struct PipelineEngine {
    options: EngineOptions,
    program: Arc<[Instruction]>,
    cpu: CpuState,
    latches: PipelineRegisters,
    current_fetch: Option<Instruction>,
    log: CycleLog,
}

impl Default for PipelineEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineEngine {
    /// Creates an engine with default options and an empty program.
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    /// Creates an engine with an empty program.
    ///
    /// An empty program is halted from the start.
    pub fn with_options(options: EngineOptions) -> Self {
        let mut engine = Self {
            options,
            program: Arc::from(Vec::new()),
            cpu: CpuState::new(options.memory_words),
            latches: PipelineRegisters::default(),
            current_fetch: None,
            log: CycleLog::default(),
        };
        engine.reset(false);
        engine
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// The loaded program.
    pub fn program(&self) -> &[Instruction] {
        &self.program
    }

    pub fn cpu(&self) -> &CpuState {
        &self.cpu
    }

    pub fn is_halted(&self) -> bool {
        self.cpu.halted
    }

    /// Replaces the program and resets all state.
    pub fn load_program(&mut self, instructions: Vec<Instruction>) {
        self.program = Arc::from(instructions);
        info!(instructions = self.program.len(), "program loaded");
        self.reset(false);
    }

    /// Assembles `source` and loads it when it has no errors.
    ///
    /// # Returns
    ///
    /// The parse result. When it carries errors the engine is left untouched.
    pub fn load_program_from_source(&mut self, source: &str) -> ParseResult {
        let result = asm::parse(source);
        if result.is_ok() {
            self.load_program(result.instructions.clone());
        } else {
            debug!(errors = result.errors.len(), "program rejected");
        }
        result
    }

    /// Assembles and loads `source`, failing on any parse error.
    pub fn try_load_source(&mut self, source: &str) -> Result<(), SimError> {
        let result = self.load_program_from_source(source);
        if result.is_ok() {
            Ok(())
        } else {
            Err(SimError::Assembly(result.errors))
        }
    }

    /// Resets CPU and pipeline state.
    ///
    /// # Arguments
    ///
    /// * `clear_program` - Also drop the loaded program.
    pub fn reset(&mut self, clear_program: bool) {
        if clear_program {
            self.program = Arc::from(Vec::new());
        }
        self.cpu = CpuState::new(self.options.memory_words);
        self.cpu.halted = self.program.is_empty();
        self.latches = PipelineRegisters::default();
        self.current_fetch = None;
        self.log = CycleLog::default();
        debug!(clear_program, halted = self.cpu.halted, "engine reset");
    }

    /// Sets an initial register value.
    ///
    /// Writes to R0 are discarded like any other write.
    pub fn preload_register(&mut self, index: usize, value: i32) -> Result<(), SimError> {
        if index >= NUM_REGISTERS {
            return Err(SimError::RegisterIndex(index));
        }
        self.cpu.regs.write(index as u8, value);
        Ok(())
    }

    /// Sets an initial memory word.
    ///
    /// # Arguments
    ///
    /// * `addr` - Word-aligned byte address inside data memory
    /// * `value` - Value to store
    pub fn preload_memory(&mut self, addr: u32, value: i32) -> Result<(), SimError> {
        if addr % WORD_BYTES != 0 || !self.cpu.mem.contains(addr) {
            return Err(SimError::MemoryAddress(addr));
        }
        self.cpu.mem.write(addr, value);
        Ok(())
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// Once halted, further calls change nothing and return the same snapshot.
    ///
    /// # Returns
    ///
    /// The snapshot after the cycle.
    pub fn step(&mut self) -> Snapshot {
        if self.cpu.halted {
            return self.snapshot();
        }

        let cycle = self.cpu.stats.cycle_count + 1;
        let mut log = CycleLog::begin(cycle);
        let prev = &self.latches;

        wb_stage(&mut self.cpu, &prev.mem_wb);
        let mem_wb = mem_stage(&mut self.cpu, &prev.ex_mem);
        let ex = execute_stage(&mut self.cpu, &prev.id_ex, &prev.ex_mem, &prev.mem_wb, &mut log);
        let id = decode_stage(&mut self.cpu, &prev.if_id, &prev.id_ex, &mut log);
        let fetched = fetch_stage(&self.program, self.cpu.pc, &prev.if_id, id.stalled);

        if !id.stalled {
            self.current_fetch = fetched.if_id.instruction().cloned();
        }
        let mut next = PipelineRegisters {
            if_id: fetched.if_id,
            id_ex: id.id_ex,
            ex_mem: ex.ex_mem,
            mem_wb,
        };

        match ex.redirect {
            Some(target) => {
                next.if_id.flush();
                next.id_ex.flush();
                self.current_fetch = None;
                log.record_flush();
                self.cpu.pc = target;
            }
            None => self.cpu.pc = fetched.next_pc,
        }

        self.latches = next;
        self.log = log;
        self.cpu.stats.cycle_count = cycle;

        let end = self.program.len();
        if self.latches.is_drained() && (self.cpu.pc >> WORD_SHIFT) as usize >= end {
            self.cpu.halted = true;
            self.current_fetch = None;
            info!(
                cycles = self.cpu.stats.cycle_count,
                completed = self.cpu.stats.instructions_completed,
                "pipeline drained, halting"
            );
        }

        self.snapshot()
    }

    /// Runs until halted or `max_cycles` further cycles have elapsed.
    ///
    /// # Returns
    ///
    /// The number of cycles stepped.
    pub fn run(&mut self, max_cycles: u64) -> u64 {
        let mut ran = 0;
        while !self.cpu.halted && ran < max_cycles {
            self.step();
            ran += 1;
        }
        ran
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(
            &self.cpu,
            &self.latches,
            self.current_fetch.as_ref(),
            &self.log,
        )
    }

    /// Exports an independent copy of the full state.
    pub fn export_state(&self) -> EngineState {
        EngineState {
            cpu: self.cpu.clone(),
            latches: self.latches.clone(),
            current_fetch: self.current_fetch.clone(),
            log: self.log.clone(),
        }
    }

    /// Replaces the live state with a previously exported one.
    pub fn restore_state(&mut self, state: &EngineState) {
        self.cpu = state.cpu.clone();
        self.latches = state.latches.clone();
        self.current_fetch = state.current_fetch.clone();
        self.log = state.log.clone();
        debug!(cycle = self.cpu.stats.cycle_count, "state restored");
    }
}
