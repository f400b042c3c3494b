//! Interactive session with step-back.
//!
//! A [`Session`] wraps a [`PipelineEngine`] and records the state before every
//! step so the caller can walk backwards through the run.

use tracing::debug;

use crate::asm::ParseResult;
use crate::common::SimError;
use crate::core::{EngineOptions, PipelineEngine};
use crate::sim::history::{History, HistoryEntry};
use crate::sim::programs::Seed;
use crate::sim::snapshot::Snapshot;

/// Engine plus undo history.
#[derive(Clone, Debug)]
pub struct Session {
    engine: PipelineEngine,
    history: History,
    seed: Seed,
    current: Snapshot,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl Session {
    /// Creates a session with an empty program and unbounded history.
    pub fn new(options: EngineOptions) -> Self {
        Self::with_history(options, History::new())
    }

    pub fn with_history(options: EngineOptions, history: History) -> Self {
        let engine = PipelineEngine::with_options(options);
        let current = engine.snapshot();
        Self {
            engine,
            history,
            seed: Seed::default(),
            current,
        }
    }

    pub fn engine(&self) -> &PipelineEngine {
        &self.engine
    }

    /// Snapshot currently on display.
    pub fn snapshot(&self) -> &Snapshot {
        &self.current
    }

    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub fn can_step_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Sets the initial state applied on every load and reset, and applies it now.
    pub fn set_seed(&mut self, seed: Seed) -> Result<(), SimError> {
        self.seed = seed;
        self.reset()
    }

    /// Assembles and loads a program, discarding history.
    ///
    /// On parse errors nothing but the history changes.
    pub fn load_source(&mut self, source: &str) -> Result<ParseResult, SimError> {
        self.history.clear();
        let result = self.engine.load_program_from_source(source);
        if result.is_ok() {
            self.seed.apply(&mut self.engine)?;
            self.current = self.engine.snapshot();
        }
        Ok(result)
    }

    /// Resets the engine, reapplies the seed and discards history.
    pub fn reset(&mut self) -> Result<(), SimError> {
        self.history.clear();
        self.engine.reset(false);
        self.seed.apply(&mut self.engine)?;
        self.current = self.engine.snapshot();
        Ok(())
    }

    /// Steps one cycle, saving the current point first.
    ///
    /// A halted session is left as is.
    pub fn step(&mut self) -> &Snapshot {
        if self.current.halted {
            return &self.current;
        }
        self.history.push(HistoryEntry {
            snapshot: self.current.clone(),
            state: self.engine.export_state(),
        });
        self.current = self.engine.step();
        &self.current
    }

    /// Returns to the point before the most recent step.
    ///
    /// # Returns
    ///
    /// The restored snapshot, or `None` when there is nothing to undo.
    pub fn step_back(&mut self) -> Option<&Snapshot> {
        let entry = self.history.pop()?;
        self.engine.restore_state(&entry.state);
        self.current = entry.snapshot;
        debug!(cycle = self.current.cycle, depth = self.history.len(), "stepped back");
        Some(&self.current)
    }

    /// Steps until halted or `max_cycles` steps have been taken.
    ///
    /// # Returns
    ///
    /// The number of steps taken.
    pub fn run(&mut self, max_cycles: u64) -> u64 {
        let mut ran = 0;
        while !self.current.halted && ran < max_cycles {
            self.step();
            ran += 1;
        }
        ran
    }
}
