//! Per-cycle hazard log.
//!
//! The stages record what they did about hazards into a [`CycleLog`]: stall
//! and flush flags, which operands were forwarded, a short note per stage and
//! the ordered list of [`HazardEvent`]s. The log is rebuilt every cycle.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::core::pipeline::hazards::{ForwardSource, ForwardingPaths, Operand};

/// The five pipeline stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum StageName {
    #[serde(rename = "IF")]
    Fetch,
    #[serde(rename = "ID")]
    Decode,
    #[serde(rename = "EX")]
    Execute,
    #[serde(rename = "MEM")]
    Memory,
    #[serde(rename = "WB")]
    Writeback,
}

impl StageName {
    /// Stages in pipeline order.
    pub const ALL: [StageName; 5] = [
        StageName::Fetch,
        StageName::Decode,
        StageName::Execute,
        StageName::Memory,
        StageName::Writeback,
    ];

    /// Position in [`StageName::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            StageName::Fetch => "IF",
            StageName::Decode => "ID",
            StageName::Execute => "EX",
            StageName::Memory => "MEM",
            StageName::Writeback => "WB",
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of hazard handling that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HazardKind {
    Stall,
    Forward,
    Flush,
}

/// One hazard-handling action taken during a cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HazardEvent {
    pub kind: HazardKind,
    /// Short cause: `load-use`, `branch-taken`, `operand-A`, `operand-B`.
    pub reason: &'static str,
    /// Register involved, if any.
    pub reg: Option<u8>,
    /// Latch a forwarded value came from.
    pub from: Option<ForwardSource>,
    /// Stage that received a forwarded value.
    pub to: Option<StageName>,
    /// Cycle during which the event occurred.
    pub cycle: u64,
}

impl fmt::Display for HazardEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            HazardKind::Stall => "STALL",
            HazardKind::Forward => "FORWARD",
            HazardKind::Flush => "FLUSH",
        };
        write!(f, "{kind} {}", self.reason)?;
        if let Some(reg) = self.reg {
            write!(f, " R{reg}")?;
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            write!(f, " {from}->{to}")?;
        }
        Ok(())
    }
}

/// Kind of per-stage annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Stall,
    Forward,
}

/// Hazard annotation attached to one stage view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StageNote {
    pub kind: NoteKind,
    pub description: String,
}

/// Everything recorded about hazards during one cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CycleLog {
    /// Cycle the log belongs to.
    pub cycle: u64,
    /// Decode held its instruction this cycle.
    pub stalled: bool,
    /// A taken branch squashed younger instructions.
    pub flushed: bool,
    /// Forwarding sources used by execute.
    pub forwarding: ForwardingPaths,
    /// Events in the order they occurred.
    pub events: Vec<HazardEvent>,
    /// Annotation per stage, indexed by [`StageName::index`].
    pub notes: [Option<StageNote>; 5],
}

impl CycleLog {
    /// Starts an empty log for `cycle`.
    pub fn begin(cycle: u64) -> Self {
        Self {
            cycle,
            ..Self::default()
        }
    }

    pub fn note(&self, stage: StageName) -> Option<&StageNote> {
        self.notes[stage.index()].as_ref()
    }

    pub fn annotate(&mut self, stage: StageName, kind: NoteKind, description: String) {
        self.notes[stage.index()] = Some(StageNote { kind, description });
    }

    /// Records a load-use stall in decode.
    pub fn record_stall(&mut self, reg: u8) {
        self.stalled = true;
        self.annotate(
            StageName::Decode,
            NoteKind::Stall,
            format!("Load-use hazard on R{reg}"),
        );
        self.push(HazardEvent {
            kind: HazardKind::Stall,
            reason: "load-use",
            reg: Some(reg),
            from: None,
            to: None,
            cycle: self.cycle,
        });
    }

    /// Records one forwarded operand.
    pub fn record_forward(&mut self, operand: Operand, source: ForwardSource, reg: u8) {
        match operand {
            Operand::A => self.forwarding.a = Some(source),
            Operand::B => self.forwarding.b = Some(source),
        }
        self.push(HazardEvent {
            kind: HazardKind::Forward,
            reason: operand.reason(),
            reg: Some(reg),
            from: Some(source),
            to: Some(StageName::Execute),
            cycle: self.cycle,
        });
    }

    /// Records a flush caused by a taken branch.
    pub fn record_flush(&mut self) {
        self.flushed = true;
        self.annotate(
            StageName::Fetch,
            NoteKind::Stall,
            "Flushed due to taken branch".to_string(),
        );
        self.push(HazardEvent {
            kind: HazardKind::Flush,
            reason: "branch-taken",
            reg: None,
            from: None,
            to: None,
            cycle: self.cycle,
        });
    }

    fn push(&mut self, event: HazardEvent) {
        debug!(cycle = self.cycle, "{event}");
        self.events.push(event);
    }
}
