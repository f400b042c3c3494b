//! Simulation statistics collection and reporting.
//!
//! Tracks the cumulative pipeline counters and derives the CPI and branch
//! prediction accuracy shown with every snapshot.

use serde::Serialize;

/// Cumulative pipeline counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Clock cycles simulated.
    pub cycle_count: u64,
    /// Instructions that reached write-back.
    pub instructions_completed: u64,
    /// Cycles lost to load-use stalls.
    pub stall_count: u64,
    /// Operand values supplied by forwarding.
    pub forward_count: u64,
    /// Branches resolved in execute.
    pub branch_count: u64,
    /// Branches that were taken, and therefore mispredicted.
    pub branch_mispredictions: u64,
}

impl PipelineStats {
    /// Cycles per completed instruction.
    ///
    /// # Returns
    ///
    /// `cycles / completed`, or the raw cycle count before anything completes.
    pub fn cpi(&self) -> f64 {
        if self.instructions_completed > 0 {
            self.cycle_count as f64 / self.instructions_completed as f64
        } else {
            self.cycle_count as f64
        }
    }

    /// Completed instructions per cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycle_count > 0 {
            self.instructions_completed as f64 / self.cycle_count as f64
        } else {
            0.0
        }
    }

    /// Percentage of branches the not-taken prediction got right.
    ///
    /// # Returns
    ///
    /// A value in `0.0..=100.0`; `100.0` when no branch has executed.
    pub fn branch_accuracy(&self) -> f64 {
        if self.branch_count > 0 {
            let correct = self.branch_count - self.branch_mispredictions;
            correct as f64 / self.branch_count as f64 * 100.0
        } else {
            100.0
        }
    }

    /// Counters plus the derived ratios.
    pub fn view(&self) -> StatsView {
        StatsView {
            counters: *self,
            cpi: self.cpi(),
            branch_accuracy: self.branch_accuracy(),
        }
    }

    /// Renders a formatted summary of the run.
    pub fn report(&self) -> String {
        let rule = "==========================================================";
        let thin = "----------------------------------------------------------";
        let mut out = String::new();
        out.push_str(&format!("\n{rule}\nPIPELINE SIMULATION STATISTICS\n{rule}\n"));
        out.push_str(&format!("sim_cycles               {}\n", self.cycle_count));
        out.push_str(&format!("sim_insts                {}\n", self.instructions_completed));
        out.push_str(&format!("sim_cpi                  {:.4}\n", self.cpi()));
        out.push_str(&format!("sim_ipc                  {:.4}\n", self.ipc()));
        out.push_str(&format!("{thin}\nHAZARDS\n"));
        out.push_str(&format!("  stalls.load_use        {}\n", self.stall_count));
        out.push_str(&format!("  forwards               {}\n", self.forward_count));
        out.push_str(&format!("{thin}\nBRANCH PREDICTION (not taken)\n"));
        out.push_str(&format!("  bp.lookups             {}\n", self.branch_count));
        out.push_str(&format!("  bp.mispredicts         {}\n", self.branch_mispredictions));
        out.push_str(&format!("  bp.accuracy            {:.2}%\n", self.branch_accuracy()));
        out.push_str(rule);
        out
    }

    /// Prints [`report`](Self::report) to stdout.
    pub fn print(&self) {
        println!("{}", self.report());
    }
}

/// Counters with derived ratios, as carried by a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StatsView {
    #[serde(flatten)]
    pub counters: PipelineStats,
    pub cpi: f64,
    pub branch_accuracy: f64,
}
