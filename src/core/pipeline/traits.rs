//! Pipeline latch interface.
//!
//! Defines the behaviour shared by the four inter-stage latches so the
//! engine can flush them and test for drained state uniformly.

use std::sync::Arc;

use crate::isa::Instruction;

/// Represents a pipeline latch (inter-stage buffer).
///
/// A latch holds at most one instruction. An empty latch is a bubble.
pub trait PipelineLatch {
    /// Replaces the contents with a bubble.
    ///
    /// Called when a taken branch squashes younger instructions.
    fn flush(&mut self);

    /// Checks if the latch holds no useful work.
    ///
    /// # Returns
    ///
    /// `true` for an empty latch or one holding a no-op.
    fn is_bubble(&self) -> bool;

    /// The held instruction, if any.
    fn instruction(&self) -> Option<&Instruction>;

    /// Source text of the held instruction, or `None` for a bubble.
    fn display_text(&self) -> Option<Arc<str>> {
        if self.is_bubble() {
            None
        } else {
            self.instruction().map(|inst| inst.text.clone())
        }
    }
}
