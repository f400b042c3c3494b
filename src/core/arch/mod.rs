//! Architectural state definitions.

/// General-purpose register file.
pub mod gpr;

pub use gpr::Gpr;
