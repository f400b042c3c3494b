//! Functional units used by the execute stage.

/// Integer arithmetic logic unit.
pub mod alu;

pub use alu::Alu;
