//! Pipeline stage implementations.
//!
//! Contains the five stages of the instruction pipeline:
//! - Fetch: Retrieves instructions from the program
//! - Decode: Derives control signals, reads registers, detects load-use hazards
//! - Execute: Performs ALU operations, forwarding and branch resolution
//! - Memory: Handles load/store operations
//! - Writeback: Writes results back to registers
//!
//! Each stage reads the latches as they were at the start of the cycle and
//! returns its contribution to the next latch values; the engine commits
//! them together.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

pub use decode::{decode_stage, DecodeOutcome};
pub use execute::{execute_stage, ExecuteOutcome};
pub use fetch::{fetch_stage, FetchOutcome};
pub use memory::mem_stage;
pub use writeback::wb_stage;
