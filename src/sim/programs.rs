//! Built-in programs and initial-state seeds.

use crate::asm;
use crate::common::SimError;
use crate::core::PipelineEngine;
use crate::isa::Instruction;

/// Sample program exercising forwarding, a load-use stall, a store and a
/// taken branch that squashes two instructions.
pub const DEFAULT_PROGRAM_SOURCE: &str = "# Sample pipeline program
ADD R1, R0, R0
ADD R2, R1, R1
LW R3, 0(R2)
ADD R4, R1, R3
SW R4, 4(R2)
BEQ R1, R4, END
ADD R5, R5, R5
END: SUB R6, R4, R1
";

/// Assembles [`DEFAULT_PROGRAM_SOURCE`].
pub fn default_program() -> Result<Vec<Instruction>, SimError> {
    let result = asm::parse(DEFAULT_PROGRAM_SOURCE);
    if result.is_ok() {
        Ok(result.instructions)
    } else {
        Err(SimError::Assembly(result.errors))
    }
}

/// Initial register and memory values applied after loading a program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Seed {
    /// `(register index, value)` pairs.
    pub registers: Vec<(usize, i32)>,
    /// `(byte address, value)` pairs.
    pub memory: Vec<(u32, i32)>,
}

impl Seed {
    pub fn is_empty(&self) -> bool {
        self.registers.is_empty() && self.memory.is_empty()
    }

    /// Writes the seed into a freshly loaded or reset engine.
    pub fn apply(&self, engine: &mut PipelineEngine) -> Result<(), SimError> {
        for &(reg, value) in &self.registers {
            engine.preload_register(reg, value)?;
        }
        for &(addr, value) in &self.memory {
            engine.preload_memory(addr, value)?;
        }
        Ok(())
    }
}

/// Register values the default program is demonstrated with.
pub fn default_seed() -> Seed {
    Seed {
        registers: vec![(1, 5), (2, 100), (3, 8), (4, 0), (5, 2)],
        memory: vec![(100, 0)],
    }
}

/// A named demonstration program with its starting state.
#[derive(Clone, Copy, Debug)]
pub struct DemoProgram {
    /// Short identifier used on the command line.
    pub name: &'static str,
    /// Heading shown in demo listings.
    pub title: &'static str,
    pub description: &'static str,
    pub source: &'static str,
    pub registers: &'static [(usize, i32)],
    pub memory: &'static [(u32, i32)],
}

impl DemoProgram {
    /// One listing line: name, title and description.
    pub fn summary(&self) -> String {
        format!("{:<18} {}: {}", self.name, self.title, self.description)
    }

    pub fn seed(&self) -> Seed {
        Seed {
            registers: self.registers.to_vec(),
            memory: self.memory.to_vec(),
        }
    }
}

/// Demonstration programs.
pub static DEMO_PROGRAMS: [DemoProgram; 2] = [
    DemoProgram {
        name: "register-write",
        title: "Program A - Register Write Demo",
        description: "Demonstrates forwarding and register write-back with two ADD instructions.",
        source: "# Program A - Register Write Demo
ADD R1, R2, R3
ADD R4, R1, R5
NOP
",
        registers: &[(1, 0), (2, 5), (3, 8), (4, 0), (5, 2)],
        memory: &[],
    },
    DemoProgram {
        name: "memory-roundtrip",
        title: "Program B - Memory Write & Read",
        description: "Stores R1 to memory and immediately loads it back into R3.",
        source: "# Program B - Memory Write & Read
SW R1, 0(R2)
LW R3, 0(R2)
NOP
",
        registers: &[(1, 11), (2, 100), (3, 0), (4, 0), (5, 1)],
        memory: &[(100, 0)],
    },
];

/// Looks up a demo by [`DemoProgram::name`].
pub fn find_demo(name: &str) -> Option<&'static DemoProgram> {
    DEMO_PROGRAMS.iter().find(|demo| demo.name == name)
}
