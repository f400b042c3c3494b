//! Configuration loading.
//!
//! Configuration is TOML. Every section and key is optional, so an empty
//! file yields [`Config::default`].
//!
//! ```toml
//! [general]
//! trace_instructions = false
//! max_cycles = 10000
//!
//! [memory]
//! words = 1024
//!
//! [seed]
//! registers = [{ index = 2, value = 100 }]
//! memory = [{ address = 100, value = 7 }]
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{SimError, MEMORY_WORDS};
use crate::core::EngineOptions;
use crate::sim::programs::Seed;

const DEFAULT_MAX_CYCLES: u64 = 10_000;

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub memory: MemoryConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Emit per-stage trace logging.
    #[serde(default)]
    pub trace_instructions: bool,
    /// Cycle bound for a command-line run.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            max_cycles: default_max_cycles(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct MemoryConfig {
    /// Data memory capacity in 32-bit words.
    #[serde(default = "default_memory_words")]
    pub words: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            words: default_memory_words(),
        }
    }
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SeedConfig {
    pub registers: Vec<RegisterSeed>,
    pub memory: Vec<MemorySeed>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct RegisterSeed {
    pub index: usize,
    pub value: i32,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct MemorySeed {
    /// Word-aligned byte address.
    pub address: u32,
    pub value: i32,
}

impl Config {
    /// Reads and parses a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parses configuration text.
    pub fn parse(text: &str) -> Result<Self, SimError> {
        Ok(toml::from_str(text)?)
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            memory_words: self.memory.words,
        }
    }

    /// Initial state described by the `[seed]` section.
    pub fn seed(&self) -> Seed {
        Seed {
            registers: self.seed.registers.iter().map(|r| (r.index, r.value)).collect(),
            memory: self.seed.memory.iter().map(|m| (m.address, m.value)).collect(),
        }
    }
}

fn default_max_cycles() -> u64 {
    DEFAULT_MAX_CYCLES
}

fn default_memory_words() -> usize {
    MEMORY_WORDS
}
