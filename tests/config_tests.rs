//! Tests for configuration loading.

use pipeline_sim::common::SimError;
use pipeline_sim::config::Config;
use pipeline_sim::sim::Seed;

/// Tests that an empty file yields the defaults.
#[test]
fn test_empty_config() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
    assert!(!config.general.trace_instructions);
    assert_eq!(config.general.max_cycles, 10_000);
    assert_eq!(config.engine_options().memory_words, 1024);
    assert!(config.seed().is_empty());
}

/// Tests a fully specified configuration.
#[test]
fn test_full_config() {
    let text = r#"
[general]
trace_instructions = true
max_cycles = 50

[memory]
words = 64

[seed]
registers = [{ index = 2, value = 100 }, { index = 5, value = -3 }]
memory = [{ address = 8, value = 7 }]
"#;
    let config = Config::parse(text).unwrap();
    assert!(config.general.trace_instructions);
    assert_eq!(config.general.max_cycles, 50);
    assert_eq!(config.engine_options().memory_words, 64);
    assert_eq!(
        config.seed(),
        Seed {
            registers: vec![(2, 100), (5, -3)],
            memory: vec![(8, 7)],
        }
    );
}

/// Tests that partial sections keep defaults for missing keys.
#[test]
fn test_partial_config() {
    let config = Config::parse("[general]\nmax_cycles = 3\n").unwrap();
    assert_eq!(config.general.max_cycles, 3);
    assert!(!config.general.trace_instructions);
    assert_eq!(config.memory.words, 1024);
}

/// Tests that malformed TOML is reported as a configuration error.
#[test]
fn test_invalid_config() {
    let err = Config::parse("[memory]\nwords = \"many\"\n").unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
    assert!(err.to_string().starts_with("invalid configuration"));
}

/// Tests that a missing file is reported as an I/O error.
#[test]
fn test_missing_config_file() {
    let err = Config::from_file("/nonexistent/pipeline-sim.toml").unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
}
