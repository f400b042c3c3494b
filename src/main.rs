//! Pipeline Simulator CLI.
//!
//! The main executable for the simulator. It handles command-line argument
//! parsing, logging setup, program loading and the simulation loop.
//!
//! # Usage
//!
//! * `pipeline-sim prog.s` assembles and runs a program file.
//! * `pipeline-sim --demo register-write` runs a built-in demonstration.
//! * `pipeline-sim` with no program runs the default sample program.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pipeline_sim::common::SimError;
use pipeline_sim::config::Config;
use pipeline_sim::sim::{self, Seed, Session, Snapshot};

/// Command-line arguments for the pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "Five-stage pipeline simulator")]
struct Args {
    /// Assembly source file.
    file: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a built-in demonstration program instead of a file.
    #[arg(short, long, conflicts_with = "file")]
    demo: Option<String>,

    /// Cycle bound (overrides the configuration).
    #[arg(short, long)]
    max_cycles: Option<u64>,

    /// Print every snapshot as a JSON line.
    #[arg(long)]
    json: bool,

    /// Enable per-stage trace logging.
    #[arg(long)]
    trace: bool,

    /// List the demonstration programs and exit.
    #[arg(long)]
    list_demos: bool,
}

fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("pipeline_sim=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_snapshot(snap: &Snapshot, json: bool) -> Result<(), SimError> {
    if json {
        println!("{}", serde_json::to_string(snap)?);
        return Ok(());
    }
    println!("{}", snap.pipeline_row());
    for event in &snap.events {
        println!("       {event}");
    }
    Ok(())
}

fn run(args: Args) -> Result<(), SimError> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    init_logging(
        args.trace || config.general.trace_instructions || cfg!(feature = "always-trace"),
    );

    if args.list_demos {
        for demo in &sim::DEMO_PROGRAMS {
            println!("{}", demo.summary());
        }
        return Ok(());
    }

    let (source, mut seed) = match (&args.file, &args.demo) {
        (Some(path), _) => (fs::read_to_string(path)?, Seed::default()),
        (None, Some(name)) => {
            let demo =
                sim::find_demo(name).ok_or_else(|| SimError::UnknownDemo(name.clone()))?;
            (demo.source.to_string(), demo.seed())
        }
        (None, None) => (sim::DEFAULT_PROGRAM_SOURCE.to_string(), sim::default_seed()),
    };
    let configured = config.seed();
    seed.registers.extend(configured.registers);
    seed.memory.extend(configured.memory);

    let mut session = Session::new(config.engine_options());
    session.set_seed(seed)?;
    let parsed = session.load_source(&source)?;
    if !parsed.is_ok() {
        for err in &parsed.errors {
            eprintln!("{err}");
        }
        return Err(SimError::Assembly(parsed.errors));
    }

    let max_cycles = args.max_cycles.unwrap_or(config.general.max_cycles);
    print_snapshot(session.snapshot(), args.json)?;
    while !session.snapshot().halted && session.snapshot().cycle < max_cycles {
        print_snapshot(session.step(), args.json)?;
    }

    let final_snap = session.snapshot();
    if !final_snap.halted {
        eprintln!("stopped after {max_cycles} cycles without halting");
    }
    if !args.json {
        print!("{}", final_snap.registers.dump());
        final_snap.stats.counters.print();
    }
    Ok(())
}

/// Main entry point for the pipeline simulator.
///
/// # Behavior
///
/// 1. **Configuration**: Parses command-line arguments and the optional TOML file.
/// 2. **Loading**: Assembles the program; parse errors are reported per line.
/// 3. **Seeding**: Applies demo and configured initial register/memory values.
/// 4. **Simulation Loop**: Steps until the pipeline drains or the cycle bound is hit.
/// 5. **Teardown**: Prints final registers and statistics.
fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(SimError::Assembly(errors)) => {
            eprintln!("assembly failed with {} error(s)", errors.len());
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
