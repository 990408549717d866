//! Headless runner binary.
//!
//! # Usage
//!
//! ```bash
//! # Play a scenario, one JSON line per turn on stdout
//! tactics-headless run scenarios/skirmish.ron
//!
//! # Override tunables and cap the turn count
//! tactics-headless run scenarios/corridor.ron --config tuning.ron --turns 20
//!
//! # Replay a scenario several times and compare final hashes
//! tactics-headless verify scenarios/skirmish.ron --runs 5
//! ```
//!
//! # Protocol
//!
//! Logs go to stderr so that stdout stays a clean JSON lines stream.

use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tactics_core::config::TacticsConfig;
use tactics_headless::protocol::Response;
use tactics_headless::runner::{replay_hashes, HeadlessRunner, RunConfig};
use tactics_headless::scenario::{load_config, Scenario, ScenarioError};

#[derive(Parser)]
#[command(name = "tactics-headless")]
#[command(about = "Headless tactics runner for AI tuning and determinism checks")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a scenario and print turn reports as JSON lines
    Run {
        /// Scenario file (RON)
        scenario: PathBuf,

        /// Tunables file (RON), overriding the scenario's own
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum turns to play
        #[arg(short, long, default_value = "100")]
        turns: u64,

        /// Print the state hash after every turn
        #[arg(long)]
        hashes: bool,
    },

    /// Verify that a scenario replays deterministically
    Verify {
        /// Scenario file (RON)
        scenario: PathBuf,

        /// Tunables file (RON), overriding the scenario's own
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Turns per run
        #[arg(short, long, default_value = "100")]
        turns: u64,

        /// Number of runs to compare
        #[arg(short, long, default_value = "3")]
        runs: u32,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for protocol)
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            config,
            turns,
            hashes,
        } => cmd_run(&scenario, config.as_deref(), turns, hashes),
        Commands::Verify {
            scenario,
            config,
            turns,
            runs,
        } => cmd_verify(&scenario, config.as_deref(), turns, runs),
    }
}

/// Load a scenario and the optional tunables override.
fn load(
    scenario: &Path,
    config: Option<&Path>,
) -> Result<(Scenario, Option<TacticsConfig>), ScenarioError> {
    let scenario = Scenario::load(scenario)?;
    let config = config.map(load_config).transpose()?;
    Ok((scenario, config))
}

/// Report a setup failure on both streams and exit.
fn fail(error: &ScenarioError) -> ! {
    print!("{}", Response::error(error.to_string()).to_json_line());
    eprintln!("Error: {error}");
    std::process::exit(1);
}

/// Play one scenario.
fn cmd_run(scenario: &Path, config: Option<&Path>, turns: u64, hashes: bool) {
    tracing::info!("Running scenario: {}", scenario.display());

    let (scenario, config) = load(scenario, config).unwrap_or_else(|e| fail(&e));
    let encounter = scenario.build(config).unwrap_or_else(|e| fail(&e));

    let run_config = RunConfig {
        max_turns: turns,
        emit_hashes: hashes,
    };
    let mut runner = HeadlessRunner::with_config(scenario.name.clone(), encounter, run_config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = runner.run(&mut out) {
        eprintln!("Failed to write output: {e}");
        std::process::exit(1);
    }
}

/// Replay one scenario several times and compare final hashes.
fn cmd_verify(scenario: &Path, config: Option<&Path>, turns: u64, runs: u32) {
    tracing::info!(
        "Verifying determinism: {} ({} runs, {} turns)",
        scenario.display(),
        runs,
        turns
    );

    let (scenario, config) = load(scenario, config).unwrap_or_else(|e| fail(&e));
    let template = scenario.build(config).unwrap_or_else(|e| fail(&e));

    let hashes = replay_hashes(|| template.clone(), runs, turns);
    let deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    if deterministic {
        eprintln!("PASS: All {runs} runs produced identical results");
        if let Some(hash) = hashes.first() {
            eprintln!("  Final hash: {hash:016x}");
        }
    } else {
        eprintln!("FAIL: Non-determinism detected!");
        for (run, hash) in hashes.iter().enumerate() {
            eprintln!("  Run {run}: {hash:016x}");
        }
        std::process::exit(1);
    }
}
