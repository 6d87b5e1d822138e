//! Command-line interface for the timetracker demo
//!
//! Runs a timed workload through a `TimeTracker` so the log output and the
//! recorded durations can be inspected from a shell.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use timetracker_core::{SinkKind, TimeTracker, TrackerConfig};
use tracing::info;

/// Timetracker demo CLI
#[derive(Parser, Debug)]
#[command(name = "timetracker")]
#[command(about = "Measure tagged operations with the timetracker registry")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// YAML configuration file (defaults to TIMETRACKER_* environment variables)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Demo commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Time a sleep under a tag and report the recorded duration
    Run {
        /// Tag to record the duration under
        #[arg(short, long, default_value = "sleep")]
        tag: String,

        /// Milliseconds to sleep inside the timed block
        #[arg(short, long, default_value_t = 50)]
        sleep_ms: u64,

        /// Number of times to run the timed block
        #[arg(short, long, default_value_t = 1)]
        repeat: u32,

        /// Start with tracking disabled
        #[arg(long)]
        disabled: bool,

        /// Drop all tracker log events
        #[arg(short, long)]
        quiet: bool,

        /// Print recorded durations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config,
}

impl Cli {
    /// Resolve configuration from the file flag or the environment
    pub fn load_config(&self) -> anyhow::Result<TrackerConfig> {
        match &self.config {
            Some(path) => TrackerConfig::from_yaml_file(path)
                .with_context(|| format!("failed to load config from {}", path.display())),
            None => TrackerConfig::from_environment().context("invalid TIMETRACKER_* environment"),
        }
    }

    /// Execute the selected command
    pub fn execute(&self) -> anyhow::Result<()> {
        let mut config = self.load_config()?;

        match &self.command {
            Command::Run { tag, sleep_ms, repeat, disabled, quiet, json } => {
                if *disabled {
                    config.enabled = false;
                }
                if *quiet {
                    config.log_sink = SinkKind::None;
                }
                run_workload(&config, tag, *sleep_ms, *repeat, *json).map(|_| ())
            }
            Command::Config => {
                println!("enabled:  {}", config.enabled);
                println!("log_sink: {:?}", config.log_sink);
                Ok(())
            }
        }
    }
}

fn run_workload(
    config: &TrackerConfig,
    tag: &str,
    sleep_ms: u64,
    repeat: u32,
    json: bool,
) -> anyhow::Result<TimeTracker> {
    let tracker = TimeTracker::from_config(config);
    info!(tag, sleep_ms, repeat, enabled = tracker.is_enabled(), "Running timed workload");

    for iteration in 0..repeat {
        tracker.measure(tag, || thread::sleep(Duration::from_millis(sleep_ms)));
        info!(iteration, duration_ms = ?tracker.duration(tag), "Iteration finished");
    }

    tracker.print_all_durations();

    if json {
        println!("{}", tracker.export_json()?);
    } else {
        match tracker.duration(tag) {
            Some(duration) => println!("{tag}: {duration} ms"),
            None => println!("{tag}: no duration recorded"),
        }
    }

    Ok(tracker)
}
