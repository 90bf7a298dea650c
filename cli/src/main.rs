//! lull CLI - run randomized-delay waiters from the terminal.
//!
//! ```text
//! main() -> init_tracing() -> LullConfig::load() -> resolve(Overrides) -> Collector
//!                                                                           |
//!                                                                           v
//!                                                              one delay per line on stdout
//! ```
//!
//! Logs go to stderr (filtered by `RUST_LOG`, default `warn`) so stdout only
//! carries results.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::time::Instant;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use lull_config::{LullConfig, Overrides};
use lull_core::{Collector, Waiter};
use lull_types::{CollectStrategy, Delay, to_str};

#[derive(Debug, Parser)]
#[command(name = "lull", version, about = "Sleep for random delays and report them in order")]
struct Cli {
    /// Config file to use instead of ~/.lull/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Wait one random delay and print it.
    Wait(WaiterArgs),
    /// Wait several random delays and print them in ascending order.
    Collect(CollectArgs),
}

#[derive(Debug, Clone, Args)]
struct WaiterArgs {
    /// Exclusive upper bound for the delay, in time units.
    #[arg(long, allow_negative_numbers = true)]
    max_delay: Option<f64>,

    /// Wall-clock milliseconds per time unit.
    #[arg(long, value_name = "MS")]
    time_unit_ms: Option<u64>,
}

#[derive(Debug, Clone, Args)]
struct CollectArgs {
    /// How many delays to collect.
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    count: Option<i64>,

    /// `concurrent` (overlapping waits) or `sequential` (one after another).
    #[arg(long)]
    strategy: Option<CollectStrategy>,

    /// Give up if collection takes longer than this.
    #[arg(long, value_name = "MS")]
    deadline_ms: Option<u64>,

    #[command(flatten)]
    waiter: WaiterArgs,
}

impl Command {
    fn overrides(&self) -> Overrides {
        match self {
            Command::Wait(waiter) => Overrides {
                max_delay: waiter.max_delay,
                time_unit_ms: waiter.time_unit_ms,
                ..Overrides::default()
            },
            Command::Collect(args) => Overrides {
                max_delay: args.waiter.max_delay,
                count: args.count,
                strategy: args.strategy,
                time_unit_ms: args.waiter.time_unit_ms,
                deadline_ms: args.deadline_ms,
            },
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn load_config(explicit: Option<&PathBuf>) -> Result<LullConfig> {
    let loaded = match explicit {
        Some(path) => LullConfig::load_from(path),
        None => LullConfig::load(),
    };
    let config = loaded.context("Failed to load configuration")?;
    if config.is_none() {
        tracing::debug!("Using built-in defaults");
    }
    Ok(config.unwrap_or_default())
}

fn print_delays(delays: &[Delay]) -> Result<()> {
    let mut out = io::stdout().lock();
    for delay in delays {
        writeln!(out, "{}", to_str(delay.as_f64()))?;
    }
    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let settings = config
        .resolve(&cli.command.overrides())
        .context("Invalid delay parameters")?;

    let started = Instant::now();
    let delays = match cli.command {
        Command::Wait(_) => {
            let waiter = Waiter::new(settings.bound()).with_time_unit(settings.time_unit());
            vec![waiter.wait().await]
        }
        Command::Collect(_) => Collector::from_settings(&settings)
            .collect(settings.count().get())
            .await
            .context("Failed to collect delays")?,
    };
    tracing::info!(
        count = delays.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "Done"
    );

    print_delays(&delays)
}
