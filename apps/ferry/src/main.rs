//! ferry: run the ferry simulation and write the numbered event log.
//!
//! ```text
//! ferry N O K TA TP [--log <path>] [--csv <path>] [--seed <u64>]
//! ```
//!
//! | Arg  | Meaning                                   | Range            |
//! |------|-------------------------------------------|------------------|
//! | `N`  | heavy vehicles (3 capacity units each)    | `0..10000`       |
//! | `O`  | standard vehicles (1 unit each)           | `0..10000`       |
//! | `K`  | ferry capacity in units                   | `3..=100`        |
//! | `TA` | max delay before a vehicle reaches a port | `0..=10000` µs   |
//! | `TP` | max duration of one crossing              | `0..=1000` µs    |
//!
//! Any bad argument exits 1 before the log file is created.  Diagnostics go
//! to stderr and are filtered by `RUST_LOG` (default `warn`).

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ferry_core::FerryConfig;
use ferry_output::{CsvWriter, EventLog, TextWriter};
use ferry_sim::SimBuilder;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "ferry", version, about = "Simulate a ferry shuttling vehicles between two ports")]
struct Args {
    /// Number of heavy vehicles
    #[arg(value_name = "N")]
    heavy: u32,

    /// Number of standard vehicles
    #[arg(value_name = "O")]
    standard: u32,

    /// Ferry capacity in units
    #[arg(value_name = "K")]
    capacity: u32,

    /// Max vehicle arrival delay in microseconds
    #[arg(value_name = "TA")]
    max_arrival_us: u32,

    /// Max crossing time in microseconds
    #[arg(value_name = "TP")]
    max_travel_us: u32,

    /// Event log path
    #[arg(long, default_value = "ferry.out")]
    log: PathBuf,

    /// Also write a CSV trace of every event
    #[arg(long)]
    csv: Option<PathBuf>,

    /// RNG seed; derived from the clock when omitted
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> FerryConfig {
        FerryConfig {
            heavy:          self.heavy,
            standard:       self.standard,
            capacity:       self.capacity,
            max_arrival_us: self.max_arrival_us,
            max_travel_us:  self.max_travel_us,
            seed:           self.seed.unwrap_or_else(clock_seed),
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    init_tracing();

    // clap exits 2 on usage errors; every setup failure here is exit 1.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ferry: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = args.config();
    config.validate().context("invalid arguments")?;

    let text = TextWriter::create(&args.log)
        .with_context(|| format!("cannot create {}", args.log.display()))?;
    let mut log = EventLog::new().with_writer(text);
    if let Some(path) = &args.csv {
        let csv = CsvWriter::new(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        log = log.with_writer(csv);
    }
    let log = Arc::new(log);

    let summary = SimBuilder::new(config, Arc::clone(&log))
        .build()?
        .run()
        .context("simulation failed")?;

    log.finish().context("closing the event log")?;
    if let Some(e) = log.take_error() {
        return Err(e).context("writing the event log");
    }

    info!(
        lines = log.lines_written(),
        trips = summary.trips,
        carried = summary.vehicles_carried,
        peak_units = summary.peak_units,
        "done"
    );
    Ok(())
}
