//! ferry_audit: check an event log written by `ferry`.
//!
//! ```text
//! ferry_audit [LOG] [N O K]
//! ```
//!
//! Without `N O K` only the protocol itself is checked; vehicle counts and
//! capacity are skipped.  Exits 1 on the first violation.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;

use ferry_output::{Expect, check};

#[derive(Parser, Debug)]
#[command(name = "ferry_audit", version, about = "Check a ferry event log for protocol violations")]
struct Args {
    /// Log file to check
    #[arg(default_value = "ferry.out")]
    log: PathBuf,

    /// Expected heavy vehicles
    #[arg(value_name = "N")]
    heavy: Option<u32>,

    /// Expected standard vehicles
    #[arg(value_name = "O")]
    standard: Option<u32>,

    /// Ferry capacity in units
    #[arg(value_name = "K")]
    capacity: Option<u32>,
}

fn main() -> ExitCode {
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

    match audit(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("ferry_audit: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// `Ok(false)` means the log was read but is invalid.
fn audit(args: &Args) -> Result<bool> {
    let text = fs::read_to_string(&args.log)
        .with_context(|| format!("cannot read {}", args.log.display()))?;
    let expect = Expect {
        heavy:    args.heavy,
        standard: args.standard,
        capacity: args.capacity,
    };

    match check(text.lines(), expect) {
        Ok(report) => {
            println!(
                "{}: {} lines, {} trips, peak {} units, {} heavy, {} standard",
                args.log.display(),
                report.lines,
                report.trips,
                report.peak_units,
                report.heavy,
                report.standard,
            );
            if report.underused {
                println!("warning: the ferry never ran full although the vehicles could have filled it");
            }
            println!("no errors found");
            Ok(true)
        }
        Err(violation) => {
            eprintln!("{}: {violation}", args.log.display());
            Ok(false)
        }
    }
}
