// ABOUTME: coachplan-cli - command-line access to the planning resolution engine
// ABOUTME: Converts kitchen units, resolves plan weeks, and ranks recipes from a JSON document
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors
//!
//! Usage:
//! ```bash
//! # Convert 2 tablespoons to grams (lenient, prints warnings)
//! coachplan-cli convert 2 EL
//!
//! # Fail on unknown units instead of warning
//! coachplan-cli convert 1 glass --strict
//!
//! # Plan week for an enrollment starting 2025-03-03, as of today
//! coachplan-cli week --start 2025-03-03
//!
//! # Same, as of a given date and clamped to a 12-week plan
//! coachplan-cli week --start 2025-03-03 --on 2025-06-01 --max-weeks 12
//!
//! # Rank recipes against the slot targets in plan.json
//! coachplan-cli match --file plan.json --limit 3
//! ```

mod commands;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use coachplan::logging::LoggingConfig;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "coachplan-cli",
    about = "Coachplan planning engine CLI",
    long_about = "Command-line access to unit conversion, plan week resolution, and recipe matching."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Convert an amount in a kitchen unit to grams
    Convert {
        /// Amount in the given unit
        amount: f64,

        /// Unit code or alias (G, KG, ML, L, EL, TL, HAND, STK, ...)
        unit: String,

        /// Fail on unknown units instead of reporting a warning
        #[arg(long)]
        strict: bool,
    },

    /// Resolve the 1-based plan week for a start date
    Week {
        /// Enrollment start date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        on: Option<NaiveDate>,

        /// Clamp to the plan length in weeks
        #[arg(long)]
        max_weeks: Option<u32>,
    },

    /// Rank recipes against per-slot targets from a JSON document
    Match {
        /// Document with "entries" and "recipes" arrays
        #[arg(long)]
        file: PathBuf,

        /// Maximum matches per slot
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    LoggingConfig::for_cli(level).init()?;
    debug!("coachplan-cli starting");

    match cli.command {
        Command::Convert {
            amount,
            unit,
            strict,
        } => commands::convert::run(amount, &unit, strict),
        Command::Week {
            start,
            on,
            max_weeks,
        } => {
            commands::week::run(start, on, max_weeks);
            Ok(())
        }
        Command::Match { file, limit } => commands::matching::run(&file, limit),
    }
}
