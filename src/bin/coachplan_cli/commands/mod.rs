// ABOUTME: Subcommand implementations for coachplan-cli
// ABOUTME: Each command prints one JSON document to stdout
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

pub mod convert;
pub mod matching;
pub mod week;

use anyhow::Result;
use serde::Serialize;

/// Print `value` as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
