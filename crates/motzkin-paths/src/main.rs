//! CLI entry point for Motzkin path counting and enumeration.
//!
//! Usage:
//!   motzkin count <LENGTH> <MIN_WIDTH>
//!   motzkin enumerate <LENGTH> <MIN_WIDTH> [--limit <n>] [--json]
//!   motzkin check <PATH> <MIN_WIDTH>
//!   motzkin selftest [options]
//!
//! Selftest options:
//!   --length <n>       Path length (default: 8)
//!   --min-width <n>    Minimum pair width (default: 3)
//!   --present <path>   Path that must be produced (repeatable)
//!   --absent <path>    Path that must not be produced (repeatable)
//!
//! Set RUST_LOG=debug to see cache activity on stderr.

use std::io::{self, BufWriter, ErrorKind, Write};
use std::process;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use motzkin_paths::error::non_negative;
use motzkin_paths::{
    count, enumerate, run_self_test, validate_path, MotzkinError, PathViolation, SelfTestConfig,
};

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Motzkin(#[from] MotzkinError),
    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser)]
#[command(name = "motzkin")]
#[command(about = "Count and enumerate Motzkin paths with a minimum pair width")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count paths of a length and minimum width
    Count {
        #[arg(allow_hyphen_values = true)]
        length: i64,
        #[arg(allow_hyphen_values = true)]
        min_width: i64,
    },

    /// Print every path of a length and minimum width
    Enumerate {
        #[arg(allow_hyphen_values = true)]
        length: i64,
        #[arg(allow_hyphen_values = true)]
        min_width: i64,

        /// Stop after this many paths
        #[arg(long)]
        limit: Option<usize>,

        /// Print a single JSON object instead of one path per line
        #[arg(long)]
        json: bool,
    },

    /// Check whether a string is a valid path
    Check {
        path: String,
        #[arg(allow_hyphen_values = true)]
        min_width: i64,
    },

    /// Enumerate and count, and verify the results agree
    Selftest {
        /// Path length
        #[arg(long, default_value = "8", allow_hyphen_values = true)]
        length: i64,

        /// Minimum pair width
        #[arg(long, default_value = "3", allow_hyphen_values = true)]
        min_width: i64,

        /// Path that must be produced
        #[arg(long = "present", value_name = "PATH")]
        present: Vec<String>,

        /// Path that must not be produced
        #[arg(long = "absent", value_name = "PATH")]
        absent: Vec<String>,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountOutput {
    length: i64,
    min_width: i64,
    count: u128,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnumerateOutput {
    length: i64,
    min_width: i64,
    paths: Vec<String>,
    truncated: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckOutput {
    path: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    violation: Option<PathViolation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorOutput {
    error: String,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let code = match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            print_json(&ErrorOutput {
                error: e.to_string(),
            });
            2
        }
    };
    process::exit(code);
}

fn run(command: Commands) -> Result<i32, CliError> {
    match command {
        Commands::Count { length, min_width } => {
            let total = count(length, min_width)?;
            print_json(&CountOutput {
                length,
                min_width,
                count: total,
            });
            Ok(0)
        }

        Commands::Enumerate {
            length,
            min_width,
            limit,
            json,
        } => {
            let mut paths = enumerate(length, min_width)?;
            let limit = limit.unwrap_or(usize::MAX);

            if json {
                let taken: Vec<String> = paths.by_ref().take(limit).collect();
                let truncated = paths.next().is_some();
                print_json(&EnumerateOutput {
                    length,
                    min_width,
                    paths: taken,
                    truncated,
                });
            } else {
                let stdout = io::stdout();
                write_paths(BufWriter::new(stdout.lock()), paths.take(limit))?;
            }
            Ok(0)
        }

        Commands::Check { path, min_width } => {
            let min_width = non_negative("min_width", min_width)?;
            let violation = validate_path(&path, min_width).err();
            let valid = violation.is_none();
            let reason = violation.as_ref().map(|v| v.to_string());
            print_json(&CheckOutput {
                path,
                valid,
                violation,
                reason,
            });
            Ok(if valid { 0 } else { 1 })
        }

        Commands::Selftest {
            length,
            min_width,
            present,
            absent,
        } => {
            // The built-in expectations only apply to the default query.
            let defaults = SelfTestConfig::default();
            let default_query = length == defaults.length && min_width == defaults.min_width;
            let config = SelfTestConfig {
                length,
                min_width,
                expect_present: if present.is_empty() && default_query {
                    defaults.expect_present
                } else {
                    present
                },
                expect_absent: if absent.is_empty() && default_query {
                    defaults.expect_absent
                } else {
                    absent
                },
            };

            let report = run_self_test(&config)?;
            print_json(&report);
            Ok(if report.passed { 0 } else { 1 })
        }
    }
}

/// Write one path per line. A closed reader (e.g. piped into `head`) ends
/// output early without an error.
fn write_paths<W: Write>(mut out: W, paths: impl Iterator<Item = String>) -> io::Result<()> {
    let written = paths
        .map(|path| writeln!(out, "{}", path))
        .collect::<io::Result<()>>()
        .and_then(|()| out.flush());
    match written {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error serializing output: {}", e),
    }
}
