//! Configuration for the reporter
//!
//! Command-line options decide where the report goes and how chatty the
//! diagnostics on stderr are. The parsed [`Config`] is passed explicitly to
//! the sink; nothing is kept in global state.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::sink::Destination;

/// Tape test result reporter in Generic Test Data format.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tape-generic-test-data-reporter")]
#[command(version, about, long_about = None)]
#[command(after_help = "Usage:\n  tape test.js | tape-generic-test-data-reporter [OPTIONS]")]
pub struct Config {
    /// If present, writes report to given path, otherwise prints to stdout
    ///
    /// Missing parent directories are created.
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with a report on stdout.
    #[arg(short, long, default_value = "false", conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Where the report should be delivered
    #[must_use]
    pub fn destination(&self) -> Destination {
        match &self.file {
            Some(path) => Destination::File(path.clone()),
            None => Destination::Stdout,
        }
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }

    /// Build the log filter from a `RUST_LOG` value
    ///
    /// Directives in `rust_log` take precedence; the flag-derived level
    /// only applies when it is unset or holds no valid directive.
    #[must_use]
    pub fn log_filter(&self, rust_log: Option<&str>) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(self.log_level().into())
            .parse_lossy(rust_log.unwrap_or_default())
    }
}
