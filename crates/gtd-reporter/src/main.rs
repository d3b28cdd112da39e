//! tape-generic-test-data-reporter: convert TAP on stdin to Generic Test Data XML
//!
//! Reads the TAP stream written by `tape` (or any compatible runner) until
//! end of input and prints the report, or writes it to `--file`.

use std::process::ExitCode;

use clap::Parser;
use gtd_reporter::Config;
use gtd_reporter::pipeline::run;
use tracing::debug;

fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr; stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    debug!(?config, "Starting reporter");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    run(&config, stdin.lock(), &mut stdout).into()
}
