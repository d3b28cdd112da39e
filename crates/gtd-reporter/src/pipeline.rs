// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! End-to-end reporter run: read TAP, build the report, deliver it
//!
//! Each step runs once, in order, and a failing step ends the run. Test
//! failures are not errors here; they only decide the exit status.

use std::io::{BufRead, Write};

use anyhow::Context;
use gtd_tap::{ParseResult, parse_reader};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::report::build_report;
use crate::sink::{ExitStatus, deliver};

/// Run the reporter over `input`, writing stdout reports to `stdout`
///
/// Errors are logged rather than returned; the returned status is what the
/// process should exit with.
pub fn run<R: BufRead, W: Write>(config: &Config, input: R, stdout: &mut W) -> ExitStatus {
    let result = match parse_reader(input).context("Failed to read TAP input") {
        Ok(result) => result,
        Err(e) => {
            error!("{e:#}");
            return ExitStatus::Failure;
        }
    };
    log_summary(&result);

    let report = match build_report(&result).context("Failed to build report") {
        Ok(report) => report,
        Err(e) => {
            error!("{e:#}");
            return ExitStatus::Failure;
        }
    };

    let delivered = match deliver(&report, &config.destination(), stdout) {
        Ok(()) => true,
        Err(e) => {
            error!("{e}");
            false
        }
    };

    ExitStatus::from_run(result.has_failures(), delivered)
}

fn log_summary(result: &ParseResult) {
    info!(
        tests = result.count,
        pass = result.pass,
        fail = result.failures.len(),
        skip = result.skip,
        todo = result.todo,
        "Parsed TAP input"
    );
    if let Some(reason) = &result.bailout {
        warn!(reason = %reason, "Test run bailed out");
    }
    if let Some(plan) = &result.plan
        && plan.end != result.count
    {
        warn!(planned = plan.end, seen = result.count, "Test count does not match plan");
    }
}
