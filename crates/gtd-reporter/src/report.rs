// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Generic Test Data report building
//!
//! Turns a [`ParseResult`] into the XML document consumed by tools that read
//! the Generic Test Data execution format:
//!
//! ```text
//! <testExecutions version="1"><file path="noname">
//! <testCase name="test 1" duration="0" />
//! <testCase name="test 2: name" duration="0">
//! <failure message="operator: ...">operator: ...
//! stack</failure>
//! </testCase>
//! </file></testExecutions>
//! ```
//!
//! Only `"` is escaped, as `\x22`, and only inside attribute values. Other
//! markup characters pass through untouched; consumers of this format rely
//! on that exact output.

use gtd_tap::{FailureRecord, ParseResult};
use thiserror::Error;
use tracing::debug;

/// Opening tags of every report
pub const REPORT_START: &str = r#"<testExecutions version="1"><file path="noname">"#;

/// Closing tags of every report
pub const REPORT_END: &str = "</file></testExecutions>";

/// Element name used for failed test cases
const FAILURE_TAG: &str = "failure";

/// Errors raised while building a report
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// A failure refers to a test index outside the parsed test count
    #[error("Failure id {id} is out of range for {count} tests")]
    FailureOutOfRange {
        /// 0-based id carried by the failure
        id: usize,
        /// Number of tests in the parse result
        count: usize,
    },
}

/// Replace every double quote with the `\x22` escape sequence
#[must_use]
pub fn escape_quotes(value: &str) -> String {
    value.replace('"', r"\x22")
}

/// Fragment for a passing test
///
/// `number` is 1-based.
#[must_use]
pub fn success_fragment(number: usize) -> String {
    format!(r#"<testCase name="test {number}" duration="0" />"#)
}

/// Four-line operator/expected/actual/at summary of a failure
#[must_use]
pub fn short_message(failure: &FailureRecord) -> String {
    let diag = &failure.diagnostics;
    format!(
        "operator: {}\nexpected: {}\nactual: {}\nat: {}\n",
        diag.operator, diag.expected, diag.actual, diag.at
    )
    .replace('\t', "")
}

/// Fragment for a failed test
///
/// The test number is derived from the record's 0-based id.
#[must_use]
pub fn failure_fragment(failure: &FailureRecord) -> String {
    let short = short_message(failure);
    let message = format!("{short}\n{}", failure.diagnostics.stack);

    format!(
        "<testCase name=\"test {number}: {name}\" duration=\"0\">\n\
         <{FAILURE_TAG} message=\"{short_attr}\">{message}</{FAILURE_TAG}>\n\
         </testCase>",
        number = failure.id + 1,
        name = escape_quotes(&failure.name),
        short_attr = escape_quotes(&short),
    )
    .replace('\t', "")
}

/// Build the full report document
///
/// Every test index in `0..count` produces exactly one fragment. Failures
/// are applied in order, so a later record with the same id replaces an
/// earlier one.
///
/// # Errors
///
/// Returns `ReportError::FailureOutOfRange` if a failure id is not below
/// `result.count`.
pub fn build_report(result: &ParseResult) -> Result<String, ReportError> {
    let mut fragments: Vec<String> = (1..=result.count).map(success_fragment).collect();

    for failure in &result.failures {
        let slot = fragments
            .get_mut(failure.id)
            .ok_or(ReportError::FailureOutOfRange {
                id: failure.id,
                count: result.count,
            })?;
        *slot = failure_fragment(failure);
    }

    debug!(
        tests = result.count,
        failures = result.failures.len(),
        "Built report"
    );

    Ok(format!("{REPORT_START}{}{REPORT_END}", fragments.concat()))
}
