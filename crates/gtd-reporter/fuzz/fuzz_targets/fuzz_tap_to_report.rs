// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for TAP input through report building
//!
//! Arbitrary TAP is parsed and turned into a report. Building may reject
//! out-of-range failure ids but must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

use gtd_reporter::report::build_report;
use gtd_tap::parse_str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let result = parse_str(input);
        if let Ok(report) = build_report(&result) {
            assert!(report.starts_with("<testExecutions version=\"1\">"));
        }
    }
});
