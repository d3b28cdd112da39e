// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the streaming TAP parser
//!
//! This fuzzes `TapParser`, which processes TAP output line by line.

#![no_main]

use libfuzzer_sys::fuzz_target;

use gtd_tap::TapParser;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let mut parser = TapParser::new();

    // Process each line - parser should never panic
    for line in input.lines() {
        let _ = parser.process_line(line);
    }

    // Each failure is also a counted test point
    let result = parser.finish();
    assert!(result.failures.len() <= result.count);
});
