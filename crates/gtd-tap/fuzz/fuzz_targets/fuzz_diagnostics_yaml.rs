// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for YAML diagnostics block parsing

#![no_main]

use libfuzzer_sys::fuzz_target;

use gtd_tap::Diagnostics;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Malformed YAML must surface as an error, never a panic
        let _ = Diagnostics::from_yaml(input);
    }
});
