// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gtd-tap

use thiserror::Error;

/// Errors that can occur while ingesting a TAP stream
#[derive(Debug, Error)]
pub enum TapError {
    /// Error reading the TAP input stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML diagnostics block could not be parsed
    #[error("Invalid diagnostics block: {0}")]
    Diagnostics(#[from] serde_yaml::Error),
}
