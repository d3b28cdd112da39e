// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gtd-tap: TAP ingestion for tape-gtd
//!
//! This library crate reads Test Anything Protocol output (as written by
//! `tape` and compatible runners) and reduces it to a [`ParseResult`]: the
//! number of test points plus an ordered list of failures with their
//! assertion diagnostics.
//!
//! # Example
//!
//! ```no_run
//! use gtd_tap::{TapParser, parse_reader};
//!
//! // Parse everything on stdin
//! let result = parse_reader(std::io::stdin().lock()).unwrap();
//! println!("{} tests, {} failed", result.count, result.failures.len());
//!
//! // Or feed lines incrementally
//! let mut parser = TapParser::new();
//! parser.process_line("ok 1 - works");
//! let result = parser.finish();
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod parser;
pub mod result;

pub use error::TapError;
pub use parser::{Directive, TapParser, TestPoint, parse_reader, parse_str};
pub use result::{Diagnostics, FailureRecord, ParseResult, Plan};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::TapError;
    pub use crate::parser::{TapParser, parse_reader, parse_str};
    pub use crate::result::{Diagnostics, FailureRecord, ParseResult};
}
