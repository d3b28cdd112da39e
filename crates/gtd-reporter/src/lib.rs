//! gtd-reporter library
//!
//! This module exports the report builder, sink and configuration used by the
//! `tape-generic-test-data-reporter` binary, for use in integration tests and
//! as a library.

pub mod config;
pub mod pipeline;
pub mod report;
pub mod sink;

pub use config::Config;
pub use pipeline::run;
pub use report::{ReportError, build_report};
pub use sink::{Destination, ExitStatus, SinkError, deliver};
