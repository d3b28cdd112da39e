// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report delivery and exit status
//!
//! A report either goes to stdout or to a file. File delivery runs as a
//! fixed sequence (create directories, verify write access, write) and stops
//! at the first failing step.

use std::fs::{self, DirBuilder, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use thiserror::Error;
use tracing::{debug, info};

/// Where a report is delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Print to standard output
    Stdout,
    /// Persist to the given path
    File(PathBuf),
}

/// Errors that can occur while delivering a report
#[derive(Debug, Error)]
pub enum SinkError {
    /// The parent directory chain could not be created
    #[error("Cannot create given directories {}: {source}", path.display())]
    CreateDirectory {
        /// Directory that was being created
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// The report file cannot be opened for writing
    #[error("No writing access to given file {}: {source}", path.display())]
    WriteAccess {
        /// Report file path
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// Writing the report content failed
    #[error("Error while writing report to {}: {source}", path.display())]
    Write {
        /// Report file path
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// Printing the report to stdout failed
    #[error("Error while printing report: {0}")]
    Stdout(#[source] io::Error),
}

/// Deliver a report to its destination
///
/// `stdout` receives the report (plus a trailing newline) when the
/// destination is [`Destination::Stdout`]; it is untouched otherwise.
///
/// # Errors
///
/// Returns the `SinkError` of the first delivery step that failed.
pub fn deliver<W: Write>(
    report: &str,
    destination: &Destination,
    stdout: &mut W,
) -> Result<(), SinkError> {
    match destination {
        Destination::Stdout => {
            writeln!(stdout, "{report}")
                .and_then(|()| stdout.flush())
                .map_err(SinkError::Stdout)
        }
        Destination::File(path) => write_report_file(report, path),
    }
}

/// Persist a report to `path`, replacing any previous content
///
/// # Errors
///
/// - `SinkError::CreateDirectory` if the parent directories cannot be created
/// - `SinkError::WriteAccess` if the file cannot be opened for writing
/// - `SinkError::Write` if writing the content fails
pub fn write_report_file(report: &str, path: &Path) -> Result<(), SinkError> {
    if let Some(dir) = report_dir(path) {
        create_report_dir(dir)?;
    }
    check_write_access(path)?;

    fs::write(path, report).map_err(|source| SinkError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), bytes = report.len(), "Report written");
    Ok(())
}

/// Parent directory of the report, if the path has one
fn report_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|dir| !dir.as_os_str().is_empty())
}

fn create_report_dir(dir: &Path) -> Result<(), SinkError> {
    debug!(dir = %dir.display(), "Creating report directory");

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }

    builder
        .create(dir)
        .map_err(|source| SinkError::CreateDirectory {
            path: dir.to_path_buf(),
            source,
        })
}

/// Create (or truncate) the file, then confirm it is writable
fn check_write_access(path: &Path) -> Result<(), SinkError> {
    let access_error = |source: io::Error| SinkError::WriteAccess {
        path: path.to_path_buf(),
        source,
    };

    drop(File::create(path).map_err(access_error)?);

    let metadata = fs::metadata(path).map_err(access_error)?;
    if metadata.permissions().readonly() {
        return Err(access_error(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "file is read-only",
        )));
    }
    Ok(())
}

// ============================================================================
// Exit Status
// ============================================================================

/// Process outcome reported through the exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// All tests passed and the report was delivered
    Success,
    /// A test failed, or the report could not be produced or delivered
    Failure,
}

impl ExitStatus {
    /// Combine the test outcome with the delivery outcome
    #[must_use]
    pub fn from_run(has_failures: bool, delivered: bool) -> Self {
        if has_failures || !delivered {
            Self::Failure
        } else {
            Self::Success
        }
    }

    /// Numeric process exit code
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
