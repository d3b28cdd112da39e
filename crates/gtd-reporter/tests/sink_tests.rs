// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Tests for file delivery
//!
//! These tests verify directory creation, truncation of existing reports,
//! and that every failing delivery step maps to its own error and a failing
//! exit status.


use gtd_reporter::sink::write_report_file;
use gtd_reporter::{Config, Destination, ExitStatus, SinkError, deliver, run};
use similar_asserts::assert_eq;
use test_utils::TempTestDir;

#[test]
fn test_file_output_creates_missing_directories() {
    let temp = TempTestDir::new("creates-dirs");
    let path = temp.path().join("out/sub/report.xml");
    let config = Config {
        file: Some(path.clone()),
        ..Default::default()
    };

    let mut stdout = Vec::new();
    let status = run(&config, "ok 1\nok 2\n".as_bytes(), &mut stdout);

    assert_eq!(status, ExitStatus::Success);
    assert!(stdout.is_empty(), "nothing is printed when writing to a file");
    assert!(temp.path().join("out/sub").is_dir());

    let written = temp.read_file("out/sub/report.xml");
    assert!(written.starts_with("<testExecutions"));
    assert!(written.ends_with("</file></testExecutions>"), "no trailing newline");
}

#[test]
fn test_file_output_exit_status_reflects_tests() {
    let temp = TempTestDir::new("failing-tests");
    let config = Config {
        file: Some(temp.path().join("report.xml")),
        ..Default::default()
    };

    let status = run(&config, "ok 1\nnot ok 2 broke\n".as_bytes(), &mut Vec::new());

    assert_eq!(status, ExitStatus::Failure);
    assert!(temp.read_file("report.xml").contains("test 2: broke"));
}

#[test]
fn test_existing_report_is_replaced() {
    let temp = TempTestDir::new("replaces");
    let path = temp.create_file("report.xml", &"stale content ".repeat(100));

    write_report_file("<fresh/>", &path).expect("write");

    assert_eq!(temp.read_file("report.xml"), "<fresh/>");
}

#[test]
fn test_relative_path_without_directory() {
    let temp = TempTestDir::new("relative");
    let path = temp.path().join("report.xml");

    deliver("<r/>", &Destination::File(path), &mut Vec::new()).expect("deliver");

    assert_eq!(temp.read_file("report.xml"), "<r/>");
}

#[test]
fn test_directory_creation_failure() {
    let temp = TempTestDir::new("mkdir-fails");
    let blocker = temp.create_file("blocker", "regular file");

    let err = write_report_file("<r/>", &blocker.join("sub/report.xml"))
        .expect_err("a file cannot contain directories");

    assert!(matches!(err, SinkError::CreateDirectory { .. }));
    assert!(err.to_string().starts_with("Cannot create given directories"));
}

#[test]
fn test_write_access_failure() {
    let temp = TempTestDir::new("no-access");
    let dir_in_the_way = temp.path().join("report.xml");
    std::fs::create_dir_all(&dir_in_the_way).expect("create dir");

    let err = write_report_file("<r/>", &dir_in_the_way).expect_err("a directory is not writable");

    assert!(matches!(err, SinkError::WriteAccess { .. }));
    assert!(err.to_string().starts_with("No writing access to given file"));
}

#[test]
fn test_io_failure_with_passing_tests_exits_with_failure() {
    let temp = TempTestDir::new("io-failure");
    let blocker = temp.create_file("blocker", "regular file");
    let config = Config {
        file: Some(blocker.join("report.xml")),
        ..Default::default()
    };

    let mut stdout = Vec::new();
    let status = run(&config, "ok 1\n".as_bytes(), &mut stdout);

    assert_eq!(status, ExitStatus::Failure);
    assert_eq!(status.code(), 1);
    assert!(stdout.is_empty(), "a failed file write does not fall back to stdout");
}
