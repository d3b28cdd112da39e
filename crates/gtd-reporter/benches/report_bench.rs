// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gtd_reporter::report::build_report;
use gtd_tap::{Diagnostics, FailureRecord, ParseResult};

/// Create a parse result where every tenth test failed
fn sample_result(count: usize) -> ParseResult {
    let failures = (0..count)
        .step_by(10)
        .map(|id| {
            FailureRecord::new(
                id,
                format!("case {id} says \"hello\""),
                Diagnostics::new(
                    "deepEqual",
                    "{ a: 1 }",
                    "{ a: \"1\" }",
                    format!("Test.<anonymous> (test/case.js:{id}:5)"),
                    "Error: should be deep equal\n    at Test.assert (tape/lib/test.js:1:1)",
                ),
            )
        })
        .collect();
    ParseResult::new(count, failures)
}

fn report_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");

    for count in [10, 1_000, 10_000] {
        let result = sample_result(count);
        group.bench_with_input(
            BenchmarkId::new("build_report", count),
            &result,
            |b, result| b.iter(|| build_report(std::hint::black_box(result)).expect("build")),
        );
    }

    group.finish();
}

criterion_group!(benches, report_benchmarks);
criterion_main!(benches);
