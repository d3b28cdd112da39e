// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gtd_tap::parse_str;

/// Build a tape-style stream with every tenth assertion failing
fn sample_tap(points: usize) -> String {
    let mut tap = String::from("TAP version 13\n# bench\n");
    for n in 1..=points {
        if n % 10 == 0 {
            tap.push_str(&format!(
                "not ok {n} should be equal\n  ---\n    operator: equal\n    expected: {n}\n    actual:   0\n    at: Test.<anonymous> (bench.js:{n}:5)\n    stack: |-\n      Error: should be equal\n          at Test.assert (tape/lib/test.js:1:1)\n  ...\n"
            ));
        } else {
            tap.push_str(&format!("ok {n} should be equal\n"));
        }
    }
    tap.push_str(&format!("\n1..{points}\n"));
    tap
}

fn parse_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for points in [10, 1_000, 10_000] {
        let tap = sample_tap(points);
        group.bench_with_input(BenchmarkId::new("parse_str", points), &tap, |b, tap| {
            b.iter(|| parse_str(std::hint::black_box(tap)))
        });
    }

    group.finish();
}

criterion_group!(benches, parse_benchmarks);
criterion_main!(benches);
