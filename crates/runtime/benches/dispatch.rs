// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for end-to-end call overhead through the runtime.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use runtime::{Runtime, RuntimeConfig};
use tensor_core::canonical::vector_to_text;
use tensor_core::Input;

fn ramp_text(len: usize) -> String {
    let values: Vec<f64> = (0..len).map(|i| (i % 89) as f64 * 0.011 - 0.4).collect();
    vector_to_text(&values)
}

fn bench_small_calls(c: &mut Criterion) {
    let rt = Runtime::new(RuntimeConfig::deterministic(7));
    let args: Vec<Input> = vec!["[1, -2, 3, -4]".into()];
    c.bench_function("call_relu_4", |b| {
        b.iter(|| rt.call(black_box("relu"), black_box(&args)))
    });

    let pair: Vec<Input> = vec!["[1, 2, 3]".into(), "[4, 5, 6]".into()];
    c.bench_function("call_dot_3", |b| {
        b.iter(|| rt.call(black_box("dot"), black_box(&pair)))
    });

    let bad: Vec<Input> = vec!["[1, 2]".into(), "[1]".into()];
    c.bench_function("call_sentinel_fallback", |b| {
        b.iter(|| rt.call(black_box("cosine"), black_box(&bad)))
    });
}

fn bench_vec_mat_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("call_vec_mat");
    let rt = Runtime::new(RuntimeConfig::default());
    let n = 128;
    for m in [16usize, 256, 2048] {
        let args: Vec<Input> = vec![ramp_text(n).into(), ramp_text(n * m).into()];
        group.bench_with_input(BenchmarkId::from_parameter(m), &m, |b, _| {
            b.iter(|| rt.call("vec_mat", black_box(&args)))
        });
    }
    group.finish();
}

fn bench_update_weights(c: &mut Criterion) {
    let rt = Runtime::new(RuntimeConfig::deterministic(7));
    let weights = ramp_text(1024);
    let grads = ramp_text(1024);
    let args: Vec<Input> = vec![
        weights.into(),
        grads.into(),
        "Adam".into(),
        "0.001".into(),
        "".into(),
    ];
    c.bench_function("call_adam_1024", |b| {
        b.iter(|| rt.call("update_weights", black_box(&args)))
    });
}

criterion_group!(
    benches,
    bench_small_calls,
    bench_vec_mat_text,
    bench_update_weights
);
criterion_main!(benches);
