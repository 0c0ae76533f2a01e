//! Benchmarks for Lyndon word generation and the basis transform.

#![allow(missing_docs, clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lyndon_basis::{AnagramClasses, LyndonInfo, LyndonMode, LyndonSpec, LyndonWords};

const SPECS: [(usize, usize); 4] = [(2, 8), (3, 6), (4, 5), (8, 4)];

fn spec(k: usize, n: usize) -> LyndonSpec {
    LyndonSpec::new(k, n).unwrap()
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (k, n) in SPECS {
        let s = spec(k, n);
        group.throughput(Throughput::Elements(s.logsignature_channels().unwrap() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{k}x{n}")), &s, |b, s| {
            b.iter(|| black_box(LyndonWords::generate(black_box(*s)).unwrap()));
        });
    }
    group.finish();
}

fn bench_brackets(c: &mut Criterion) {
    let mut group = c.benchmark_group("attach_brackets");
    for (k, n) in SPECS {
        let words = LyndonWords::generate(spec(k, n)).unwrap();
        group.throughput(Throughput::Elements(words.amount() as u64));
        group.bench_function(format!("{k}x{n}"), |b| {
            b.iter_batched(
                || words.clone(),
                |mut w| {
                    w.attach_brackets().unwrap();
                    black_box(w)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for (k, n) in SPECS {
        let words = LyndonWords::generate(spec(k, n)).unwrap();
        group.bench_function(format!("{k}x{n}"), |b| {
            b.iter(|| black_box(AnagramClasses::classify(black_box(&words))));
        });
    }
    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_lyndon_basis");
    group.sample_size(20);
    for (k, n) in [(2, 6), (3, 5), (4, 4)] {
        let words = LyndonWords::with_brackets(spec(k, n)).unwrap();
        group.bench_function(format!("{k}x{n}"), |b| {
            b.iter_batched(
                || words.clone(),
                |mut w| black_box(w.to_lyndon_basis().unwrap()),
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_cached(c: &mut Criterion) {
    let s = spec(3, 5);
    LyndonInfo::get(s, LyndonMode::Brackets).unwrap();
    c.bench_function("cached_lookup", |b| {
        b.iter(|| black_box(LyndonInfo::get(black_box(s), LyndonMode::Brackets).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_brackets,
    bench_classify,
    bench_transform,
    bench_cached,
);
criterion_main!(benches);
