//! Benchmarks for recursive and fixed-size text splitting.

#![allow(
    clippy::min_ident_chars,
    missing_docs,
    reason = "Benchmarks use standard loop variables"
)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sift_context::chunking::{FixedSizeSplitter, RecursiveSplitter, SplitterConfig, TextSplitter as _};
use std::hint::black_box;
use std::time::Duration;

/// Prose with paragraph, line and sentence structure.
fn sample_text(paragraphs: usize) -> String {
    (0..paragraphs)
        .map(|i| {
            format!(
                "Paragraph {i} opens with a sentence. It continues with a second one.\n\
                 A new line adds detail about vectors, chunks and embeddings.\n\
                 The final line closes paragraph {i} with ümlauts and ñ."
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn bench_recursive_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("recursive_split");
    let Ok(config) = SplitterConfig::new(500, 50) else {
        return;
    };
    let splitter = RecursiveSplitter::new(config);

    for paragraphs in &[10, 100, 1000] {
        let text = sample_text(*paragraphs);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(paragraphs), &text, |b, text| {
            b.iter(|| splitter.split(black_box(text)));
        });
    }
    group.finish();
}

fn bench_fixed_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_split");
    let Ok(config) = SplitterConfig::new(500, 50) else {
        return;
    };
    let splitter = FixedSizeSplitter::new(config);

    for paragraphs in &[10, 100, 1000] {
        let text = sample_text(*paragraphs);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(paragraphs), &text, |b, text| {
            b.iter(|| splitter.split(black_box(text)));
        });
    }
    group.finish();
}

fn bench_unstructured_fallback(c: &mut Criterion) {
    let Ok(config) = SplitterConfig::new(100, 10) else {
        return;
    };
    let splitter = RecursiveSplitter::new(config);
    let text = "x".repeat(50_000);

    c.bench_function("recursive_split_character_fallback", |b| {
        b.iter(|| splitter.split(black_box(&text)));
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(2))
        .warm_up_time(Duration::from_millis(500))
        .sample_size(10);
    targets = bench_recursive_split,
             bench_fixed_split,
             bench_unstructured_fallback
}
criterion_main!(benches);
