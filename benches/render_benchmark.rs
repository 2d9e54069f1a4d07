//! Benchmarks for troffdown rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks render synthetic markdown documents.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a synthetic markdown document with the given number of sections.
fn create_test_markdown(sections: usize) -> String {
    let mut md = String::new();

    // Title block
    md.push_str("% title: Benchmark\n");
    md.push_str("% date: Feb 22, 2020\n");
    md.push_str("% authors:\n%   - name: Bench\n%     email: bench@example.com\n");
    md.push_str("% abstract: Synthetic content for render timing.\n\n");

    for i in 0..sections {
        md.push_str(&format!("## Section {}\n\n", i + 1));
        md.push_str("Some *emphasized* and **strong** text with `code`.\n\n");
        md.push_str("1. first\n   1. nested\n   2. nested\n2. second\n\n");
        md.push_str("| Name | Age | Country |\n|---|---|---|\n");
        for row in 0..5 {
            md.push_str(&format!("| Person {} | {} | Somewhere |\n", row, 20 + row));
        }
        md.push_str("\n```\nfn main() {}\n```\n\n");
    }

    md
}

/// Benchmark end to end conversion at various sizes.
fn bench_to_troff(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_troff");

    for sections in [1, 10, 100].iter() {
        let md = create_test_markdown(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| troffdown::to_troff(black_box(&md)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark rendering a pre-parsed tree.
fn bench_render_tree(c: &mut Criterion) {
    let md = create_test_markdown(10);
    let doc = troffdown::parse_markdown(&md, &troffdown::ParseOptions::default()).unwrap();
    let options = troffdown::RenderOptions::default();

    c.bench_function("render_tree_10_sections", |b| {
        b.iter(|| troffdown::render_tree(black_box(&doc), &options).unwrap());
    });
}

/// Benchmark table alignment alone.
fn bench_align(c: &mut Criterion) {
    let mut table = String::new();
    for i in 0..200 {
        table.push_str(&format!("cell {}\tvalue {}\t{}\t\n", i, i * 7, "x".repeat(i % 13)));
    }

    c.bench_function("align_200_rows", |b| {
        b.iter(|| troffdown::ms::align(black_box(table.as_bytes())).unwrap());
    });
}

/// Benchmark parallel batch rendering.
fn bench_render_batch(c: &mut Criterion) {
    let docs: Vec<String> = (0..32).map(|_| create_test_markdown(5)).collect();
    let refs: Vec<&str> = docs.iter().map(|d| d.as_str()).collect();

    c.bench_function("render_batch_32_docs", |b| {
        b.iter(|| troffdown::render_batch(black_box(&refs)));
    });
}

criterion_group!(
    benches,
    bench_to_troff,
    bench_render_tree,
    bench_align,
    bench_render_batch,
);
criterion_main!(benches);
