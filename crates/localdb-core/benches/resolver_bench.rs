//! Criterion benchmarks for key path parsing and the document resolver.
//!
//! Every store operation parses one key path and walks the document once, so
//! these two costs bound the in-memory part of a get/set call.
//!
//! Run with:
//! ```bash
//! cargo bench --package localdb-core --bench resolver_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use localdb_core::{resolver, KeyPath};
use serde_json::{json, Value};

// ── Document fixture builders ─────────────────────────────────────────────────

/// Builds a document nested `depth` objects deep, with `width` sibling keys at
/// every level, and returns it with the path to the deepest leaf.
fn build_nested_document(depth: usize, width: usize) -> (Value, KeyPath) {
    let mut doc = json!({});
    let mut path = KeyPath::root();
    for level in 0..depth {
        path = path.child(format!("level{level}"));
        for sibling in 0..width {
            let sibling_path = path.child(format!("sibling{sibling}"));
            resolver::write(&mut doc, &sibling_path, json!(sibling));
        }
    }
    let leaf = path.child("leaf");
    resolver::write(&mut doc, &leaf, json!("value"));
    (doc, leaf)
}

// ── Benchmarks: KeyPath::parse ────────────────────────────────────────────────

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_path_parse");

    for expr in ["color", "window.size.width", r#"servers["eu.west"].hosts[12].name"#] {
        group.bench_with_input(BenchmarkId::from_parameter(expr), expr, |b, expr| {
            b.iter(|| KeyPath::parse(black_box(expr)))
        });
    }

    group.finish();
}

// ── Benchmarks: read / write ──────────────────────────────────────────────────

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver_read");

    for depth in [1usize, 4, 16] {
        let (doc, leaf) = build_nested_document(depth, 8);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| resolver::read(black_box(&doc), black_box(&leaf)))
        });
    }

    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver_write");

    for depth in [1usize, 4, 16] {
        let (doc, leaf) = build_nested_document(depth, 8);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter_batched(
                || doc.clone(),
                |mut doc| resolver::write(&mut doc, black_box(&leaf), json!(42)),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_read, bench_write);
criterion_main!(benches);
