//! Benchmarks for notation and recursive link creation
//!
//! Run with: `cargo bench -p links-core`
//!
//! - Rendering and parsing wide and deep notation
//! - Creating links from nested arrays against the in-memory store
//! - Filtered reads over a populated store

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use links_core::models::Node;
use links_core::notation::{parse_links_notation, to_links_notation};
use links_core::{InMemoryLinkStore, LinksService, RecursiveLinks, Restriction, ANY};
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Runtime;

/// N independent pairs: `((1 2) (3 4) ...)`
fn wide_pairs(count: i64) -> Vec<Node> {
    (0..count).map(|i| Node::pair(i * 2 + 1, i * 2 + 2)).collect()
}

/// One pair nested `depth` levels on the source side
fn deep_pair(depth: i64) -> Vec<Node> {
    let mut node = Node::pair(1, 2);
    for level in 0..depth {
        node = Node::seq([node, Node::scalar(level + 3)]);
    }
    vec![node]
}

fn bench_notation(c: &mut Criterion) {
    let wide = wide_pairs(1000);
    let deep = deep_pair(100);
    let wide_text = to_links_notation(&wide);
    let deep_text = to_links_notation(&deep);

    let mut group = c.benchmark_group("notation");

    group.bench_function("render_1000_pairs", |b| {
        b.iter(|| to_links_notation(black_box(&wide)))
    });

    group.bench_function("parse_1000_pairs", |b| {
        b.iter(|| parse_links_notation(black_box(&wide_text)))
    });

    group.bench_function("parse_depth_100", |b| {
        b.iter(|| parse_links_notation(black_box(&deep_text)))
    });

    group.finish();
}

fn bench_recursive_create(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let items = wide_pairs(100);

    let mut group = c.benchmark_group("recursive_links");
    group.sample_size(20);

    group.bench_function("create_100_pairs", |b| {
        b.iter_custom(|iters| {
            rt.block_on(async {
                let mut total = std::time::Duration::ZERO;
                for _ in 0..iters {
                    let codec = RecursiveLinks::new(LinksService::new(Arc::new(
                        InMemoryLinkStore::new(),
                    )));

                    let start = Instant::now();
                    let ids = codec.create_from_nested_array(&items).await.unwrap();
                    total += start.elapsed();
                    black_box(ids);
                }
                total
            })
        })
    });

    group.finish();
}

fn bench_filtered_count(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let links = LinksService::new(Arc::new(InMemoryLinkStore::new()));
    rt.block_on(async {
        for i in 0..1000i64 {
            links.create(&[i % 10 + 1, i + 1], None).await.unwrap();
        }
    });

    c.bench_function("count_by_source_1000_links", |b| {
        b.iter(|| {
            rt.block_on(async {
                links
                    .count(black_box(Restriction::from_values(&[3, ANY])))
                    .await
                    .unwrap()
            })
        })
    });
}

criterion_group!(
    benches,
    bench_notation,
    bench_recursive_create,
    bench_filtered_count
);
criterion_main!(benches);
