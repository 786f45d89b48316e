//! Benchmarks for step-log generation
//!
//! Measures how recording cost grows with input size for:
//! - Dijkstra on random connected graphs
//! - Prim on random connected weighted graphs
//! - Huffman coding on texts with growing alphabets

use algoscope_model::{random_connected_graph, GraphConfig, NodeId};
use algoscope_steplog::{generate_dijkstra, generate_huffman, generate_prim};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");

    for &nodes in &[8usize, 32, 128] {
        let config = GraphConfig::weighted().with_nodes(nodes).with_seed(7);
        let graph = random_connected_graph(&config).expect("generated graph");
        group.throughput(Throughput::Elements(nodes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &graph, |b, g| {
            b.iter(|| generate_dijkstra(black_box(g), NodeId(0)))
        });
    }
    group.finish();
}

fn bench_prim(c: &mut Criterion) {
    let mut group = c.benchmark_group("prim");

    // each snapshot clones the graph, so this one grows quadratically
    for &nodes in &[8usize, 32, 128] {
        let config = GraphConfig::weighted().with_nodes(nodes).with_seed(7);
        let graph = random_connected_graph(&config).expect("generated graph");
        group.throughput(Throughput::Elements(nodes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &graph, |b, g| {
            b.iter(|| generate_prim(black_box(g)))
        });
    }
    group.finish();
}

fn bench_huffman(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman");

    for &alphabet in &[4u8, 16, 26] {
        let text: String = (0..1000u32)
            .map(|i| char::from(b'a' + (i * i % u32::from(alphabet)) as u8))
            .collect();
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("alphabet", alphabet), &text, |b, t| {
            b.iter(|| generate_huffman(black_box(t)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dijkstra, bench_prim, bench_huffman);

criterion_main!(benches);
