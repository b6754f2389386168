use chronograph::compute::spatial::{estimate_density, rank_movement, synchronize_edges};
use chronograph::compute::temporal::{common_intervals, resample_graph};
use chronograph::{Config, Explorer, Graph, GraphBuilder, IntervalRecord, Point, Selection, Window};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn synthetic_graph(nodes: usize, intervals: usize) -> Graph {
    let mut builder = GraphBuilder::new();
    for n in 0..nodes {
        let id = format!("n{}", n);
        let offset = (n % 17) as f64;
        for i in 0..intervals {
            let t0 = offset + i as f64 * 10.0;
            let from = Point::new(t0.sin() * n as f64, t0.cos());
            let to = Point::new((t0 + 5.0).sin() * n as f64, (t0 + 5.0).cos());
            builder
                .add_node_record(id.as_str(), id.as_str(), IntervalRecord::new(t0, t0 + 5.0, from, to))
                .unwrap();
        }
        if n > 0 {
            let edge = format!("e{}", n);
            let source = format!("n{}", n - 1);
            builder
                .add_edge_presence(edge.as_str(), source.as_str(), id.as_str(), (offset, offset + 40.0))
                .unwrap();
        }
    }
    builder.build()
}

fn benchmark_resampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("resampling");
    let graph = synthetic_graph(200, 20);
    let selection = Selection::from_ids(graph.node_ids().cloned());

    for frequency in [1usize, 10, 50] {
        group.bench_with_input(
            BenchmarkId::new("resample_graph", frequency),
            &frequency,
            |b, &frequency| {
                b.iter(|| resample_graph(black_box(&graph), None, &selection, frequency))
            },
        );
    }

    let resampled = resample_graph(&graph, None, &selection, 10);
    group.bench_function("synchronize_edges", |b| {
        b.iter(|| synchronize_edges(black_box(graph.edges()), black_box(&resampled), None))
    });

    group.finish();
}

fn benchmark_analytics(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytics");
    let graph = synthetic_graph(500, 20);
    let window = Window::new(50.0, 150.0).unwrap();

    group.bench_function("rank_movement_windowed", |b| {
        b.iter(|| rank_movement(black_box(graph.nodes()), Some(&window)))
    });

    for pinned in [2usize, 8, 32] {
        let sets: Vec<_> = graph.nodes().iter().take(pinned).map(|n| n.intervals()).collect();
        group.bench_with_input(
            BenchmarkId::new("common_intervals", pinned),
            &sets,
            |b, sets| b.iter(|| common_intervals(black_box(sets), None)),
        );
    }

    let points: Vec<Point<f64>> = graph
        .nodes()
        .iter()
        .flat_map(|n| n.samples.iter().map(|s| s.position))
        .collect();
    group.bench_function("estimate_density_64", |b| {
        b.iter(|| estimate_density(black_box(&points), 1.0, 64))
    });

    group.finish();
}

fn benchmark_explorer(c: &mut Criterion) {
    let mut group = c.benchmark_group("explorer");
    let mut explorer = Explorer::load(synthetic_graph(200, 20), Config::default()).unwrap();

    group.bench_function("set_window", |b| {
        let mut start = 0.0;
        b.iter(|| {
            start = (start + 7.0) % 150.0;
            explorer.set_window(start, start + 40.0).unwrap();
        })
    });

    group.bench_function("toggle_pin", |b| {
        b.iter(|| explorer.toggle_pin(black_box("n42")).unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_resampling,
    benchmark_analytics,
    benchmark_explorer
);
criterion_main!(benches);
