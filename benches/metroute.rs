use criterion::{Criterion, criterion_group, criterion_main};
use metroute::prelude::*;
use std::hint::black_box;

const SIDE: usize = 60;

/// A square grid of stations: rides along rows every 120 seconds, transfers
/// along columns.
fn grid() -> Graph {
    let id = |row: usize, col: usize| format!("{row}-{col}");
    let mut nodes = Vec::with_capacity(SIDE * SIDE);
    let mut edges = Vec::new();
    for row in 0..SIDE {
        for col in 0..SIDE {
            nodes.push(Node::new(id(row, col)));
            if col + 1 < SIDE {
                for departure in (0..3600).step_by(120) {
                    edges.push(
                        Edge::ride(id(row, col), id(row, col + 1), 90.0.into())
                            .departing_at(Time::from_seconds((departure + col * 90) as f64))
                            .on_line(format!("row {row}")),
                    );
                }
            }
            if row + 1 < SIDE {
                edges.push(Edge::transfer(id(row, col), id(row + 1, col), 240.0.into()));
                edges.push(Edge::transfer(id(row + 1, col), id(row, col), 240.0.into()));
            }
        }
    }
    Graph::new(nodes, edges).unwrap()
}

fn corner_to_corner(graph: &Graph) {
    let to = format!("{}-{}", SIDE - 1, SIDE - 1);
    let _ = black_box(
        graph
            .router("0-0", &to)
            .departure_at(Time::from_seconds(300.0))
            .solve(),
    );
}

fn short_hop(graph: &Graph) {
    let _ = black_box(graph.router("10-10", "12-14").solve());
}

fn network_analysis(graph: &Graph) {
    let _ = black_box(minimum_spanning_forest(graph));
    let _ = black_box(components(graph));
}

fn bench(c: &mut Criterion) {
    let graph = grid();
    c.bench_function("corner_to_corner", |b| b.iter(|| corner_to_corner(&graph)));
    c.bench_function("short_hop", |b| b.iter(|| short_hop(&graph)));
    c.bench_function("network_analysis", |b| b.iter(|| network_analysis(&graph)));
}

criterion_group!(benches, bench);
criterion_main!(benches);
