use std::hint::black_box;
use std::time::Instant;

use glam::{Quat, Vec3};
use treeline_scene::{Camera, SceneGraph};

/// One root with `fanout` children per node, `levels` deep.
fn make_wide(fanout: usize, levels: usize) -> SceneGraph {
    let mut graph = SceneGraph::new();
    let root = graph.create_node();
    let mut frontier = vec![root];
    for level in 0..levels {
        let mut next = Vec::with_capacity(frontier.len() * fanout);
        for &parent in &frontier {
            for i in 0..fanout {
                let offset = Vec3::new(i as f32, level as f32, 0.0);
                let child = graph.create_node_with(offset, Quat::from_rotation_y(0.1 * i as f32));
                graph.attach(parent, child).expect("fresh handles");
                next.push(child);
            }
        }
        frontier = next;
    }
    graph
}

/// A single chain of `length` nodes.
fn make_deep(length: usize) -> SceneGraph {
    let mut graph = SceneGraph::new();
    let mut prev = graph.create_node();
    for _ in 0..length {
        let next = graph.create_node_with(Vec3::X, Quat::from_rotation_z(0.01));
        graph.attach(prev, next).expect("fresh handles");
        prev = next;
    }
    graph
}

fn bench_update_all(label: &str, mut graph: SceneGraph, iterations: usize) {
    let nodes = graph.len();
    let start = Instant::now();
    for _ in 0..iterations {
        black_box(&mut graph).update_all();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  update_all {label} ({nodes} nodes, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_camera(iterations: usize) {
    let mut graph = SceneGraph::new();
    let mut cam = Camera::new(&mut graph);

    let start = Instant::now();
    for i in 0..iterations {
        cam.rotate(black_box(0.001), black_box(-0.0005));
        cam.roll = (i as f32 * 0.01).sin();
        cam.update(&mut graph).expect("camera node is live");
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  camera update ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Scene Update Benchmarks ===\n");

    println!("Wide hierarchy:");
    bench_update_all("fanout=4 levels=4", make_wide(4, 4), 1000);
    bench_update_all("fanout=8 levels=4", make_wide(8, 4), 100);
    bench_update_all("fanout=16 levels=3", make_wide(16, 3), 100);

    println!("\nDeep hierarchy:");
    bench_update_all("chain=100", make_deep(100), 10000);
    bench_update_all("chain=1000", make_deep(1000), 1000);

    println!("\nCamera:");
    bench_camera(100_000);

    println!("\n=== Done ===");
}
