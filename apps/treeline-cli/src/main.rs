mod flight;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glam::{Quat, Vec3};
use tracing_subscriber::EnvFilter;
use treeline_config::Settings;
use treeline_input::{Action, Motion};
use treeline_scene::SceneGraph;
use treeline_tools::SceneInspector;

use crate::flight::Flight;

#[derive(Parser)]
#[command(name = "treeline-cli", about = "CLI tool for treeline scene graphs")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the effective settings
    Info {
        /// Settings file (YAML); defaults are used if absent
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },
    /// Fly the camera headlessly and report where it and the terrain grid end up
    Fly {
        /// Settings file (YAML); defaults are used if absent
        #[arg(short, long)]
        settings: Option<PathBuf>,
        /// Number of frames to simulate
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// Horizontal pointer travel per frame, in pixels
        #[arg(long, default_value = "0.0")]
        turn: f32,
        /// Hold the boost key for the whole flight
        #[arg(long)]
        boost: bool,
    },
    /// Build a fan-out hierarchy and print its shape
    Tree {
        /// Levels below the root
        #[arg(short, long, default_value = "3")]
        depth: usize,
        /// Children per node
        #[arg(short, long, default_value = "2")]
        fanout: usize,
        /// Print every node
        #[arg(long)]
        nodes: bool,
    },
}

fn load_settings(path: Option<PathBuf>) -> anyhow::Result<Settings> {
    Ok(match path {
        Some(path) => Settings::load_or_default(path)?,
        None => Settings::default(),
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info { settings } => {
            let settings = load_settings(settings)?;
            println!("treeline-cli v{}", env!("CARGO_PKG_VERSION"));
            print!("{}", settings.to_yaml()?);
        }
        Commands::Fly {
            settings,
            frames,
            dt,
            turn,
            boost,
        } => {
            let settings = load_settings(settings)?;
            let mut flight = Flight::new(&settings)?;
            println!("Flight: frames={frames}, dt={dt}, turn={turn}px, boost={boost}");

            let mut opening = vec![Action::ToggleMouseGrab, Action::Press(Motion::Forward)];
            if boost {
                opening.push(Action::Press(Motion::Boost));
            }
            flight.step(dt, opening)?;

            let mut shifts = 0;
            while flight.running() && flight.frames() < u64::from(frames) {
                let look = Action::Look { dx: turn, dy: 0.0 };
                if !flight.step(dt, [look])?.is_zero() {
                    shifts += 1;
                }
            }

            let camera = flight.camera();
            let p = flight.camera_position()?;
            let d = camera.direction();
            let g = flight.grid_position()?;
            println!(
                "Camera: position=({:.3}, {:.3}, {:.3}) direction=({:.3}, {:.3}, {:.3}) yaw={:.3}",
                p.x, p.y, p.z, d.x, d.y, d.z, camera.yaw
            );
            println!(
                "Grid: position=({:.1}, {:.1}, {:.1}) extent={} shifts={shifts}",
                g.x,
                g.y,
                g.z,
                flight.grid_extent()
            );
            let clip = flight.view_projection().project_point3(g);
            println!("Grid origin in clip space: ({:.3}, {:.3}, {:.3})", clip.x, clip.y, clip.z);
            println!(
                "Pointer grabbed: {}, {}",
                flight.controls().grabbed(),
                SceneInspector::summary(flight.graph())
            );
        }
        Commands::Tree {
            depth,
            fanout,
            nodes,
        } => {
            let graph = build_tree(depth, fanout)?;
            println!("{}", SceneInspector::summary(&graph));
            if nodes {
                for (level, id) in SceneInspector::outline(&graph) {
                    if let Some(info) = SceneInspector::inspect_node(&graph, id) {
                        println!("{:indent$}{info}", "", indent = level * 2);
                    }
                }
            }
        }
    }

    Ok(())
}

/// One root with `fanout` children per node, `depth` levels deep, resolved.
fn build_tree(depth: usize, fanout: usize) -> anyhow::Result<SceneGraph> {
    let mut graph = SceneGraph::new();
    let root = graph.create_node();
    let mut frontier = vec![root];
    for level in 0..depth {
        let mut next = Vec::with_capacity(frontier.len() * fanout);
        for &parent in &frontier {
            for i in 0..fanout {
                let offset = Vec3::new(i as f32, 1.0, 0.0);
                let rotation = Quat::from_rotation_y(0.1 * (level + i) as f32);
                let child = graph.create_node_with(offset, rotation);
                graph.attach(parent, child)?;
                next.push(child);
            }
        }
        frontier = next;
    }
    graph.update(root)?;
    tracing::debug!(nodes = graph.len(), "tree built");
    Ok(graph)
}
