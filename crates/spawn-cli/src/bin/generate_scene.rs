use anyhow::{Context, Result};
use clap::Parser;
use spawn_cli::logging;
use spawn_core::{obstacle_lattice, BodyShape, Point3, SceneObject, SceneOracle, Tag};
use std::fs;
use std::path::PathBuf;

/// Benchmark scene: flat terrain plus a regular lattice of obstacle boxes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output file (JSON)
    #[arg(long, default_value = "scene.json")]
    out: PathBuf,

    /// Obstacles along x
    #[arg(long, default_value_t = 1)]
    num_x: usize,

    /// Obstacles along y
    #[arg(long, default_value_t = 1)]
    num_y: usize,

    /// Obstacles along z
    #[arg(long, default_value_t = 1)]
    num_z: usize,

    /// Distance between obstacle centers
    #[arg(long, default_value_t = 1.5)]
    spacing: f64,

    /// Edge length of each obstacle
    #[arg(long, default_value_t = 1.0)]
    size: f64,

    /// Half width of the terrain slab around the origin
    #[arg(long, default_value_t = 10.0)]
    extent: f64,
}

fn main() -> Result<()> {
    logging::init()?;
    let args = Args::parse();

    let mut scene = SceneOracle::new(BodyShape::default()).with_object(SceneObject::new(
        "Terrain",
        Point3::new(-args.extent, -1.0, -args.extent),
        Point3::new(args.extent, 0.0, args.extent),
    ));
    let origin = Point3::new(0.0, args.size / 2.0, 0.0);
    scene.extend(obstacle_lattice(
        origin,
        [args.num_x, args.num_y, args.num_z],
        args.spacing,
        Point3::new(args.size, args.size, args.size),
        &Tag::new("Obstacle"),
    ));

    let json = serde_json::to_string_pretty(&scene)?;
    fs::write(&args.out, json).with_context(|| format!("writing {}", args.out.display()))?;
    tracing::info!(
        "Wrote {} objects to {}",
        scene.objects.len(),
        args.out.display()
    );
    Ok(())
}
