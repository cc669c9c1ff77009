use anyhow::Result;
use clap::Parser;
use spawn_cli::output::{self, Strategy};
use spawn_cli::{load_config, load_scene, logging, Settings};
use spawn_core::{run_grid_search, run_grid_sweep, Classifier};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Exhaustive 3D lattice search for spawn locations", long_about = None)]
struct Args {
    /// Search configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scene description (JSON), defaults to $SPAWN_SCENE
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Environment name used in the results path
    #[arg(long, default_value = "default")]
    environment: String,

    /// Test number used in the results path
    #[arg(long, default_value_t = 1)]
    test: u32,

    /// Step along x and z
    #[arg(long)]
    step_plane: Option<f64>,

    /// Step along y
    #[arg(long)]
    step_height: Option<f64>,

    /// Sweep the step size over this many runs instead of a single search
    #[arg(long)]
    sweep_runs: Option<usize>,
}

fn main() -> Result<()> {
    logging::init()?;
    let args = Args::parse();
    let settings = Settings::from_env();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(step) = args.step_plane {
        config.grid.step_plane = step;
    }
    if let Some(step) = args.step_height {
        config.grid.step_height = step;
    }
    if let Some(runs) = args.sweep_runs {
        config.sweep.runs = runs;
    }
    config.validate()?;

    let mut scene = load_scene(settings.resolve_scene(args.scene.as_deref())?)?;
    let classifier = Classifier::new(config.classifier.clone())?;

    if config.sweep.runs > 1 {
        let report = run_grid_sweep(&mut scene, &classifier, &config.bounds, &config.sweep)?;
        let dir = output::test_dir(
            &settings.results_dir,
            Strategy::Grid,
            &args.environment,
            args.test,
            true,
        )?;
        output::write_sweep_results(&dir, &report)?;
        tracing::info!(
            "Swept {} step sizes in {:?}, results in {}",
            report.rows.len(),
            report.total_elapsed(),
            dir.display()
        );
        return Ok(());
    }

    let result = run_grid_search(&mut scene, &classifier, &config.bounds, config.grid)?;
    let dir = output::test_dir(
        &settings.results_dir,
        Strategy::Grid,
        &args.environment,
        args.test,
        false,
    )?;
    output::write_locations(&dir, &result.sets)?;
    output::write_stats(&dir, &output::grid_stats(&config.bounds, config.grid, &result)?)?;

    let counts = result.sets.counts();
    tracing::info!(
        "Checked {} locations in {:?}: {} valid, {} invalid, {} air",
        result.visited,
        result.elapsed,
        counts.valid,
        counts.invalid,
        counts.air
    );
    tracing::info!("Results written to {}", dir.display());
    Ok(())
}
