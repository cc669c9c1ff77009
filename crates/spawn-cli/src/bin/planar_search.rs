use anyhow::Result;
use clap::Parser;
use spawn_cli::output::{self, Strategy};
use spawn_cli::{load_config, load_scene, logging, Settings};
use spawn_core::{run_planar_search, run_planar_sweep, Classifier};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Column search over every terrain layer", long_about = None)]
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

    /// Column spacing
    #[arg(long)]
    step: Option<f64>,

    /// Height above terrain at which the body is tested
    #[arg(long)]
    y_offset: Option<f64>,

    /// Sweep the step size over this many runs instead of a single search
    #[arg(long)]
    sweep_runs: Option<usize>,
}

fn main() -> Result<()> {
    logging::init()?;
    let args = Args::parse();
    let settings = Settings::from_env();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(step) = args.step {
        config.planar.step = step;
    }
    if let Some(offset) = args.y_offset {
        config.planar.settings.y_offset = offset;
    }
    if let Some(runs) = args.sweep_runs {
        config.sweep.runs = runs;
    }
    config.validate()?;

    let mut scene = load_scene(settings.resolve_scene(args.scene.as_deref())?)?;
    let classifier = Classifier::new(config.classifier.clone())?;
    let planar = &config.planar;

    if config.sweep.runs > 1 {
        let report = run_planar_sweep(
            &mut scene,
            &classifier,
            &planar.bounds,
            &config.sweep,
            &planar.settings,
        )?;
        let dir = output::test_dir(
            &settings.results_dir,
            Strategy::Planar,
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

    let result = run_planar_search(
        &mut scene,
        &classifier,
        &planar.bounds,
        planar.step,
        &planar.settings,
    )?;
    let dir = output::test_dir(
        &settings.results_dir,
        Strategy::Planar,
        &args.environment,
        args.test,
        false,
    )?;
    output::write_locations(&dir, &result.sets)?;
    output::write_stats(
        &dir,
        &output::planar_stats(&planar.bounds, planar.step, &result)?,
    )?;

    let counts = result.sets.counts();
    tracing::info!(
        "Probed {} columns in {:?}: {} valid, {} invalid",
        result.columns,
        result.elapsed,
        counts.valid,
        counts.invalid
    );
    tracing::info!("Results written to {}", dir.display());
    Ok(())
}
