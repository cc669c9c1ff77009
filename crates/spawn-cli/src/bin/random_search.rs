use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use spawn_cli::output::{self, Strategy};
use spawn_cli::{load_config, load_scene, logging, Settings};
use spawn_core::{run_random_repeats, run_random_search, Classifier};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rejection-sampling search for spawn locations", long_about = None)]
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

    /// Valid locations to find
    #[arg(long)]
    target: Option<usize>,

    /// Consecutive failures before giving up
    #[arg(long)]
    max_failures: Option<usize>,

    /// Minimum distance between checked locations
    #[arg(long)]
    min_distance: Option<f64>,

    /// Disable the minimum distance check
    #[arg(long)]
    no_min_distance: bool,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Repeat the search this many times
    #[arg(long)]
    runs: Option<usize>,
}

fn main() -> Result<()> {
    logging::init()?;
    let args = Args::parse();
    let settings = Settings::from_env();

    let mut config = load_config(args.config.as_deref())?;
    let random = &mut config.random;
    if let Some(target) = args.target {
        random.params.target_count = target;
    }
    if let Some(budget) = args.max_failures {
        random.params.max_failed_attempts = budget;
    }
    if let Some(distance) = args.min_distance {
        random.params.min_distance = distance;
    }
    if args.no_min_distance {
        random.params.enforce_min_distance = false;
    }
    if let Some(seed) = args.seed {
        random.seed = Some(seed);
    }
    if let Some(runs) = args.runs {
        random.repeats = runs;
    }
    config.validate()?;

    let mut scene = load_scene(settings.resolve_scene(args.scene.as_deref())?)?;
    let classifier = Classifier::new(config.classifier.clone())?;
    let seed = config.random.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let params = config.random.params;
    tracing::info!("Random search seed {}", seed);

    let repeats = config.random_repeats();
    if repeats > 1 {
        let report = run_random_repeats(
            &mut scene,
            &classifier,
            &config.bounds,
            params,
            repeats,
            &mut rng,
        )?;
        let dir = output::test_dir(
            &settings.results_dir,
            Strategy::Random,
            &args.environment,
            args.test,
            true,
        )?;
        output::write_repeat_results(&dir, &report)?;
        tracing::info!(
            "{}/{} runs reached {} locations, results in {}",
            report.successes(),
            report.runs.len(),
            report.target_count,
            dir.display()
        );
        return Ok(());
    }

    let result = run_random_search(&mut scene, &classifier, &config.bounds, params, &mut rng)?;
    let dir = output::test_dir(
        &settings.results_dir,
        Strategy::Random,
        &args.environment,
        args.test,
        false,
    )?;
    output::write_locations(&dir, &result.sets)?;
    output::write_time_stamps(&dir, &result.discovery_times)?;
    output::write_stats(&dir, &output::random_stats(&config.bounds, params, &result)?)?;

    tracing::info!(
        "Found {}/{} locations in {:?} ({} checked)",
        result.found(),
        result.target_count,
        result.elapsed,
        result.checked
    );
    tracing::info!("Results written to {}", dir.display());
    Ok(())
}
