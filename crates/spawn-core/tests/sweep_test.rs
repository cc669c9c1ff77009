//! Step sweep and repeated random run tests.

use rand::rngs::StdRng;
use rand::SeedableRng;
use spawn_core::{
    run_grid_sweep, run_planar_sweep, run_random_repeats, Classifier, ClassifierSettings,
    ConfigError, PlanarBounds, PlanarSettings, Point2, Point3, RandomSearchParams,
    RandomTermination, SceneObject, SceneOracle, SearchBounds, SearchError, StepSweep,
};

fn scene() -> SceneOracle {
    SceneOracle::default()
        .with_object(SceneObject::new(
            "Terrain",
            Point3::new(-5.0, -1.0, -5.0),
            Point3::new(5.0, 0.0, 5.0),
        ))
        .with_object(SceneObject::new(
            "Water",
            Point3::new(-5.0, -1.0, -5.0),
            Point3::new(0.0, 0.5, 5.0),
        ))
}

fn classifier() -> Classifier {
    Classifier::new(ClassifierSettings::default()).unwrap()
}

#[test]
fn test_grid_sweep_runs_each_step_from_scratch() {
    let mut oracle = scene();
    let bounds = SearchBounds::new(Point3::new(-2.0, 0.5, -2.0), Point3::new(2.0, 1.5, 2.0));
    let sweep = StepSweep {
        min_step: 0.5,
        max_step: 1.0,
        runs: 2,
    };

    let report = run_grid_sweep(&mut oracle, &classifier(), &bounds, &sweep).unwrap();

    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].step, 0.5);
    assert_eq!(report.rows[1].step, 1.0);
    for row in &report.rows {
        assert_eq!(row.visited, row.expected);
        assert_eq!(row.counts.total(), row.visited);
        assert!(row.counts.submerged > 0);
    }
    assert_eq!(report.rows[1].visited, 5 * 2 * 5);
    assert!(report.total_elapsed() >= report.rows[0].elapsed);
}

#[test]
fn test_planar_sweep_counts_columns() {
    let mut oracle = scene();
    let bounds = PlanarBounds::new(Point2::new(1.0, -1.0), Point2::new(3.0, 1.0));
    let sweep = StepSweep {
        min_step: 1.0,
        max_step: 2.0,
        runs: 2,
    };

    let report = run_planar_sweep(
        &mut oracle,
        &classifier(),
        &bounds,
        &sweep,
        &PlanarSettings::default(),
    )
    .unwrap();

    let visited: Vec<usize> = report.rows.iter().map(|row| row.visited).collect();
    assert_eq!(visited, vec![9, 4]);
    // Dry flat ground: one valid location per column.
    for row in &report.rows {
        assert_eq!(row.counts.valid, row.visited);
    }
}

#[test]
fn test_random_repeats_are_independent() {
    let mut oracle = scene();
    let bounds = SearchBounds::new(Point3::new(1.0, 0.5, -4.0), Point3::new(4.0, 0.5, 4.0));
    let params = RandomSearchParams {
        target_count: 10,
        min_distance: 1.0,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(21);

    let report =
        run_random_repeats(&mut oracle, &classifier(), &bounds, params, 3, &mut rng).unwrap();

    assert_eq!(report.runs.len(), 3);
    assert_eq!(report.successes(), 3);
    for run in &report.runs {
        assert_eq!(run.found, 10);
        assert_eq!(run.termination, RandomTermination::TargetReached);
        assert_eq!(run.discovery_times.len(), 10);
    }
}

#[test]
fn test_invalid_sweep_is_rejected() {
    let mut oracle = scene();
    let sweep = StepSweep {
        min_step: 1.0,
        max_step: 0.5,
        runs: 2,
    };

    let err = run_grid_sweep(&mut oracle, &classifier(), &SearchBounds::default(), &sweep)
        .unwrap_err();
    assert!(matches!(
        err,
        SearchError::Config(ConfigError::InvalidSweep { .. })
    ));

    let mut rng = StdRng::seed_from_u64(0);
    let err = run_random_repeats(
        &mut oracle,
        &classifier(),
        &SearchBounds::default(),
        RandomSearchParams::default(),
        0,
        &mut rng,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SearchError::Config(ConfigError::InvalidSweep { .. })
    ));
    assert_eq!(oracle.physics_steps(), 0);
}
