//! Lattice search integration tests.
//!
//! Exercises the 3D and planar searches against a stub oracle and the
//! box scene oracle.

use spawn_core::{
    run_grid_search, run_planar_search, Classifier, ClassifierSettings, FeasibilityOracle,
    Axis, ConfigError, GridParams, Label, OracleError, PlanarBounds, PlanarSettings, Point2,
    Point3, RayHit, Reason, SceneObject, SceneOracle, SearchBounds, SearchError, Tag, TagSet,
};

/// Flat open ground: every point is grounded, dry and collision free.
/// With `fail_on` set, that collision query (1-based) fails.
#[derive(Default)]
struct OpenField {
    collision_queries: usize,
    fail_on: Option<usize>,
}

impl FeasibilityOracle for OpenField {
    fn aerial_clearance(
        &mut self,
        _point: Point3,
        _max_distance: f64,
        _ignored: &TagSet,
    ) -> Result<Option<RayHit>, OracleError> {
        Ok(Some(RayHit {
            tag: Tag::new("Terrain"),
            distance: 0.0,
        }))
    }

    fn water_hits(&mut self, _: Point3, _: f64, _: &Tag) -> Result<Vec<f64>, OracleError> {
        Ok(Vec::new())
    }

    fn terrain_hits(&mut self, _: Point2, _: f64, _: f64, _: &Tag) -> Result<Vec<f64>, OracleError> {
        Ok(vec![0.0])
    }

    fn collision_at(&mut self, _placement: Point3) -> Result<bool, OracleError> {
        self.collision_queries += 1;
        if self.fail_on == Some(self.collision_queries) {
            return Err(OracleError::BodyPlacement {
                reason: "physics step timed out".into(),
            });
        }
        Ok(false)
    }
}

fn classifier() -> Classifier {
    Classifier::new(ClassifierSettings::default()).unwrap()
}

fn ground() -> SceneObject {
    SceneObject::new(
        "Terrain",
        Point3::new(-5.0, -1.0, -5.0),
        Point3::new(5.0, 0.0, 5.0),
    )
}

fn pond() -> SceneObject {
    SceneObject::new(
        "Water",
        Point3::new(0.0, -1.0, 0.0),
        Point3::new(2.0, 1.5, 2.0),
    )
}

#[test]
fn test_flat_three_by_three_is_all_valid() {
    let mut oracle = OpenField::default();
    let bounds = SearchBounds::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 2.0));

    let result =
        run_grid_search(&mut oracle, &classifier(), &bounds, GridParams::uniform(1.0)).unwrap();

    assert_eq!(result.visited, 9);
    assert_eq!(result.sets.valid().len(), 9);
    assert!(result.sets.invalid().is_empty());
    assert!(result.sets.air().is_empty());
    assert_eq!(oracle.collision_queries, 9);

    let mut expected = Vec::new();
    for x in 0..3 {
        for z in 0..3 {
            expected.push(Point3::new(x as f64, 0.0, z as f64));
        }
    }
    let found: Vec<Point3> = result.sets.valid().iter().map(|p| p.point).collect();
    assert_eq!(found, expected, "lattice order should be x outer, z inner");
}

#[test]
fn test_visited_matches_lattice_len() {
    let mut oracle = OpenField::default();
    let bounds = SearchBounds::new(Point3::new(-1.0, 0.0, -1.0), Point3::new(1.0, 1.0, 1.3));
    let params = GridParams {
        step_plane: 0.5,
        step_height: 0.5,
    };

    let result = run_grid_search(&mut oracle, &classifier(), &bounds, params).unwrap();

    // z stops at 1.0, short of the 1.3 upper bound.
    assert_eq!(result.visited, bounds.lattice_len(0.5, 0.5).unwrap());
    assert_eq!(result.visited, 5 * 3 * 5);
    assert_eq!(result.sets.total(), result.visited);
}

#[test]
fn test_degenerate_bounds_visit_one_point() {
    let mut oracle = OpenField::default();
    let corner = Point3::new(3.0, 1.0, -2.0);
    let bounds = SearchBounds::new(corner, corner);

    let result =
        run_grid_search(&mut oracle, &classifier(), &bounds, GridParams::uniform(0.1)).unwrap();

    assert_eq!(result.visited, 1);
    assert_eq!(result.sets.valid()[0].point, corner);
}

#[test]
fn test_scene_grid_marks_submerged_points() {
    let mut scene = SceneOracle::default().with_object(ground()).with_object(pond());
    let bounds = SearchBounds::new(Point3::new(0.0, 0.5, 0.0), Point3::new(4.0, 2.5, 2.0));

    let result =
        run_grid_search(&mut scene, &classifier(), &bounds, GridParams::uniform(1.0)).unwrap();
    let counts = result.sets.counts();

    assert_eq!(result.visited, 5 * 3 * 3);
    // y = 2.5 is beyond the check height everywhere.
    assert_eq!(counts.air, 15);
    // Columns x in {0, 1, 2} lie in the pond, which reaches y = 1.5.
    assert_eq!(counts.submerged, 18);
    assert_eq!(counts.valid, 12);

    for p in result.sets.invalid() {
        assert_eq!(p.reason, Reason::Submerged);
        assert!(p.point.x <= 2.0 && p.point.y <= 1.5, "{} is not under water", p.point);
    }
    for p in result.sets.valid() {
        assert!(p.point.x > 2.0, "{} should be submerged", p.point);
    }
}

#[test]
fn test_scene_grid_reports_collisions() {
    // A thin wall beside the x = 1 column: the body overlaps it there,
    // while the columns at x = 0 and x = 2 stay clear.
    let wall = SceneObject::new(
        "Wall",
        Point3::new(1.2, 0.0, -0.5),
        Point3::new(1.4, 1.0, 0.5),
    );
    let mut scene = SceneOracle::default().with_object(ground()).with_object(wall);
    let bounds = SearchBounds::new(Point3::new(0.0, 0.5, 0.0), Point3::new(2.0, 0.5, 0.0));

    let result =
        run_grid_search(&mut scene, &classifier(), &bounds, GridParams::uniform(1.0)).unwrap();

    let labels: Vec<Label> = [0.0, 1.0, 2.0]
        .iter()
        .map(|&x| {
            let p = Point3::new(x, 0.5, 0.0);
            [Label::Valid, Label::Invalid, Label::Air]
                .into_iter()
                .find(|&label| result.sets.points(label).iter().any(|c| c.point == p))
                .unwrap()
        })
        .collect();
    assert_eq!(labels, vec![Label::Valid, Label::Invalid, Label::Valid]);
    assert_eq!(result.sets.invalid()[0].reason, Reason::Collision);
    assert_eq!(result.sets.counts().collisions, 1);
    assert_eq!(scene.physics_steps(), 3);
}

#[test]
fn test_grid_search_is_idempotent() {
    let mut scene = SceneOracle::default().with_object(ground()).with_object(pond());
    let bounds = SearchBounds::new(Point3::new(-1.0, 0.0, -1.0), Point3::new(3.0, 2.0, 3.0));
    let classifier = classifier();

    let first =
        run_grid_search(&mut scene, &classifier, &bounds, GridParams::uniform(0.5)).unwrap();
    let second =
        run_grid_search(&mut scene, &classifier, &bounds, GridParams::uniform(0.5)).unwrap();

    assert_eq!(first.sets.valid(), second.sets.valid());
    assert_eq!(first.sets.invalid(), second.sets.invalid());
    assert_eq!(first.sets.air(), second.sets.air());
}

#[test]
fn test_planar_search_finds_every_layer() {
    let bridge = SceneObject::new(
        "Terrain",
        Point3::new(-0.5, 2.5, -0.5),
        Point3::new(0.5, 3.0, 0.5),
    );
    let mut scene = SceneOracle::default().with_object(ground()).with_object(bridge);
    let bounds = PlanarBounds::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));

    let result = run_planar_search(
        &mut scene,
        &classifier(),
        &bounds,
        1.0,
        &PlanarSettings::default(),
    )
    .unwrap();

    assert_eq!(result.columns, 2);
    let found: Vec<Point3> = result.sets.valid().iter().map(|p| p.point).collect();
    assert_eq!(
        found,
        vec![
            Point3::new(0.0, 3.5, 0.0),
            Point3::new(0.0, 0.5, 0.0),
            Point3::new(1.0, 0.5, 0.0),
        ]
    );
}

#[test]
fn test_planar_search_drowns_layers_below_water() {
    let bridge = SceneObject::new(
        "Terrain",
        Point3::new(-0.5, 2.5, -0.5),
        Point3::new(0.5, 3.0, 0.5),
    );
    let lake = SceneObject::new(
        "Water",
        Point3::new(-5.0, -1.0, -5.0),
        Point3::new(5.0, 1.0, 5.0),
    );
    let mut scene = SceneOracle::default()
        .with_object(ground())
        .with_object(bridge)
        .with_object(lake);
    let bounds = PlanarBounds::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));

    let result = run_planar_search(
        &mut scene,
        &classifier(),
        &bounds,
        1.0,
        &PlanarSettings::default(),
    )
    .unwrap();

    assert_eq!(result.sets.valid().len(), 1);
    assert_eq!(result.sets.valid()[0].point, Point3::new(0.0, 3.5, 0.0));
    assert_eq!(result.sets.invalid().len(), 2);
    assert!(result
        .sets
        .invalid()
        .iter()
        .all(|p| p.reason == Reason::Submerged));
    // Submerged layers never reach the physics step.
    assert_eq!(scene.physics_steps(), 1);
}

#[test]
fn test_planar_column_without_terrain_yields_nothing() {
    let mut scene = SceneOracle::default().with_object(ground());
    let bounds = PlanarBounds::new(Point2::new(20.0, 20.0), Point2::new(21.0, 21.0));

    let result = run_planar_search(
        &mut scene,
        &classifier(),
        &bounds,
        1.0,
        &PlanarSettings::default(),
    )
    .unwrap();

    assert_eq!(result.columns, 4);
    assert_eq!(result.sets.total(), 0);
}

#[test]
fn test_grid_search_aborts_on_oracle_error() {
    let mut oracle = OpenField {
        fail_on: Some(4),
        ..Default::default()
    };
    let bounds = SearchBounds::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 2.0));

    let err = run_grid_search(&mut oracle, &classifier(), &bounds, GridParams::uniform(1.0))
        .unwrap_err();

    assert!(matches!(err, SearchError::Oracle(OracleError::BodyPlacement { .. })));
    // Nothing after the failing point is classified.
    assert_eq!(oracle.collision_queries, 4);
}

#[test]
fn test_planar_search_aborts_on_oracle_error() {
    let mut oracle = OpenField {
        fail_on: Some(2),
        ..Default::default()
    };
    let bounds = PlanarBounds::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));

    let err = run_planar_search(
        &mut oracle,
        &classifier(),
        &bounds,
        1.0,
        &PlanarSettings::default(),
    )
    .unwrap_err();

    assert!(matches!(err, SearchError::Oracle(_)));
    assert_eq!(oracle.collision_queries, 2);
}

#[test]
fn test_oversized_lattice_is_rejected_before_search() {
    let mut oracle = OpenField::default();
    let bounds = SearchBounds::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1e300, 0.0, 0.0));
    let params = GridParams {
        step_plane: 1e-300,
        step_height: 1.0,
    };

    let err = run_grid_search(&mut oracle, &classifier(), &bounds, params).unwrap_err();

    assert_eq!(
        err,
        SearchError::Config(ConfigError::LatticeTooLarge {
            axis: Axis::X,
            step: 1e-300
        })
    );
    assert_eq!(oracle.collision_queries, 0);
}

#[test]
fn test_overflowing_extent_is_rejected_before_search() {
    let mut oracle = OpenField::default();
    let bounds = PlanarBounds::new(Point2::new(-1e308, 0.0), Point2::new(1e308, 0.0));

    let err = run_planar_search(
        &mut oracle,
        &classifier(),
        &bounds,
        1.0,
        &PlanarSettings::default(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        SearchError::Config(ConfigError::InfiniteExtent { axis: Axis::X })
    );
    assert_eq!(oracle.collision_queries, 0);
}
