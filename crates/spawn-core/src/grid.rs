//! Exhaustive lattice searches.
//!
//! The 3D search classifies every lattice point of a box. The planar
//! search walks ground-plane columns and classifies every terrain layer
//! it finds in each, so one column may produce several locations
//! (bridges, overhangs) or none.

use crate::classifier::{Classifier, PlanarSettings};
use crate::error::SearchError;
use crate::geometry::{axis_values, validate_step, Axis, PlanarBounds, Point2, Point3, SearchBounds};
use crate::models::{ClassifiedPoint, GridRunResult, PlanarRunResult, ResultSets};
use crate::oracle::FeasibilityOracle;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Step sizes of a 3D lattice search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    /// Step along x and z
    pub step_plane: f64,
    /// Step along y
    pub step_height: f64,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            step_plane: 1.0,
            step_height: 1.0,
        }
    }
}

impl GridParams {
    pub fn uniform(step: f64) -> Self {
        Self {
            step_plane: step,
            step_height: step,
        }
    }
}

/// Classify every lattice point of `bounds`, `x` outermost and `z`
/// innermost. Bounds are inclusive; the last sample on an axis falls
/// short of `upper` when the extent is not a multiple of the step.
pub fn run_grid_search<O>(
    oracle: &mut O,
    classifier: &Classifier,
    bounds: &SearchBounds,
    params: GridParams,
) -> Result<GridRunResult, SearchError>
where
    O: FeasibilityOracle + ?Sized,
{
    validate_step(Axis::X, params.step_plane)?;
    validate_step(Axis::Y, params.step_height)?;
    bounds.validate()?;
    bounds.lattice_len(params.step_plane, params.step_height)?;

    let started = Instant::now();
    let mut sets = ResultSets::new();
    let mut visited = 0usize;

    let (lo, hi) = (bounds.lower, bounds.upper);
    for x in axis_values(lo.x, hi.x, params.step_plane) {
        for y in axis_values(lo.y, hi.y, params.step_height) {
            for z in axis_values(lo.z, hi.z, params.step_plane) {
                let point = Point3::new(x, y, z);
                let classification = classifier.classify(oracle, point)?;
                sets.record(ClassifiedPoint::new(point, classification));
                visited += 1;
            }
        }
    }

    let elapsed = started.elapsed();
    let counts = sets.counts();
    tracing::debug!(
        "Grid search visited {} points in {:?}: {} valid, {} invalid, {} air",
        visited,
        elapsed,
        counts.valid,
        counts.invalid,
        counts.air
    );

    Ok(GridRunResult {
        sets,
        visited,
        elapsed,
    })
}

/// Probe every column of `bounds` and classify each terrain layer hit.
pub fn run_planar_search<O>(
    oracle: &mut O,
    classifier: &Classifier,
    bounds: &PlanarBounds,
    step: f64,
    planar: &PlanarSettings,
) -> Result<PlanarRunResult, SearchError>
where
    O: FeasibilityOracle + ?Sized,
{
    validate_step(Axis::X, step)?;
    bounds.validate()?;
    bounds.lattice_len(step)?;
    planar.validate()?;

    let started = Instant::now();
    let mut sets = ResultSets::new();
    let mut columns = 0usize;

    for x in axis_values(bounds.lower.x, bounds.upper.x, step) {
        for z in axis_values(bounds.lower.z, bounds.upper.z, step) {
            for point in classifier.classify_column(oracle, Point2::new(x, z), planar)? {
                sets.record(point);
            }
            columns += 1;
        }
    }

    let elapsed = started.elapsed();
    let counts = sets.counts();
    tracing::debug!(
        "Planar search probed {} columns in {:?}: {} valid, {} invalid",
        columns,
        elapsed,
        counts.valid,
        counts.invalid
    );

    Ok(PlanarRunResult {
        sets,
        columns,
        elapsed,
    })
}
