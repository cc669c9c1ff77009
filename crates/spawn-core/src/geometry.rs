//! Points, search volumes and lattice helpers.
//!
//! `y` is the vertical axis. `x` and `z` span the ground plane.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative tolerance applied when counting lattice points, so that
/// `2.0 / 0.1` yields 21 samples instead of 20.
const LATTICE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// A location in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn coord(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Euclidean distance between two points.
    pub fn distance(&self, other: &Point3) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn distance_squared(&self, other: &Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Planar projection (drops the height).
    pub fn column(&self) -> Point2 {
        Point2::new(self.x, self.z)
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A location on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub z: f64,
}

impl Point2 {
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Lift the column to the given height.
    pub fn at_height(&self, y: f64) -> Point3 {
        Point3::new(self.x, y, self.z)
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Axis-aligned search volume with inclusive corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchBounds {
    pub lower: Point3,
    pub upper: Point3,
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            lower: Point3::new(-10.0, -10.0, -10.0),
            upper: Point3::new(10.0, 10.0, 10.0),
        }
    }
}

impl SearchBounds {
    pub fn new(lower: Point3, upper: Point3) -> Self {
        Self { lower, upper }
    }

    /// Reject non-finite or inverted corners. Zero extent is allowed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            check_axis(axis, self.lower.coord(axis), self.upper.coord(axis))?;
        }
        Ok(())
    }

    pub fn contains(&self, point: &Point3) -> bool {
        [Axis::X, Axis::Y, Axis::Z].iter().all(|&axis| {
            let value = point.coord(axis);
            value >= self.lower.coord(axis) && value <= self.upper.coord(axis)
        })
    }

    pub fn extent(&self, axis: Axis) -> f64 {
        self.upper.coord(axis) - self.lower.coord(axis)
    }

    /// Number of lattice points a grid run visits with these steps.
    /// Fails when the count does not fit in a `usize`.
    pub fn lattice_len(&self, step_plane: f64, step_height: f64) -> Result<usize, ConfigError> {
        lattice_product(&[
            (Axis::X, self.extent(Axis::X), step_plane),
            (Axis::Y, self.extent(Axis::Y), step_height),
            (Axis::Z, self.extent(Axis::Z), step_plane),
        ])
    }
}

/// Planar search area for column based searches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarBounds {
    pub lower: Point2,
    pub upper: Point2,
}

impl Default for PlanarBounds {
    fn default() -> Self {
        Self {
            lower: Point2::new(-10.0, -10.0),
            upper: Point2::new(10.0, 10.0),
        }
    }
}

impl PlanarBounds {
    pub fn new(lower: Point2, upper: Point2) -> Self {
        Self { lower, upper }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_axis(Axis::X, self.lower.x, self.upper.x)?;
        check_axis(Axis::Z, self.lower.z, self.upper.z)
    }

    pub fn lattice_len(&self, step: f64) -> Result<usize, ConfigError> {
        lattice_product(&[
            (Axis::X, self.upper.x - self.lower.x, step),
            (Axis::Z, self.upper.z - self.lower.z, step),
        ])
    }
}

fn check_axis(axis: Axis, lower: f64, upper: f64) -> Result<(), ConfigError> {
    if !lower.is_finite() || !upper.is_finite() {
        return Err(ConfigError::NonFiniteBound { axis });
    }
    if lower > upper {
        return Err(ConfigError::InvertedBounds { axis, lower, upper });
    }
    if !(upper - lower).is_finite() {
        return Err(ConfigError::InfiniteExtent { axis });
    }
    Ok(())
}

fn lattice_product(axes: &[(Axis, f64, f64)]) -> Result<usize, ConfigError> {
    axes.iter().try_fold(1usize, |total, &(axis, extent, step)| {
        axis_samples(extent, step)
            .and_then(|samples| total.checked_mul(samples))
            .ok_or(ConfigError::LatticeTooLarge { axis, step })
    })
}

/// Reject zero, negative or non-finite step sizes.
pub fn validate_step(axis: Axis, step: f64) -> Result<(), ConfigError> {
    if step.is_finite() && step > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveStep { axis, value: step })
    }
}

/// Inclusive sample count along one axis: `floor(extent / step) + 1`,
/// or `None` when it does not fit in a `usize`.
///
/// Callers validate `step > 0` and `extent >= 0` first.
pub fn axis_samples(extent: f64, step: f64) -> Option<usize> {
    let ratio = extent / step;
    let steps = (ratio + ratio.abs().max(1.0) * LATTICE_EPSILON).floor();
    if !steps.is_finite() || steps >= usize::MAX as f64 {
        return None;
    }
    (steps as usize).checked_add(1)
}

/// Lattice coordinates from `lower` towards `upper` in `step` increments.
///
/// Coordinates are computed from the index rather than accumulated, so
/// the last sample never drifts past `upper` and none is dropped. Yields
/// nothing for a lattice too large to count.
pub fn axis_values(lower: f64, upper: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = axis_samples(upper - lower, step).unwrap_or(0);
    (0..count).map(move |i| lower + i as f64 * step)
}
