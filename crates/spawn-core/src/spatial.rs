//! Sorted-list spatial index for minimum-distance pruning.
//!
//! Points are kept ordered by one primary axis. Range lookups binary
//! search that axis for a window of candidates, and the caller (or
//! [`SortedAxisIndex::any_within`]) performs the exact distance test on
//! the window. Many points sharing a primary coordinate degrade the
//! lookup to a linear scan.

use crate::geometry::{Axis, Point3};
use std::ops::Range;

#[derive(Debug, Clone)]
pub struct SortedAxisIndex {
    axis: Axis,
    points: Vec<Point3>,
}

impl Default for SortedAxisIndex {
    fn default() -> Self {
        Self::new(Axis::X)
    }
}

impl SortedAxisIndex {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            points: Vec::new(),
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Stored points in ascending primary-axis order.
    pub fn as_slice(&self) -> &[Point3] {
        &self.points
    }

    /// First position whose primary coordinate is not below `key`.
    ///
    /// On an exact miss this is where `key` would be inserted, i.e. the
    /// neighbour just above it.
    pub fn lower_bound(&self, key: f64) -> usize {
        let axis = self.axis;
        self.points.partition_point(|p| p.coord(axis) < key)
    }

    /// First position whose primary coordinate is above `key`.
    pub fn upper_bound(&self, key: f64) -> usize {
        let axis = self.axis;
        self.points.partition_point(|p| p.coord(axis) <= key)
    }

    /// Insert keeping the order; equal keys go after the existing ones.
    pub fn insert(&mut self, point: Point3) {
        let at = self.upper_bound(point.coord(self.axis));
        self.points.insert(at, point);
    }

    /// Index window of every point whose primary coordinate lies in
    /// `[low, high]`. Empty when `low > high`.
    pub fn range(&self, low: f64, high: f64) -> Range<usize> {
        if low > high {
            return 0..0;
        }
        let start = self.lower_bound(low);
        let end = self.upper_bound(high).max(start);
        start..end
    }

    /// Points whose primary coordinate lies in `[low, high]`.
    pub fn window(&self, low: f64, high: f64) -> &[Point3] {
        &self.points[self.range(low, high)]
    }

    /// Whether any stored point is strictly closer than `radius`.
    pub fn any_within(&self, point: &Point3, radius: f64) -> bool {
        let center = point.coord(self.axis);
        let radius_sq = radius * radius;
        self.window(center - radius, center + radius)
            .iter()
            .any(|other| other.distance_squared(point) < radius_sq)
    }
}
