//! Interface to the physics/ray-casting backend that answers feasibility
//! queries.
//!
//! The search strategies never inspect a scene directly. Everything they
//! know about the world comes through [`FeasibilityOracle`], which keeps
//! the engine testable against scripted oracles and lets callers plug in
//! any collision backend.

use crate::error::OracleError;
use crate::geometry::{Point2, Point3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Opaque label attached to scene elements ("Terrain", "Water", ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Ordered set of tags, such as the ones the aerial probe accepts as ground.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<Tag>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.0.contains(tag)
    }

    pub fn insert(&mut self, tag: Tag) -> bool {
        self.0.insert(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }
}

impl<T: Into<Tag>> FromIterator<T> for TagSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Nearest surface hit by a probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub tag: Tag,
    /// Distance from the probe origin to the surface.
    pub distance: f64,
}

/// Collision and ray queries needed by the search strategies.
///
/// Implementations are typically backed by a single stateful physics
/// world, hence `&mut self`: one oracle serves one run at a time.
pub trait FeasibilityOracle {
    /// Probe straight down from `point` for at most `max_distance`.
    ///
    /// Returns the nearest hit, or `None` when nothing lies within reach.
    /// `ignored` is passed through for backends that filter hits.
    fn aerial_clearance(
        &mut self,
        point: Point3,
        max_distance: f64,
        ignored: &TagSet,
    ) -> Result<Option<RayHit>, OracleError>;

    /// Heights of every `water_tag` surface over `point` between
    /// `point.y` and `max_height`.
    fn water_hits(
        &mut self,
        point: Point3,
        max_height: f64,
        water_tag: &Tag,
    ) -> Result<Vec<f64>, OracleError>;

    /// Heights of every `terrain_tag` surface crossed by a vertical ray
    /// over `column` from `max_height` down to `min_depth`.
    fn terrain_hits(
        &mut self,
        column: Point2,
        max_height: f64,
        min_depth: f64,
        terrain_tag: &Tag,
    ) -> Result<Vec<f64>, OracleError>;

    /// Move the body to `placement`, advance the physics state by exactly
    /// one step, then report whether the body overlaps any collider.
    fn collision_at(&mut self, placement: Point3) -> Result<bool, OracleError>;
}

impl<O: FeasibilityOracle + ?Sized> FeasibilityOracle for &mut O {
    fn aerial_clearance(
        &mut self,
        point: Point3,
        max_distance: f64,
        ignored: &TagSet,
    ) -> Result<Option<RayHit>, OracleError> {
        (**self).aerial_clearance(point, max_distance, ignored)
    }

    fn water_hits(
        &mut self,
        point: Point3,
        max_height: f64,
        water_tag: &Tag,
    ) -> Result<Vec<f64>, OracleError> {
        (**self).water_hits(point, max_height, water_tag)
    }

    fn terrain_hits(
        &mut self,
        column: Point2,
        max_height: f64,
        min_depth: f64,
        terrain_tag: &Tag,
    ) -> Result<Vec<f64>, OracleError> {
        (**self).terrain_hits(column, max_height, min_depth, terrain_tag)
    }

    fn collision_at(&mut self, placement: Point3) -> Result<bool, OracleError> {
        (**self).collision_at(placement)
    }
}
