//! Feasibility classification of candidate locations.
//!
//! The point pipeline short-circuits from the cheapest rejection to the
//! most expensive one: aerial probe, then water probe, then the full body
//! collision query.

use crate::error::{ConfigError, OracleError};
use crate::geometry::{Point2, Point3};
use crate::models::{Classification, ClassifiedPoint, Reason};
use crate::oracle::{FeasibilityOracle, Tag, TagSet};
use serde::{Deserialize, Serialize};

/// Parameters of the point classification pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Maximum distance to ground below a candidate
    pub check_height: f64,
    /// Highest water surface in the scene
    pub max_water_height: f64,
    /// Tags the aerial probe accepts as ground
    pub ignored_tags: TagSet,
    pub water_tag: Tag,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            check_height: 1.5,
            max_water_height: 100.0,
            ignored_tags: ["Robot", "Terrain"].into_iter().collect(),
            water_tag: Tag::new("Water"),
        }
    }
}

impl ClassifierSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.check_height.is_finite() && self.check_height > 0.0) {
            return Err(ConfigError::NonPositiveCheckHeight(self.check_height));
        }
        if self.water_tag.is_empty() {
            return Err(ConfigError::EmptyTag("water"));
        }
        Ok(())
    }
}

/// Vertical ray span and placement offset for column searches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanarSettings {
    /// Ray origin height
    pub ray_top: f64,
    /// Lowest height the ray reaches
    pub ray_bottom: f64,
    /// Height above a terrain hit at which the body is tested
    pub y_offset: f64,
    pub terrain_tag: Tag,
}

impl Default for PlanarSettings {
    fn default() -> Self {
        Self {
            ray_top: 10.0,
            ray_bottom: -10.0,
            y_offset: 0.5,
            terrain_tag: Tag::new("Terrain"),
        }
    }
}

impl PlanarSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.ray_top.is_finite() && self.ray_bottom.is_finite())
            || self.ray_top <= self.ray_bottom
        {
            return Err(ConfigError::EmptyRaySpan {
                top: self.ray_top,
                bottom: self.ray_bottom,
            });
        }
        if self.terrain_tag.is_empty() {
            return Err(ConfigError::EmptyTag("terrain"));
        }
        Ok(())
    }
}

/// Labels candidates as valid, invalid or air using an oracle.
#[derive(Debug, Clone)]
pub struct Classifier {
    settings: ClassifierSettings,
}

impl Classifier {
    pub fn new(settings: ClassifierSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &ClassifierSettings {
        &self.settings
    }

    /// Classify a single location.
    ///
    /// A location counts as grounded only when the nearest surface below
    /// it, within `check_height`, carries an ignored tag. Landing on any
    /// other object is treated the same as hanging in the air.
    pub fn classify<O>(&self, oracle: &mut O, point: Point3) -> Result<Classification, OracleError>
    where
        O: FeasibilityOracle + ?Sized,
    {
        let s = &self.settings;

        let hit = oracle.aerial_clearance(point, s.check_height, &s.ignored_tags)?;
        let grounded = hit
            .as_ref()
            .is_some_and(|hit| hit.distance <= s.check_height && s.ignored_tags.contains(&hit.tag));
        if !grounded {
            return Ok(Reason::NoGround.into());
        }

        let water = oracle.water_hits(point, s.max_water_height, &s.water_tag)?;
        if water
            .iter()
            .any(|&height| height >= point.y && height <= s.max_water_height)
        {
            return Ok(Reason::Submerged.into());
        }

        if oracle.collision_at(point)? {
            Ok(Reason::Collision.into())
        } else {
            Ok(Reason::Clear.into())
        }
    }

    /// Classify every terrain layer of a vertical column.
    ///
    /// Layers are visited from the highest down. A layer at or below the
    /// highest water surface is submerged; any other layer is tested with
    /// the body lifted `y_offset` above it. A column without terrain
    /// yields nothing.
    pub fn classify_column<O>(
        &self,
        oracle: &mut O,
        column: Point2,
        planar: &PlanarSettings,
    ) -> Result<Vec<ClassifiedPoint>, OracleError>
    where
        O: FeasibilityOracle + ?Sized,
    {
        let mut terrain = oracle.terrain_hits(
            column,
            planar.ray_top,
            planar.ray_bottom,
            &planar.terrain_tag,
        )?;
        if terrain.is_empty() {
            return Ok(Vec::new());
        }
        terrain.sort_by(|a, b| b.total_cmp(a));

        let water_top = oracle
            .water_hits(
                column.at_height(planar.ray_bottom),
                planar.ray_top,
                &self.settings.water_tag,
            )?
            .into_iter()
            .reduce(f64::max);

        let mut out = Vec::with_capacity(terrain.len());
        for ground in terrain {
            let placement = column.at_height(ground + planar.y_offset);
            let reason = if water_top.is_some_and(|water| water >= ground) {
                Reason::Submerged
            } else if oracle.collision_at(placement)? {
                Reason::Collision
            } else {
                Reason::Clear
            };
            out.push(ClassifiedPoint::new(placement, reason.into()));
        }
        Ok(out)
    }
}
