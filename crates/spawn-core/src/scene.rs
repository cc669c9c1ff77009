//! In-memory scene oracle built from tagged axis-aligned boxes.
//!
//! Terrain, water and obstacles are all boxes; the body is a box of
//! fixed half-extents that is moved around by collision queries. All
//! probes are vertical, so every ray test reduces to a footprint check
//! plus an interval test on `y`.

use crate::error::OracleError;
use crate::geometry::{Point2, Point3};
use crate::oracle::{FeasibilityOracle, RayHit, Tag, TagSet};
use serde::{Deserialize, Serialize};

/// A tagged box in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub tag: Tag,
    pub min: Point3,
    pub max: Point3,
}

impl SceneObject {
    pub fn new(tag: impl Into<Tag>, min: Point3, max: Point3) -> Self {
        Self {
            tag: tag.into(),
            min,
            max,
        }
    }

    /// Box of full extents `size` centered on `center`.
    pub fn centered(tag: impl Into<Tag>, center: Point3, size: Point3) -> Self {
        let half = Point3::new(size.x / 2.0, size.y / 2.0, size.z / 2.0);
        Self::new(
            tag,
            Point3::new(center.x - half.x, center.y - half.y, center.z - half.z),
            Point3::new(center.x + half.x, center.y + half.y, center.z + half.z),
        )
    }

    /// Inclusive test on the ground-plane footprint.
    pub fn covers(&self, column: Point2) -> bool {
        column.x >= self.min.x
            && column.x <= self.max.x
            && column.z >= self.min.z
            && column.z <= self.max.z
    }

    /// Strict interior overlap; boxes sharing a face do not overlap.
    pub fn overlaps(&self, min: Point3, max: Point3) -> bool {
        self.min.x < max.x
            && self.max.x > min.x
            && self.min.y < max.y
            && self.max.y > min.y
            && self.min.z < max.z
            && self.max.z > min.z
    }
}

/// Box-shaped body placed by collision queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyShape {
    pub half_extents: Point3,
}

impl Default for BodyShape {
    fn default() -> Self {
        Self {
            half_extents: Point3::new(0.5, 0.5, 0.5),
        }
    }
}

/// Deterministic [`FeasibilityOracle`] over a list of boxes.
///
/// Objects whose tag is in `transparent` (water volumes by default) are
/// invisible to the aerial probe and to collision queries; only the
/// water and terrain probes see them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneOracle {
    #[serde(default)]
    pub body: BodyShape,
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    #[serde(default = "default_transparent")]
    pub transparent: TagSet,
    #[serde(skip)]
    body_position: Option<Point3>,
    #[serde(skip)]
    physics_steps: u64,
}

fn default_transparent() -> TagSet {
    ["Water"].into_iter().collect()
}

impl Default for SceneOracle {
    fn default() -> Self {
        Self {
            body: BodyShape::default(),
            objects: Vec::new(),
            transparent: default_transparent(),
            body_position: None,
            physics_steps: 0,
        }
    }
}

impl SceneOracle {
    pub fn new(body: BodyShape) -> Self {
        Self {
            body,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_object(mut self, object: SceneObject) -> Self {
        self.objects.push(object);
        self
    }

    pub fn extend<I: IntoIterator<Item = SceneObject>>(&mut self, objects: I) {
        self.objects.extend(objects);
    }

    /// Where the last collision query left the body.
    pub fn body_position(&self) -> Option<Point3> {
        self.body_position
    }

    /// Physics steps taken so far; one per collision query.
    pub fn physics_steps(&self) -> u64 {
        self.physics_steps
    }

    fn covering<'a>(
        &'a self,
        column: Point2,
        tag: Option<&'a Tag>,
    ) -> impl Iterator<Item = &'a SceneObject> + 'a {
        self.objects
            .iter()
            .filter(move |o| tag.map_or(true, |t| &o.tag == t) && o.covers(column))
    }
}

impl FeasibilityOracle for SceneOracle {
    fn aerial_clearance(
        &mut self,
        point: Point3,
        max_distance: f64,
        _ignored: &TagSet,
    ) -> Result<Option<RayHit>, OracleError> {
        if !point.is_finite() {
            return Err(OracleError::Unavailable {
                reason: format!("probe origin {point} is not finite"),
            });
        }
        let mut nearest: Option<RayHit> = None;
        for object in self.covering(point.column(), None) {
            if self.transparent.contains(&object.tag) {
                continue;
            }
            let distance = if point.y >= object.min.y && point.y <= object.max.y {
                0.0
            } else if object.max.y <= point.y {
                point.y - object.max.y
            } else {
                continue;
            };
            if distance > max_distance {
                continue;
            }
            if nearest.as_ref().map_or(true, |hit| distance < hit.distance) {
                nearest = Some(RayHit {
                    tag: object.tag.clone(),
                    distance,
                });
            }
        }
        Ok(nearest)
    }

    fn water_hits(
        &mut self,
        point: Point3,
        max_height: f64,
        water_tag: &Tag,
    ) -> Result<Vec<f64>, OracleError> {
        if point.y > max_height {
            return Ok(Vec::new());
        }
        Ok(self
            .covering(point.column(), Some(water_tag))
            .filter(|o| o.max.y >= point.y && o.min.y <= max_height)
            .map(|o| o.max.y.min(max_height))
            .collect())
    }

    fn terrain_hits(
        &mut self,
        column: Point2,
        max_height: f64,
        min_depth: f64,
        terrain_tag: &Tag,
    ) -> Result<Vec<f64>, OracleError> {
        let mut heights: Vec<f64> = self
            .covering(column, Some(terrain_tag))
            .map(|o| o.max.y)
            .filter(|&top| top >= min_depth && top <= max_height)
            .collect();
        heights.sort_by(|a, b| b.total_cmp(a));
        Ok(heights)
    }

    fn collision_at(&mut self, placement: Point3) -> Result<bool, OracleError> {
        if !placement.is_finite() {
            return Err(OracleError::BodyPlacement {
                reason: format!("placement {placement} is not finite"),
            });
        }
        self.body_position = Some(placement);
        self.physics_steps += 1;

        let h = self.body.half_extents;
        let min = Point3::new(placement.x - h.x, placement.y - h.y, placement.z - h.z);
        let max = Point3::new(placement.x + h.x, placement.y + h.y, placement.z + h.z);
        Ok(self
            .objects
            .iter()
            .any(|o| !self.transparent.contains(&o.tag) && o.overlaps(min, max)))
    }
}

/// Regular `nx * ny * nz` lattice of obstacle boxes starting at `origin`,
/// as used to build benchmark environments.
pub fn obstacle_lattice(
    origin: Point3,
    counts: [usize; 3],
    spacing: f64,
    size: Point3,
    tag: &Tag,
) -> Vec<SceneObject> {
    let [nx, ny, nz] = counts;
    let mut boxes = Vec::with_capacity(nx * ny * nz);
    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                let center = Point3::new(
                    origin.x + i as f64 * spacing,
                    origin.y + j as f64 * spacing,
                    origin.z + k as f64 * spacing,
                );
                boxes.push(SceneObject::centered(tag.clone(), center, size));
            }
        }
    }
    boxes
}
