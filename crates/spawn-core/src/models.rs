//! Classification labels and per-run result models.

use crate::geometry::Point3;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome category of a candidate location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Grounded, dry and collision free
    Valid,
    /// Submerged or colliding
    Invalid,
    /// No ground within the check height
    Air,
}

/// Why a candidate received its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Clear,
    NoGround,
    Submerged,
    Collision,
}

impl Reason {
    pub fn label(self) -> Label {
        match self {
            Reason::Clear => Label::Valid,
            Reason::NoGround => Label::Air,
            Reason::Submerged | Reason::Collision => Label::Invalid,
        }
    }
}

/// Result of classifying one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub label: Label,
    pub reason: Reason,
}

impl From<Reason> for Classification {
    fn from(reason: Reason) -> Self {
        Self {
            label: reason.label(),
            reason,
        }
    }
}

/// A classified location. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedPoint {
    pub point: Point3,
    pub label: Label,
    pub reason: Reason,
    /// Seconds since run start at which a valid random sample was found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_at_s: Option<f64>,
}

impl ClassifiedPoint {
    pub fn new(point: Point3, classification: Classification) -> Self {
        Self {
            point,
            label: classification.label,
            reason: classification.reason,
            found_at_s: None,
        }
    }

    pub fn with_discovery_time(mut self, seconds: f64) -> Self {
        self.found_at_s = Some(seconds);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounts {
    pub valid: usize,
    pub invalid: usize,
    pub air: usize,
    /// Invalid because of water above the location
    pub submerged: usize,
    /// Invalid because the body overlapped a collider
    pub collisions: usize,
}

impl RunCounts {
    pub fn total(&self) -> usize {
        self.valid + self.invalid + self.air
    }
}

/// Valid, invalid and air result sets of a single run.
///
/// Each point lands in exactly one set, and the counters move together
/// with the sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSets {
    valid: Vec<ClassifiedPoint>,
    invalid: Vec<ClassifiedPoint>,
    air: Vec<ClassifiedPoint>,
    counts: RunCounts,
}

impl ResultSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, point: ClassifiedPoint) {
        match point.reason {
            Reason::Submerged => self.counts.submerged += 1,
            Reason::Collision => self.counts.collisions += 1,
            Reason::Clear | Reason::NoGround => {}
        }
        match point.label {
            Label::Valid => {
                self.counts.valid += 1;
                self.valid.push(point);
            }
            Label::Invalid => {
                self.counts.invalid += 1;
                self.invalid.push(point);
            }
            Label::Air => {
                self.counts.air += 1;
                self.air.push(point);
            }
        }
    }

    pub fn counts(&self) -> RunCounts {
        self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.total()
    }

    pub fn valid(&self) -> &[ClassifiedPoint] {
        &self.valid
    }

    pub fn invalid(&self) -> &[ClassifiedPoint] {
        &self.invalid
    }

    pub fn air(&self) -> &[ClassifiedPoint] {
        &self.air
    }

    pub fn points(&self, label: Label) -> &[ClassifiedPoint] {
        match label {
            Label::Valid => &self.valid,
            Label::Invalid => &self.invalid,
            Label::Air => &self.air,
        }
    }
}

/// Result of an exhaustive 3D lattice search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRunResult {
    pub sets: ResultSets,
    /// Lattice points classified
    pub visited: usize,
    pub elapsed: Duration,
}

/// Result of a column-by-column ground search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanarRunResult {
    pub sets: ResultSets,
    /// Columns probed; each yields one point per terrain layer
    pub columns: usize,
    pub elapsed: Duration,
}

/// How a random run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomTermination {
    TargetReached,
    BudgetExhausted,
}

/// Result of a rejection-sampling search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomRunResult {
    pub sets: ResultSets,
    pub target_count: usize,
    /// Candidates drawn, including the ones rejected as too close
    pub attempts: usize,
    /// Candidates sent to the oracle
    pub checked: usize,
    pub rejected_too_close: usize,
    /// Failure streak at loop exit
    pub consecutive_failures: usize,
    /// Discovery time of each valid sample, in seconds since run start
    pub discovery_times: Vec<f64>,
    pub elapsed: Duration,
}

impl RandomRunResult {
    pub fn found(&self) -> usize {
        self.sets.valid().len()
    }

    pub fn termination(&self) -> RandomTermination {
        if self.found() >= self.target_count {
            RandomTermination::TargetReached
        } else {
            RandomTermination::BudgetExhausted
        }
    }
}
