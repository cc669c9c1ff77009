//! Rejection-sampling search bounded by a failure budget.

use crate::classifier::Classifier;
use crate::error::{ConfigError, SearchError};
use crate::geometry::{Axis, Point3, SearchBounds};
use crate::models::{ClassifiedPoint, Label, RandomRunResult, ResultSets};
use crate::oracle::FeasibilityOracle;
use crate::spatial::SortedAxisIndex;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomSearchParams {
    /// Valid locations to find before stopping
    pub target_count: usize,
    /// Consecutive failures tolerated before giving up
    pub max_failed_attempts: usize,
    /// Minimum separation from every previously checked location
    pub min_distance: f64,
    pub enforce_min_distance: bool,
}

impl Default for RandomSearchParams {
    fn default() -> Self {
        Self {
            target_count: 50,
            max_failed_attempts: 10_000,
            min_distance: 0.5,
            enforce_min_distance: true,
        }
    }
}

impl RandomSearchParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_count == 0 {
            return Err(ConfigError::NonPositiveTarget);
        }
        if self.max_failed_attempts == 0 {
            return Err(ConfigError::NonPositiveBudget);
        }
        if self.enforce_min_distance
            && !(self.min_distance.is_finite() && self.min_distance >= 0.0)
        {
            return Err(ConfigError::NegativeDistance(self.min_distance));
        }
        Ok(())
    }
}

/// Draw uniform candidates until `target_count` valid locations are found
/// or `max_failed_attempts` consecutive candidates fail.
///
/// With distance enforcement, a candidate strictly closer than
/// `min_distance` to any previously checked location is discarded
/// without an oracle call and counts as a failure. Every classified
/// candidate is indexed, whatever its label.
///
/// Running out of budget is not an error; compare
/// [`RandomRunResult::found`] to the target or use
/// [`RandomRunResult::termination`].
pub fn run_random_search<O, R>(
    oracle: &mut O,
    classifier: &Classifier,
    bounds: &SearchBounds,
    params: RandomSearchParams,
    rng: &mut R,
) -> Result<RandomRunResult, SearchError>
where
    O: FeasibilityOracle + ?Sized,
    R: Rng,
{
    params.validate()?;
    bounds.validate()?;

    let started = Instant::now();
    let mut sets = ResultSets::new();
    let mut index = SortedAxisIndex::new(Axis::X);
    let mut discovery_times = Vec::new();

    let mut found = 0usize;
    let mut failures = 0usize;
    let mut attempts = 0usize;
    let mut checked = 0usize;
    let mut rejected_too_close = 0usize;

    while found < params.target_count && failures < params.max_failed_attempts {
        let point = sample_uniform(bounds, rng);
        attempts += 1;

        if params.enforce_min_distance && index.any_within(&point, params.min_distance) {
            rejected_too_close += 1;
            failures += 1;
            continue;
        }

        let classification = classifier.classify(oracle, point)?;
        checked += 1;
        if params.enforce_min_distance {
            index.insert(point);
        }

        let mut classified = ClassifiedPoint::new(point, classification);
        if classification.label == Label::Valid {
            let seconds = started.elapsed().as_secs_f64();
            classified = classified.with_discovery_time(seconds);
            discovery_times.push(seconds);
            found += 1;
            failures = 0;
        } else {
            failures += 1;
        }
        sets.record(classified);
    }

    let elapsed = started.elapsed();
    let result = RandomRunResult {
        sets,
        target_count: params.target_count,
        attempts,
        checked,
        rejected_too_close,
        consecutive_failures: failures,
        discovery_times,
        elapsed,
    };

    if found < params.target_count {
        tracing::warn!(
            "Random search gave up after {} consecutive failures: found {}/{}",
            failures,
            found,
            params.target_count
        );
    } else {
        tracing::debug!(
            "Random search found {} locations in {:?} ({} checked, {} too close)",
            found,
            elapsed,
            checked,
            rejected_too_close
        );
    }

    Ok(result)
}

/// Independent uniform draw per axis. Zero-extent axes return the bound.
fn sample_uniform<R: Rng>(bounds: &SearchBounds, rng: &mut R) -> Point3 {
    let (lo, hi) = (bounds.lower, bounds.upper);
    Point3::new(
        rng.random_range(lo.x..=hi.x),
        rng.random_range(lo.y..=hi.y),
        rng.random_range(lo.z..=hi.z),
    )
}
