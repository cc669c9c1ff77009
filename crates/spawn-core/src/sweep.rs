//! Multi-run orchestration: step-size sweeps and repeated random runs.
//!
//! Every run gets fresh result sets (and, for random runs, a fresh
//! spatial index); the report keeps only the aggregated counts and
//! timings.

use crate::classifier::{Classifier, PlanarSettings};
use crate::error::{ConfigError, SearchError};
use crate::geometry::{PlanarBounds, SearchBounds};
use crate::grid::{run_grid_search, run_planar_search, GridParams};
use crate::models::{RandomTermination, RunCounts};
use crate::oracle::FeasibilityOracle;
use crate::random::{run_random_search, RandomSearchParams};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Linear sweep of step sizes from `min_step` to `max_step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepSweep {
    pub min_step: f64,
    pub max_step: f64,
    /// Number of runs; a single run uses `min_step`
    pub runs: usize,
}

impl Default for StepSweep {
    fn default() -> Self {
        Self {
            min_step: 0.1,
            max_step: 1.0,
            runs: 1,
        }
    }
}

impl StepSweep {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runs == 0 {
            return Err(ConfigError::InvalidSweep {
                reason: "at least one run is required".to_string(),
            });
        }
        if !(self.min_step.is_finite() && self.min_step > 0.0) {
            return Err(ConfigError::InvalidSweep {
                reason: format!("minimum step must be positive, got {}", self.min_step),
            });
        }
        if !self.max_step.is_finite() || self.max_step < self.min_step {
            return Err(ConfigError::InvalidSweep {
                reason: format!(
                    "maximum step {} is below minimum step {}",
                    self.max_step, self.min_step
                ),
            });
        }
        Ok(())
    }

    /// Step size of every run, evenly spaced and ending on `max_step`.
    pub fn steps(&self) -> Vec<f64> {
        if self.runs <= 1 {
            return vec![self.min_step];
        }
        let increment = (self.max_step - self.min_step) / (self.runs - 1) as f64;
        (0..self.runs)
            .map(|i| {
                if i + 1 == self.runs {
                    self.max_step
                } else {
                    self.min_step + i as f64 * increment
                }
            })
            .collect()
    }
}

/// One run of a step sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub step: f64,
    /// Points (3D) or columns (planar) the bounds hold at this step
    pub expected: usize,
    pub visited: usize,
    pub counts: RunCounts,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub rows: Vec<SweepRow>,
}

impl SweepReport {
    pub fn total_elapsed(&self) -> Duration {
        self.rows.iter().map(|row| row.elapsed).sum()
    }
}

/// Run the 3D grid search once per sweep step, using the step on every axis.
pub fn run_grid_sweep<O>(
    oracle: &mut O,
    classifier: &Classifier,
    bounds: &SearchBounds,
    sweep: &StepSweep,
) -> Result<SweepReport, SearchError>
where
    O: FeasibilityOracle + ?Sized,
{
    sweep.validate()?;
    bounds.validate()?;

    let mut report = SweepReport::default();
    for step in sweep.steps() {
        let result = run_grid_search(oracle, classifier, bounds, GridParams::uniform(step))?;
        let row = SweepRow {
            step,
            expected: bounds.lattice_len(step, step)?,
            visited: result.visited,
            counts: result.sets.counts(),
            elapsed: result.elapsed,
        };
        log_row("grid", &row);
        report.rows.push(row);
    }
    Ok(report)
}

/// Run the planar search once per sweep step.
pub fn run_planar_sweep<O>(
    oracle: &mut O,
    classifier: &Classifier,
    bounds: &PlanarBounds,
    sweep: &StepSweep,
    planar: &PlanarSettings,
) -> Result<SweepReport, SearchError>
where
    O: FeasibilityOracle + ?Sized,
{
    sweep.validate()?;
    bounds.validate()?;

    let mut report = SweepReport::default();
    for step in sweep.steps() {
        let result = run_planar_search(oracle, classifier, bounds, step, planar)?;
        let row = SweepRow {
            step,
            expected: bounds.lattice_len(step)?,
            visited: result.columns,
            counts: result.sets.counts(),
            elapsed: result.elapsed,
        };
        log_row("planar", &row);
        report.rows.push(row);
    }
    Ok(report)
}

fn log_row(kind: &str, row: &SweepRow) {
    tracing::info!(
        "{} sweep step {:.2}: {} visited, {} valid, {} invalid, {} air in {:?}",
        kind,
        row.step,
        row.visited,
        row.counts.valid,
        row.counts.invalid,
        row.counts.air,
        row.elapsed
    );
}

/// One run of a repeated random search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomRepeat {
    pub found: usize,
    pub checked: usize,
    pub attempts: usize,
    pub termination: RandomTermination,
    pub discovery_times: Vec<f64>,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RandomRepeatReport {
    pub target_count: usize,
    pub runs: Vec<RandomRepeat>,
}

impl RandomRepeatReport {
    /// Runs that reached the target count.
    pub fn successes(&self) -> usize {
        self.runs
            .iter()
            .filter(|run| run.termination == RandomTermination::TargetReached)
            .count()
    }
}

/// Repeat the random search `runs` times with independent state.
pub fn run_random_repeats<O, R>(
    oracle: &mut O,
    classifier: &Classifier,
    bounds: &SearchBounds,
    params: RandomSearchParams,
    runs: usize,
    rng: &mut R,
) -> Result<RandomRepeatReport, SearchError>
where
    O: FeasibilityOracle + ?Sized,
    R: Rng,
{
    if runs == 0 {
        return Err(ConfigError::InvalidSweep {
            reason: "at least one run is required".to_string(),
        }
        .into());
    }

    let mut report = RandomRepeatReport {
        target_count: params.target_count,
        runs: Vec::with_capacity(runs),
    };
    for run in 0..runs {
        let result = run_random_search(oracle, classifier, bounds, params, rng)?;
        tracing::info!(
            "random run {}/{}: found {}/{} in {:?}",
            run + 1,
            runs,
            result.found(),
            params.target_count,
            result.elapsed
        );
        report.runs.push(RandomRepeat {
            found: result.found(),
            checked: result.checked,
            attempts: result.attempts,
            termination: result.termination(),
            discovery_times: result.discovery_times,
            elapsed: result.elapsed,
        });
    }
    Ok(report)
}
