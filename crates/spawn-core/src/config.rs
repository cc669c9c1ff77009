//! Run configuration loaded from JSON.
//!
//! Every section and field is optional; missing values fall back to the
//! defaults of the corresponding parameter struct.

use crate::classifier::{ClassifierSettings, PlanarSettings};
use crate::error::ConfigError;
use crate::geometry::{validate_step, Axis, PlanarBounds, SearchBounds};
use crate::grid::GridParams;
use crate::random::RandomSearchParams;
use crate::sweep::StepSweep;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanarSearchConfig {
    pub bounds: PlanarBounds,
    pub step: f64,
    #[serde(flatten)]
    pub settings: PlanarSettings,
}

impl Default for PlanarSearchConfig {
    fn default() -> Self {
        Self {
            bounds: PlanarBounds::default(),
            step: 0.5,
            settings: PlanarSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomSearchConfig {
    #[serde(flatten)]
    pub params: RandomSearchParams,
    /// RNG seed; a fresh seed is drawn when absent
    pub seed: Option<u64>,
    /// Independent repetitions of the search
    pub repeats: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub bounds: SearchBounds,
    pub classifier: ClassifierSettings,
    pub grid: GridParams,
    pub planar: PlanarSearchConfig,
    pub random: RandomSearchConfig,
    pub sweep: StepSweep,
}

impl SearchConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check every section. The sweep is only checked when it asks for
    /// more than one run, since single runs use the grid steps.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate()?;
        self.classifier.validate()?;
        validate_step(Axis::X, self.grid.step_plane)?;
        validate_step(Axis::Y, self.grid.step_height)?;
        self.planar.bounds.validate()?;
        validate_step(Axis::X, self.planar.step)?;
        self.planar.settings.validate()?;
        self.random.params.validate()?;
        if self.sweep.runs > 1 {
            self.sweep.validate()?;
        }
        Ok(())
    }

    /// Repetitions of the random search, at least one.
    pub fn random_repeats(&self) -> usize {
        self.random.repeats.max(1)
    }
}
