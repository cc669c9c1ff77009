//! Error types for search configuration and oracle failures.

use crate::geometry::Axis;
use thiserror::Error;

/// Invalid search parameters, detected before a run touches the oracle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("step size along {axis} must be positive, got {value}")]
    NonPositiveStep { axis: Axis, value: f64 },
    #[error("bounds along {axis} are inverted: lower {lower} > upper {upper}")]
    InvertedBounds { axis: Axis, lower: f64, upper: f64 },
    #[error("bounds along {axis} are not finite")]
    NonFiniteBound { axis: Axis },
    #[error("extent along {axis} overflows")]
    InfiniteExtent { axis: Axis },
    #[error("lattice with step {step} along {axis} has too many points")]
    LatticeTooLarge { axis: Axis, step: f64 },
    #[error("target count must be at least 1")]
    NonPositiveTarget,
    #[error("failure budget must be at least 1")]
    NonPositiveBudget,
    #[error("minimum distance must be finite and non-negative, got {0}")]
    NegativeDistance(f64),
    #[error("check height must be finite and positive, got {0}")]
    NonPositiveCheckHeight(f64),
    #[error("ray span is empty: top {top} must be above bottom {bottom}")]
    EmptyRaySpan { top: f64, bottom: f64 },
    #[error("invalid sweep: {reason}")]
    InvalidSweep { reason: String },
    #[error("{0} tag must not be empty")]
    EmptyTag(&'static str),
}

/// Failure reported by the feasibility oracle. Aborts the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OracleError {
    #[error("body could not be placed: {reason}")]
    BodyPlacement { reason: String },
    #[error("ray query unavailable: {reason}")]
    Unavailable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),
}
