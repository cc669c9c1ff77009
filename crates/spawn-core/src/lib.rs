pub mod classifier;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod models;
pub mod oracle;
pub mod random;
pub mod scene;
pub mod spatial;
pub mod sweep;

pub use classifier::{Classifier, ClassifierSettings, PlanarSettings};
pub use config::{PlanarSearchConfig, RandomSearchConfig, SearchConfig};
pub use error::{ConfigError, OracleError, SearchError};
pub use geometry::{axis_samples, axis_values, Axis, PlanarBounds, Point2, Point3, SearchBounds};
pub use grid::{run_grid_search, run_planar_search, GridParams};
pub use models::{
    Classification, ClassifiedPoint, GridRunResult, Label, PlanarRunResult, RandomRunResult,
    RandomTermination, Reason, ResultSets, RunCounts,
};
pub use oracle::{FeasibilityOracle, RayHit, Tag, TagSet};
pub use random::{run_random_search, RandomSearchParams};
pub use scene::{obstacle_lattice, BodyShape, SceneObject, SceneOracle};
pub use spatial::SortedAxisIndex;
pub use sweep::{
    run_grid_sweep, run_planar_sweep, run_random_repeats, RandomRepeat, RandomRepeatReport,
    StepSweep, SweepReport, SweepRow,
};
