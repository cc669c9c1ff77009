//! Spawn CLI - Command line tools for spawn location searches.
//!
//! This crate provides the search binaries:
//! - grid_search: exhaustive 3D lattice search, optionally swept over step sizes
//! - planar_search: column search over terrain layers
//! - random_search: rejection sampling, optionally repeated
//! - generate_scene: benchmark scene with a lattice of obstacle boxes

pub mod logging;
pub mod output;
pub mod settings;

pub use settings::{load_config, load_scene, Settings};
