//! Environment settings and file-backed inputs.

use anyhow::{bail, Context, Result};
use spawn_core::{SceneOracle, SearchConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Settings {
    /// Root directory for result files
    pub results_dir: PathBuf,
    /// Scene used when no `--scene` flag is given
    pub scene_path: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            results_dir: env::var("SPAWN_RESULTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("results")),
            scene_path: env::var("SPAWN_SCENE").ok().map(PathBuf::from),
        }
    }

    /// Pick the scene from the flag first, then the environment.
    pub fn resolve_scene<'a>(&'a self, flag: Option<&'a Path>) -> Result<&'a Path> {
        match flag.or(self.scene_path.as_deref()) {
            Some(path) => Ok(path),
            None => bail!("no scene given; pass --scene or set SPAWN_SCENE"),
        }
    }
}

/// Read a search configuration, or the defaults when no file is given.
/// The result is validated either way.
pub fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    let config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            SearchConfig::from_json(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SearchConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

pub fn load_scene(path: &Path) -> Result<SceneOracle> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading scene {}", path.display()))?;
    let scene = SceneOracle::from_json(&raw)
        .with_context(|| format!("parsing scene {}", path.display()))?;
    tracing::info!(
        "Loaded scene {} with {} objects",
        path.display(),
        scene.objects.len()
    );
    Ok(scene)
}
