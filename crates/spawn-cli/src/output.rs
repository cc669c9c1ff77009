//! Result files written after each search.
//!
//! Layout: `<results_dir>/<strategy>/<environment>/<test>/`, one text file
//! per point set plus a human readable `Stats.txt`.

use anyhow::{Context, Result};
use chrono::Utc;
use spawn_core::{
    ClassifiedPoint, GridParams, GridRunResult, PlanarBounds, PlanarRunResult, RandomRepeatReport,
    RandomRunResult, RandomSearchParams, ResultSets, SearchBounds, SweepReport,
};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Grid,
    Planar,
    Random,
}

impl Strategy {
    pub fn dir_name(self) -> &'static str {
        match self {
            Strategy::Grid => "3D_Search",
            Strategy::Planar => "2D_Search",
            Strategy::Random => "Random_Search",
        }
    }
}

/// Directory for one test, created if missing. Multi-run tests get their
/// own `MultiRun_Test_<n>` folder so they never clobber single runs.
pub fn test_dir(
    results_dir: &Path,
    strategy: Strategy,
    environment: &str,
    test: u32,
    multi_run: bool,
) -> Result<PathBuf> {
    let name = if multi_run {
        format!("MultiRun_Test_{test}")
    } else {
        format!("Test_{test}")
    };
    let dir = results_dir
        .join(strategy.dir_name())
        .join(environment)
        .join(name);
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(dir)
}

fn write_file(dir: &Path, name: &str, contents: &str) -> Result<()> {
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))
}

fn location_lines(points: &[ClassifiedPoint]) -> Result<String> {
    let mut out = String::new();
    for p in points {
        writeln!(out, "{}, {}, {}", p.point.x, p.point.y, p.point.z)?;
    }
    Ok(out)
}

/// `Valid_Locations.txt`, `Invalid_Locations.txt` and `Air_Locations.txt`.
pub fn write_locations(dir: &Path, sets: &ResultSets) -> Result<()> {
    write_file(dir, "Valid_Locations.txt", &location_lines(sets.valid())?)?;
    write_file(dir, "Invalid_Locations.txt", &location_lines(sets.invalid())?)?;
    write_file(dir, "Air_Locations.txt", &location_lines(sets.air())?)
}

fn seconds(d: Duration) -> String {
    format!("{:.3}", d.as_secs_f64())
}

fn push_counts(out: &mut String, sets: &ResultSets) -> std::fmt::Result {
    let counts = sets.counts();
    writeln!(out, "Nr. of VALID Spawns = {}", counts.valid)?;
    writeln!(
        out,
        "Nr. of INVALID Spawns = {} ({} submerged, {} colliding)",
        counts.invalid, counts.submerged, counts.collisions
    )?;
    writeln!(out, "Nr. of AIR Spawns = {}", counts.air)
}

pub fn grid_stats(bounds: &SearchBounds, params: GridParams, result: &GridRunResult) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Area Searched From: {} m to: {} m", bounds.lower, bounds.upper)?;
    writeln!(out, "Step-size in X-Z Dimension: {} m", params.step_plane)?;
    writeln!(out, "Step-size in Y Dimension: {} m", params.step_height)?;
    writeln!(out, "Number of Checked Locations: {}", result.visited)?;
    push_counts(&mut out, &result.sets)?;
    writeln!(out, "Time for Calculations = {} s", seconds(result.elapsed))?;
    writeln!(out, "Generated: {}", Utc::now().to_rfc3339())?;
    Ok(out)
}

pub fn planar_stats(bounds: &PlanarBounds, step: f64, result: &PlanarRunResult) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Area Searched From: {} m to: {} m", bounds.lower, bounds.upper)?;
    writeln!(out, "Step-size in X-Z Dimension: {step} m")?;
    writeln!(out, "Number of Checked Columns: {}", result.columns)?;
    push_counts(&mut out, &result.sets)?;
    writeln!(out, "Time for Calculations = {} s", seconds(result.elapsed))?;
    writeln!(out, "Generated: {}", Utc::now().to_rfc3339())?;
    Ok(out)
}

pub fn random_stats(
    bounds: &SearchBounds,
    params: RandomSearchParams,
    result: &RandomRunResult,
) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Area Searched From: {} m to: {} m", bounds.lower, bounds.upper)?;
    if params.enforce_min_distance {
        writeln!(out, "Minimum Distance between Locations: {} m", params.min_distance)?;
    }
    writeln!(
        out,
        "Abort after maximum of {} failed attempts",
        params.max_failed_attempts
    )?;
    writeln!(out, "Number of Checked Locations: {}", result.checked)?;
    writeln!(out, "Rejected as too close: {}", result.rejected_too_close)?;
    writeln!(out)?;
    push_counts(&mut out, &result.sets)?;
    writeln!(out)?;
    writeln!(out, "Spawn found: {} / {}", result.found(), result.target_count)?;
    writeln!(out, "Time for Calculations = {} s", seconds(result.elapsed))?;
    writeln!(out, "Generated: {}", Utc::now().to_rfc3339())?;
    Ok(out)
}

pub fn write_stats(dir: &Path, stats: &str) -> Result<()> {
    write_file(dir, "Stats.txt", stats)
}

/// `Time_Stamps.txt`: one discovery time per line.
pub fn write_time_stamps(dir: &Path, times: &[f64]) -> Result<()> {
    let mut out = String::new();
    for t in times {
        writeln!(out, "{t}")?;
    }
    write_file(dir, "Time_Stamps.txt", &out)
}

/// `Time_Stamps.txt` with one `;`-joined line per run, and `RunTime.txt`
/// with the seconds each run took.
pub fn write_repeat_results(dir: &Path, report: &RandomRepeatReport) -> Result<()> {
    let mut stamps = String::new();
    let mut run_times = String::new();
    for run in &report.runs {
        let line: Vec<String> = run.discovery_times.iter().map(|t| t.to_string()).collect();
        writeln!(stamps, "{}", line.join(";"))?;
        writeln!(run_times, "{}", seconds(run.elapsed))?;
    }
    write_file(dir, "Time_Stamps.txt", &stamps)?;
    write_file(dir, "RunTime.txt", &run_times)
}

/// `multiRunResults.txt`: one `|`-separated row per swept step.
pub fn write_sweep_results(dir: &Path, report: &SweepReport) -> Result<()> {
    let mut out = String::new();
    for row in &report.rows {
        writeln!(
            out,
            "Step Size: {:.2} | Nr. of Tests = {} | Nr. of VALID spawns = {} | Nr. of INVALID spawns = {} | Nr. of AIR spawns = {} | Time Elapsed = {}",
            row.step,
            row.expected,
            row.counts.valid,
            row.counts.invalid,
            row.counts.air,
            seconds(row.elapsed)
        )?;
    }
    write_file(dir, "multiRunResults.txt", &out)
}
