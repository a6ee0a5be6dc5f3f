//! Running a job: build the field, sweep the levels, package the result.

use std::f64::consts::PI;
use std::time::Instant;

use anyhow::{Context, Result};
use isoline_common::{
    BoundingBox, GridData, GridMapping, IsolineResult, ScalarGrid, ShepardInterpolator,
};
use isolines::{IsolineCollection, IsolineGenerator};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{JobConfig, LevelPlan, Pattern, SourceConfig};

/// What a job writes out: the world extent and one isoline per level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOutput {
    pub bbox: BoundingBox,
    pub isolines: IsolineCollection,
}

/// Evaluate an analytic pattern at normalized coordinates `(u, v)` in `[0, 1]`.
fn pattern_value(pattern: Pattern, value: Option<f64>, u: f64, v: f64) -> f64 {
    let amplitude = value.unwrap_or(1.0);
    match pattern {
        Pattern::Flat => value.unwrap_or(0.0),
        // 0 at the center, 1 at the middle of each side
        Pattern::Radial => {
            let du = u - 0.5;
            let dv = v - 0.5;
            amplitude * 2.0 * (du * du + dv * dv).sqrt()
        }
        // Hyperbolic saddle through the center, in [-1, 1]
        Pattern::Saddle => amplitude * 4.0 * (u - 0.5) * (v - 0.5),
        Pattern::Waves => {
            let w = (u * PI * 4.0).sin() * 0.4
                + (v * PI * 4.0).sin() * 0.4
                + ((u + v) * PI * 2.0).sin() * 0.2;
            amplitude * w
        }
    }
}

/// Sample the job's source onto its grid.
pub fn build_grid(config: &JobConfig) -> IsolineResult<GridData> {
    let mapping = GridMapping::new(config.bbox, config.grid.rows, config.grid.cols)?;

    match &config.source {
        SourceConfig::Synthetic { pattern, value } => {
            let (rows, cols) = (mapping.rows(), mapping.cols());
            GridData::from_fn(rows, cols, |i, j| {
                let u = j as f64 / (cols - 1) as f64;
                let v = i as f64 / (rows - 1) as f64;
                pattern_value(*pattern, *value, u, v)
            })
        }
        SourceConfig::Stations {
            stations,
            weighting,
        } => ShepardInterpolator::new(stations.clone(), *weighting)?.interpolate(&mapping),
    }
}

/// Run a validated job end to end.
pub fn run(config: &JobConfig) -> Result<JobOutput> {
    let started = Instant::now();

    let grid = build_grid(config).context("Failed to build grid")?;
    info!(
        rows = grid.rows(),
        cols = grid.cols(),
        min = grid.min(),
        max = grid.max(),
        "Built grid"
    );

    let colors = config
        .colors
        .build(grid.min(), grid.max())
        .context("Failed to build color scale")?;
    let generator = IsolineGenerator::new(config.bbox)?;

    let mut isolines = match config.level_plan() {
        LevelPlan::Count(count) => generator.generate_isolines(&grid, count, colors.as_ref())?,
        LevelPlan::Explicit(levels) => {
            generator.generate_isolines_at(&grid, &levels, colors.as_ref())?
        }
    };

    if config.smoothing_passes > 0 {
        isolines = isolines
            .iter()
            .map(|iso| iso.smoothed(config.smoothing_passes))
            .collect();
    }

    info!(
        levels = isolines.len(),
        polylines = isolines.iter().map(|i| i.components.len()).sum::<usize>(),
        points = isolines.iter().map(|i| i.point_count()).sum::<usize>(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Job complete"
    );

    Ok(JobOutput {
        bbox: config.bbox,
        isolines,
    })
}
