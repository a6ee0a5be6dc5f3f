//! Job configuration loaded from YAML.

use std::path::Path;

use anyhow::{bail, Context, Result};
use isoline_common::{
    validate_dimensions, BoundingBox, Color, ColorSource, IsolineResult, LinearGradient,
    LogarithmicScale, PaletteLookup, Station, Weighting,
};
use serde::{Deserialize, Serialize};

/// Default number of levels when a job names neither `levels` nor `isovalues`.
pub const DEFAULT_LEVEL_COUNT: usize = 10;

/// One contouring job: where the field lives, how it is sampled, and which
/// levels to extract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub bbox: BoundingBox,
    pub grid: GridConfig,
    pub source: SourceConfig,
    /// Number of evenly spaced levels across the field's range.
    #[serde(default)]
    pub levels: Option<usize>,
    /// Explicit levels; mutually exclusive with `levels`.
    #[serde(default)]
    pub isovalues: Option<Vec<f64>>,
    #[serde(default)]
    pub colors: ColorConfig,
    #[serde(default)]
    pub smoothing_passes: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
}

/// Where grid samples come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Analytic field over the unit square stretched across the bbox.
    Synthetic {
        pattern: Pattern,
        /// Constant for `flat`, amplitude for the other patterns.
        #[serde(default)]
        value: Option<f64>,
    },
    /// Scattered measurements interpolated onto the grid.
    Stations {
        stations: Vec<Station>,
        #[serde(default)]
        weighting: Weighting,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Radial,
    Saddle,
    Waves,
    Flat,
}

/// Value to color mapping, stretched over the field's range at run time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColorConfig {
    Linear { stops: Vec<Color> },
    Logarithmic { low: Color, high: Color },
    Palette { colors: Vec<Color> },
}

impl Default for ColorConfig {
    fn default() -> Self {
        ColorConfig::Linear {
            stops: vec![Color::BLUE, Color::RED],
        }
    }
}

impl ColorConfig {
    /// Build the color source for a field spanning `[min, max]`.
    pub fn build(&self, min: f64, max: f64) -> IsolineResult<Box<dyn ColorSource>> {
        Ok(match self {
            ColorConfig::Linear { stops } => Box::new(LinearGradient::new(stops.clone(), min, max)?),
            ColorConfig::Logarithmic { low, high } => {
                Box::new(LogarithmicScale::new(*low, *high, min, max)?)
            }
            ColorConfig::Palette { colors } => {
                Box::new(PaletteLookup::new(colors.clone(), min, max)?)
            }
        })
    }
}

/// The levels a job sweeps.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelPlan {
    Count(usize),
    Explicit(Vec<f64>),
}

impl JobConfig {
    /// Load configuration from YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid job file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: JobConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Replace whatever levels the file named with an evenly spaced count.
    pub fn override_levels(&mut self, count: usize) {
        self.levels = Some(count);
        self.isovalues = None;
    }

    pub fn level_plan(&self) -> LevelPlan {
        match (&self.isovalues, self.levels) {
            (Some(values), _) => LevelPlan::Explicit(values.clone()),
            (None, Some(count)) => LevelPlan::Count(count),
            (None, None) => LevelPlan::Count(DEFAULT_LEVEL_COUNT),
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        self.bbox.validate()?;
        validate_dimensions(self.grid.rows, self.grid.cols)?;

        match (&self.isovalues, self.levels) {
            (Some(_), Some(_)) => bail!("levels and isovalues are mutually exclusive"),
            (None, Some(0)) => bail!("levels must be > 0"),
            (Some(values), None) => {
                if values.is_empty() {
                    bail!("isovalues must not be empty");
                }
                if values.iter().any(|v| !v.is_finite()) {
                    bail!("isovalues must be finite");
                }
            }
            _ => {}
        }

        match &self.source {
            SourceConfig::Synthetic { value, .. } => {
                if value.is_some_and(|v| !v.is_finite()) {
                    bail!("synthetic value must be finite");
                }
            }
            SourceConfig::Stations { stations, .. } => {
                if stations.is_empty() {
                    bail!("at least one station must be specified");
                }
            }
        }

        match &self.colors {
            ColorConfig::Linear { stops } if stops.len() < 2 => {
                bail!("linear colors need at least 2 stops")
            }
            ColorConfig::Palette { colors } if colors.is_empty() => {
                bail!("palette must contain at least one color")
            }
            _ => {}
        }

        Ok(())
    }
}
