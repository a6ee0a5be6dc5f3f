//! Shepard (inverse distance weighted) interpolation of scattered samples
//! onto a regular grid.
//!
//! This is how a concentration field is produced from a sparse set of
//! measurement stations before contouring.

use serde::{Deserialize, Serialize};

use crate::error::{IsolineError, IsolineResult};
use crate::grid::{GridData, GridMapping};
use crate::vec3::Vec3;

/// Distances below this are treated as "on the station".
const COINCIDENT_DISTANCE: f64 = 1e-12;

/// A scattered measurement in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl Station {
    pub fn new(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value }
    }

    fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, 0.0)
    }
}

/// Weighting scheme for the interpolator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Weighting {
    /// Global weights `d^-power`, normalized over all stations.
    Shepard {
        #[serde(default = "default_power")]
        power: f64,
    },
    /// Local weights `((R - d)+ / (R d))^2`; stations beyond `radius` are ignored.
    Quadratic { radius: f64 },
}

fn default_power() -> f64 {
    2.0
}

impl Default for Weighting {
    fn default() -> Self {
        Weighting::Shepard {
            power: default_power(),
        }
    }
}

pub struct ShepardInterpolator {
    stations: Vec<Station>,
    weighting: Weighting,
}

impl ShepardInterpolator {
    pub fn new(stations: Vec<Station>, weighting: Weighting) -> IsolineResult<Self> {
        if stations.is_empty() {
            return Err(IsolineError::InvalidStations(
                "at least one station is required".to_string(),
            ));
        }
        if let Some(bad) = stations
            .iter()
            .find(|s| !(s.x.is_finite() && s.y.is_finite() && s.value.is_finite()))
        {
            return Err(IsolineError::InvalidStations(format!(
                "non-finite station {:?}",
                bad
            )));
        }
        match weighting {
            Weighting::Shepard { power } if !(power > 0.0) => {
                return Err(IsolineError::InvalidStations(format!(
                    "shepard power must be > 0, got {}",
                    power
                )));
            }
            Weighting::Quadratic { radius } if !(radius > 0.0) => {
                return Err(IsolineError::InvalidStations(format!(
                    "quadratic radius must be > 0, got {}",
                    radius
                )));
            }
            _ => {}
        }
        Ok(Self {
            stations,
            weighting,
        })
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Interpolated value at a world-space position.
    pub fn value_at(&self, x: f64, y: f64) -> f64 {
        let here = Vec3::new(x, y, 0.0);
        let distances: Vec<f64> = self
            .stations
            .iter()
            .map(|s| s.position().distance(&here))
            .collect();

        if let Some(idx) = distances.iter().position(|&d| d < COINCIDENT_DISTANCE) {
            return self.stations[idx].value;
        }

        if let Weighting::Quadratic { radius } = self.weighting {
            let weights = distances.iter().map(|&d| {
                let w = (radius - d).max(0.0) / (radius * d);
                w * w
            });
            if let Some(v) = self.weighted_mean(weights) {
                return v;
            }
        }

        let power = match self.weighting {
            Weighting::Shepard { power } => power,
            Weighting::Quadratic { .. } => default_power(),
        };
        self.weighted_mean(distances.iter().map(|&d| d.powf(-power)))
            .unwrap_or(f64::NAN)
    }

    fn weighted_mean(&self, weights: impl Iterator<Item = f64>) -> Option<f64> {
        let mut sum_w = 0.0;
        let mut sum_wv = 0.0;
        for (w, station) in weights.zip(&self.stations) {
            sum_w += w;
            sum_wv += w * station.value;
        }
        if sum_w > 0.0 && sum_w.is_finite() {
            Some(sum_wv / sum_w)
        } else {
            None
        }
    }

    /// Evaluate every node of `mapping` into a grid.
    pub fn interpolate(&self, mapping: &GridMapping) -> IsolineResult<GridData> {
        tracing::debug!(
            stations = self.stations.len(),
            rows = mapping.rows(),
            cols = mapping.cols(),
            weighting = ?self.weighting,
            "Interpolating stations onto grid"
        );
        GridData::from_fn(mapping.rows(), mapping.cols(), |i, j| {
            let p = mapping.to_world(i as f64, j as f64);
            self.value_at(p.x, p.y)
        })
    }
}
