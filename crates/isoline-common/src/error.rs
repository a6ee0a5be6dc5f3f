//! Error types for isoline extraction.

use thiserror::Error;

/// Result type alias using IsolineError.
pub type IsolineResult<T> = Result<T, IsolineError>;

/// Primary error type for isoline operations.
///
/// Every variant is a caller configuration error: the core performs no I/O,
/// so nothing here is transient or worth retrying.
#[derive(Debug, Error)]
pub enum IsolineError {
    // === Grid Errors ===
    #[error("Grid too small: {rows}x{cols} (need at least 2x2)")]
    GridTooSmall { rows: usize, cols: usize },

    #[error("Grid data length mismatch: expected {expected} samples, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },

    // === Sweep Errors ===
    #[error("Invalid level count: {0} (need at least 1)")]
    InvalidLevelCount(usize),

    // === Mapping Errors ===
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    // === Color Errors ===
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid color scale: {0}")]
    InvalidColorScale(String),

    // === Interpolation Errors ===
    #[error("Invalid station data: {0}")]
    InvalidStations(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),
}

impl IsolineError {
    /// Short machine-readable code for this error, used in structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            IsolineError::GridTooSmall { .. } => "grid_too_small",
            IsolineError::DataLengthMismatch { .. } => "data_length_mismatch",
            IsolineError::InvalidLevelCount(_) => "invalid_level_count",
            IsolineError::InvalidBoundingBox(_) => "invalid_bbox",
            IsolineError::InvalidColor(_) => "invalid_color",
            IsolineError::InvalidColorScale(_) => "invalid_color_scale",
            IsolineError::InvalidStations(_) => "invalid_stations",
            IsolineError::Config(_) => "config",
        }
    }
}

impl From<serde_json::Error> for IsolineError {
    fn from(err: serde_json::Error) -> Self {
        IsolineError::Config(format!("JSON error: {}", err))
    }
}
