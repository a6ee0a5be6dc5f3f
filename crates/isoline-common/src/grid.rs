//! Scalar grids and the grid-index to world-coordinate mapping.

use serde::{Deserialize, Serialize};

use crate::error::{IsolineError, IsolineResult};
use crate::BoundingBox;

/// A 2D point in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// True when both coordinates are within `epsilon` of `other`.
    pub fn approx_eq(&self, other: &Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }

    /// Point at parameter `t` along the segment `self -> other`.
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + t * (other.x - self.x),
            self.y + t * (other.y - self.y),
        )
    }
}

/// Read-only access to a rows x cols field of samples.
///
/// `min` and `max` are the extrema over all finite samples. Implementations
/// are free to compute samples lazily, but must return the same value for
/// the same index every time.
pub trait ScalarGrid {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    fn sample(&self, i: usize, j: usize) -> f64;
    fn min(&self) -> f64;
    fn max(&self) -> f64;
}

/// Check that a grid is large enough to hold at least one cell.
pub fn validate_dimensions(rows: usize, cols: usize) -> IsolineResult<()> {
    if rows < 2 || cols < 2 {
        return Err(IsolineError::GridTooSmall { rows, cols });
    }
    Ok(())
}

/// An owned, row-major scalar grid.
///
/// Row `i = 0` is the bottom row (`min_y`) once mapped to world space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridData {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
    min: f64,
    max: f64,
}

impl GridData {
    /// Wrap row-major samples, computing the finite min/max.
    ///
    /// NaN samples mark missing data; cells touching them produce no contour.
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> IsolineResult<Self> {
        validate_dimensions(rows, cols)?;
        if values.len() != rows * cols {
            return Err(IsolineError::DataLengthMismatch {
                expected: rows * cols,
                actual: values.len(),
            });
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut missing = 0usize;
        for &v in &values {
            if v.is_nan() {
                missing += 1;
                continue;
            }
            min = min.min(v);
            max = max.max(v);
        }

        if missing > 0 {
            tracing::warn!(rows, cols, missing, "Grid contains missing samples");
        }
        if missing == values.len() {
            min = f64::NAN;
            max = f64::NAN;
        }

        Ok(Self {
            rows,
            cols,
            values,
            min,
            max,
        })
    }

    /// Build a grid by evaluating `f(i, j)` at every node.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> IsolineResult<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        validate_dimensions(rows, cols)?;
        let mut values = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                values.push(f(i, j));
            }
        }
        Self::new(rows, cols, values)
    }

    /// Raw row-major samples.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl ScalarGrid for GridData {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn sample(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.cols + j]
    }

    fn min(&self) -> f64 {
        self.min
    }

    fn max(&self) -> f64 {
        self.max
    }
}

/// Linear mapping from (possibly fractional) grid indices to world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMapping {
    bbox: BoundingBox,
    rows: usize,
    cols: usize,
}

impl GridMapping {
    pub fn new(bbox: BoundingBox, rows: usize, cols: usize) -> IsolineResult<Self> {
        bbox.validate()?;
        validate_dimensions(rows, cols)?;
        Ok(Self { bbox, rows, cols })
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// World-space size of one grid cell as (dx, dy).
    pub fn cell_size(&self) -> (f64, f64) {
        (
            self.bbox.width() / (self.cols - 1) as f64,
            self.bbox.height() / (self.rows - 1) as f64,
        )
    }

    /// Map row `i` and column `j` to world coordinates.
    pub fn to_world(&self, i: f64, j: f64) -> Point {
        let (dx, dy) = self.cell_size();
        Point::new(self.bbox.min_x + j * dx, self.bbox.min_y + i * dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_min_max() {
        let grid = GridData::new(2, 3, vec![1.0, 5.0, -2.0, 0.0, 3.0, 4.0]).unwrap();
        assert_eq!(grid.min(), -2.0);
        assert_eq!(grid.max(), 5.0);
        assert_eq!(grid.sample(1, 2), 4.0);
    }

    #[test]
    fn test_grid_min_max_ignores_nan() {
        let grid = GridData::new(2, 2, vec![f64::NAN, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(grid.min(), 1.0);
        assert_eq!(grid.max(), 3.0);
    }

    #[test]
    fn test_grid_rejects_small() {
        let err = GridData::new(1, 4, vec![0.0; 4]).unwrap_err();
        assert!(matches!(err, IsolineError::GridTooSmall { rows: 1, cols: 4 }));
    }

    #[test]
    fn test_grid_rejects_length_mismatch() {
        let err = GridData::new(3, 3, vec![0.0; 8]).unwrap_err();
        assert!(matches!(
            err,
            IsolineError::DataLengthMismatch {
                expected: 9,
                actual: 8
            }
        ));
    }

    #[test]
    fn test_mapping_corners() {
        let mapping = GridMapping::new(BoundingBox::new(10.0, 20.0, 30.0, 60.0), 5, 3).unwrap();
        assert_eq!(mapping.to_world(0.0, 0.0), Point::new(10.0, 20.0));
        assert_eq!(mapping.to_world(4.0, 2.0), Point::new(30.0, 60.0));
        assert_eq!(mapping.to_world(2.0, 1.0), Point::new(20.0, 40.0));
        assert_eq!(mapping.cell_size(), (10.0, 10.0));
    }
}
