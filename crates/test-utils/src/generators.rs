//! Synthetic scalar field generators.
//!
//! Every generator returns a `Vec<f64>` in row-major order (row 0 first),
//! ready to wrap in a grid type. Row 0 is the bottom of the mapped field.

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50); // 10 * 5
/// assert_eq!(grid[0], 0.0);   // col=0, row=0 -> 0*1000 + 0
/// assert_eq!(grid[1], 1000.0); // col=1, row=0 -> 1*1000 + 0
/// assert_eq!(grid[10], 1.0);  // col=0, row=1 -> 0*1000 + 1
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f64);
        }
    }
    data
}

/// Distance of every node from the grid center, in index units.
///
/// The value grows monotonically away from the center, so any level strictly
/// between the center and the nearest border value yields closed loops.
pub fn create_radial_grid(rows: usize, cols: usize) -> Vec<f64> {
    let center_row = (rows as f64 - 1.0) / 2.0;
    let center_col = (cols as f64 - 1.0) / 2.0;
    let mut data = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let dr = row as f64 - center_row;
            let dc = col as f64 - center_col;
            data.push((dr * dr + dc * dc).sqrt());
        }
    }
    data
}

/// Gaussian plume: `peak` at (`peak_row`, `peak_col`), decaying with `sigma`.
///
/// Shaped like a pollutant concentration around a single source.
pub fn create_plume_grid(
    rows: usize,
    cols: usize,
    peak_row: f64,
    peak_col: f64,
    sigma: f64,
    peak: f64,
) -> Vec<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let dr = row as f64 - peak_row;
            let dc = col as f64 - peak_col;
            let d2 = dr * dr + dc * dc;
            data.push(peak * (-d2 / (2.0 * sigma * sigma)).exp());
        }
    }
    data
}

/// Linear ramp along the columns: `0` at col 0 up to `max` at the last column.
pub fn create_linear_grid(rows: usize, cols: usize, max: f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    for _row in 0..rows {
        for col in 0..cols {
            data.push(col as f64 / (cols.max(2) - 1) as f64 * max);
        }
    }
    data
}

/// Alternating `high`/`low` values, producing a saddle in every cell.
pub fn create_checkerboard_grid(rows: usize, cols: usize, low: f64, high: f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            data.push(if (row + col) % 2 == 0 { high } else { low });
        }
    }
    data
}

/// Overlapping sine waves around 50, with hills, valleys and saddles.
pub fn create_wave_grid(rows: usize, cols: usize) -> Vec<f64> {
    use std::f64::consts::PI;

    let mut data = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let fx = col as f64 / cols as f64;
            let fy = row as f64 / rows as f64;
            let v1 = (fx * PI * 4.0).sin() * 20.0;
            let v2 = (fy * PI * 4.0).sin() * 20.0;
            let v3 = ((fx + fy) * PI * 2.0).sin() * 10.0;
            data.push(50.0 + v1 + v2 + v3);
        }
    }
    data
}

/// Creates a grid filled with a constant value.
pub fn create_constant_grid(rows: usize, cols: usize, value: f64) -> Vec<f64> {
    vec![value; rows * cols]
}

/// Copy of `data` with NaN written at each (row, col) in `nan_positions`.
pub fn with_nans(mut data: Vec<f64>, cols: usize, nan_positions: &[(usize, usize)]) -> Vec<f64> {
    for &(row, col) in nan_positions {
        if let Some(v) = data.get_mut(row * cols + col) {
            *v = f64::NAN;
        }
    }
    data
}

/// Deterministic pseudo-random noise in `[0, amplitude)`.
///
/// Uses a simple hash so the same seed always produces the same field.
pub fn create_noise_grid(rows: usize, cols: usize, amplitude: f64, seed: u32) -> Vec<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let hash = simple_hash(col as u32, row as u32, seed);
            data.push((hash % 10_000) as f64 / 10_000.0 * amplitude);
        }
    }
    data
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_grid() {
        let grid = create_test_grid(10, 5);
        assert_eq!(grid.len(), 50);
        assert_eq!(grid[11], 1001.0); // col=1, row=1
    }

    #[test]
    fn test_radial_grid_center_and_corner() {
        let grid = create_radial_grid(5, 5);
        assert_eq!(grid[2 * 5 + 2], 0.0);
        assert!((grid[0] - 8.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_plume_peak() {
        let grid = create_plume_grid(11, 11, 5.0, 5.0, 2.0, 100.0);
        assert_eq!(grid[5 * 11 + 5], 100.0);
        assert!(grid[0] < 10.0);
    }

    #[test]
    fn test_linear_grid_range() {
        let grid = create_linear_grid(3, 5, 100.0);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[4], 100.0);
        assert_eq!(grid[5 + 2], 50.0);
    }

    #[test]
    fn test_checkerboard_alternates() {
        let grid = create_checkerboard_grid(2, 2, 0.0, 1.0);
        assert_eq!(grid, vec![1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_with_nans() {
        let grid = with_nans(create_constant_grid(4, 4, 1.0), 4, &[(1, 2), (9, 9)]);
        assert!(grid[6].is_nan());
        assert_eq!(grid.iter().filter(|v| v.is_nan()).count(), 1);
    }

    #[test]
    fn test_noise_deterministic() {
        let a = create_noise_grid(20, 20, 5.0, 42);
        let b = create_noise_grid(20, 20, 5.0, 42);
        assert_eq!(a, b, "Same seed should produce same data");
        assert!(a.iter().all(|&v| (0.0..5.0).contains(&v)));
        assert_ne!(a, create_noise_grid(20, 20, 5.0, 43));
    }
}
