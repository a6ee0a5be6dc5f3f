//! Isoline extraction using the marching squares algorithm.
//!
//! A single level is one row-major pass over the grid feeding a private
//! [`LineStitcher`]. A multi-level sweep runs those passes in parallel, one
//! per level, and returns them in ascending level order.

use isoline_common::{
    validate_dimensions, BoundingBox, Color, ColorSource, GridMapping, IsolineError,
    IsolineResult, ScalarGrid,
};
use rayon::prelude::*;

use crate::classify::{classify, CellCase, Corners};
use crate::segment::cell_segments;
use crate::stitch::LineStitcher;
use crate::types::{Isoline, IsolineCollection, Segment};

/// Relative tolerance used to match segment endpoints, scaled by cell size.
const STITCH_TOLERANCE: f64 = 1e-9;

/// Evenly spaced levels covering `[min, max]`.
///
/// More than one level includes both endpoints; a single level sits at the
/// midpoint of the range.
pub fn partition_levels(min: f64, max: f64, count: usize) -> IsolineResult<Vec<f64>> {
    match count {
        0 => Err(IsolineError::InvalidLevelCount(count)),
        1 => Ok(vec![(min + max) / 2.0]),
        _ => {
            let span = max - min;
            let steps = (count - 1) as f64;
            let mut levels: Vec<f64> = (0..count)
                .map(|k| min + span * k as f64 / steps)
                .collect();
            // Pin the top level so rounding never drops the maximum sample.
            levels[count - 1] = max;
            Ok(levels)
        }
    }
}

/// Levels at every multiple of `interval` within `[min, max]`.
pub fn interval_levels(min: f64, max: f64, interval: f64) -> Vec<f64> {
    if interval <= 0.0 || max <= min || ![min, max, interval].iter().all(|v| v.is_finite()) {
        return vec![];
    }

    // Start from first multiple of interval at or above min
    let first = (min / interval).ceil() as i64;
    let last = (max / interval).floor() as i64;
    (first..=last).map(|k| k as f64 * interval).collect()
}

/// Corner samples of cell (`row`, `col`) in winding order.
fn cell_corners<G: ScalarGrid + ?Sized>(grid: &G, row: usize, col: usize) -> Corners {
    [
        grid.sample(row, col),
        grid.sample(row, col + 1),
        grid.sample(row + 1, col + 1),
        grid.sample(row + 1, col),
    ]
}

/// Marching squares over every cell, in row-major order.
///
/// Cells with a missing (NaN) corner contribute nothing. A segment lying on
/// an edge shared by two cells is emitted by only one of them.
pub fn march_squares<G: ScalarGrid + ?Sized>(
    grid: &G,
    mapping: &GridMapping,
    isovalue: f64,
) -> Vec<Segment> {
    let mut segments = Vec::new();
    for_each_segment(grid, mapping, isovalue, |segment| segments.push(segment));
    segments
}

fn for_each_segment<G, F>(grid: &G, mapping: &GridMapping, isovalue: f64, mut emit: F)
where
    G: ScalarGrid + ?Sized,
    F: FnMut(Segment),
{
    for row in 0..grid.rows().saturating_sub(1) {
        for col in 0..grid.cols().saturating_sub(1) {
            let corners = cell_corners(grid, row, col);
            if corners.iter().any(|v| v.is_nan()) {
                continue;
            }

            let classification = classify(&corners, isovalue);
            if classification.case.is_trivial()
                || emitted_by_neighbor(grid, row, col, &corners, classification.case, isovalue)
            {
                continue;
            }

            for segment in cell_segments(row, col, &corners, &classification, isovalue, mapping) {
                emit(segment);
            }
        }
    }
}

/// Whether this cell's segment runs along its top or right edge and the
/// neighbour across that edge emits the same segment along its own bottom or
/// left edge.
///
/// That happens when the shared edge's two nodes both equal the isovalue and
/// the field falls below it on either side. Only the neighbour keeps the
/// segment.
fn emitted_by_neighbor<G: ScalarGrid + ?Sized>(
    grid: &G,
    row: usize,
    col: usize,
    corners: &Corners,
    case: CellCase,
    isovalue: f64,
) -> bool {
    // NaN compares false, so a neighbour that would be skipped never claims it.
    let below = |i: usize, j: usize| grid.sample(i, j) < isovalue;
    match case {
        CellCase::Top => {
            corners[2] == isovalue
                && corners[3] == isovalue
                && row + 2 < grid.rows()
                && below(row + 2, col)
                && below(row + 2, col + 1)
        }
        CellCase::Right => {
            corners[1] == isovalue
                && corners[2] == isovalue
                && col + 2 < grid.cols()
                && below(row, col + 2)
                && below(row + 1, col + 2)
        }
        _ => false,
    }
}

/// Extracts isolines from grids that cover a fixed world-space extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsolineGenerator {
    bbox: BoundingBox,
}

impl IsolineGenerator {
    pub fn new(bbox: BoundingBox) -> IsolineResult<Self> {
        bbox.validate()?;
        Ok(Self { bbox })
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Extract every contour component of `grid` at `isovalue`.
    ///
    /// An isovalue outside the grid's range is not an error; it yields an
    /// isoline with no components.
    pub fn generate_isoline<G: ScalarGrid + ?Sized>(
        &self,
        grid: &G,
        isovalue: f64,
        color: Color,
    ) -> IsolineResult<Isoline> {
        let mapping = GridMapping::new(self.bbox, grid.rows(), grid.cols())?;
        let (dx, dy) = mapping.cell_size();
        let mut stitcher = LineStitcher::new(STITCH_TOLERANCE * dx.max(dy));

        for_each_segment(grid, &mapping, isovalue, |segment| stitcher.add_segment(segment));

        let segments = stitcher.segment_count();
        let degenerate = stitcher.degenerate_count();
        let components = stitcher.finish();
        let isoline = Isoline::new(isovalue, color, components);

        tracing::debug!(
            isovalue = isovalue,
            segments = segments,
            degenerate = degenerate,
            polylines = isoline.components.len(),
            closed = isoline.closed_count(),
            "Generated isoline"
        );

        Ok(isoline)
    }

    /// Sweep `level_count` evenly spaced levels across the grid's range.
    pub fn generate_isolines<G, C>(
        &self,
        grid: &G,
        level_count: usize,
        colors: &C,
    ) -> IsolineResult<IsolineCollection>
    where
        G: ScalarGrid + Sync + ?Sized,
        C: ColorSource + ?Sized,
    {
        validate_dimensions(grid.rows(), grid.cols())?;
        let levels = partition_levels(grid.min(), grid.max(), level_count)?;
        self.generate_isolines_at(grid, &levels, colors)
    }

    /// Sweep an explicit list of levels, in the order given.
    ///
    /// Levels are independent, so they are extracted in parallel.
    pub fn generate_isolines_at<G, C>(
        &self,
        grid: &G,
        levels: &[f64],
        colors: &C,
    ) -> IsolineResult<IsolineCollection>
    where
        G: ScalarGrid + Sync + ?Sized,
        C: ColorSource + ?Sized,
    {
        validate_dimensions(grid.rows(), grid.cols())?;

        tracing::debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            data_min = grid.min(),
            data_max = grid.max(),
            num_levels = levels.len(),
            first_level = levels.first().copied().unwrap_or(f64::NAN),
            last_level = levels.last().copied().unwrap_or(f64::NAN),
            "Isoline sweep input"
        );

        let isolines: IsolineCollection = levels
            .par_iter()
            .map(|&level| self.generate_isoline(grid, level, colors.color_for(level)))
            .collect::<IsolineResult<_>>()?;

        tracing::debug!(
            num_isolines = isolines.len(),
            total_points = isolines.iter().map(Isoline::point_count).sum::<usize>(),
            "Generated isolines"
        );

        Ok(isolines)
    }
}
