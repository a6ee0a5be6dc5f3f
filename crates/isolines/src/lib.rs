//! Isoline extraction for regular 2D scalar grids.
//!
//! The pipeline per level:
//! - classify each cell against the isovalue ([`classify`])
//! - emit zero, one or two crossing segments per cell ([`segment`])
//! - stitch segments into maximal polylines as they arrive ([`stitch`])
//!
//! [`IsolineGenerator`] drives a single-level scan and the multi-level sweep.

pub mod classify;
pub mod contour;
pub mod segment;
pub mod smooth;
pub mod stitch;
pub mod types;

pub use classify::{CellCase, Classification, SaddleJoin};
pub use contour::{interval_levels, march_squares, partition_levels, IsolineGenerator};
pub use smooth::smooth_polyline;
pub use stitch::LineStitcher;
pub use types::{Isoline, IsolineCollection, Polyline, Segment};
