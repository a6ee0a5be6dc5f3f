//! Common types and utilities shared across the isoline workspace.

pub mod bbox;
pub mod color;
pub mod error;
pub mod grid;
pub mod interpolate;
pub mod vec3;

pub use bbox::BoundingBox;
pub use color::{Color, ColorSource, LinearGradient, LogarithmicScale, PaletteLookup};
pub use error::{IsolineError, IsolineResult};
pub use grid::{validate_dimensions, GridData, GridMapping, Point, ScalarGrid};
pub use interpolate::{ShepardInterpolator, Station, Weighting};
pub use vec3::{Axis, Vec3};
