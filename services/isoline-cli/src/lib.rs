//! Batch isoline extraction.
//!
//! A job file names a world extent, a grid, a field source (analytic pattern
//! or scattered stations) and the levels to sweep; running it yields JSON
//! geometry with one colored isoline per level.

pub mod config;
pub mod job;

pub use config::JobConfig;
pub use job::{build_grid, run, JobOutput};
