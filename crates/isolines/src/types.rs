//! Geometry records produced by a contour scan.

use isoline_common::{Color, Point};
use serde::{Deserialize, Serialize};

use crate::smooth::smooth_polyline;

/// A line segment between two crossing points of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
}

/// A connected chain of points.
///
/// A closed polyline repeats its first point as its last point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Polyline {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Self { points, closed }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Total length along the chain.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }
}

/// All contour components extracted for one isovalue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Isoline {
    pub isovalue: f64,
    pub color: Color,
    pub components: Vec<Polyline>,
}

/// One isoline per requested level, in sweep order.
pub type IsolineCollection = Vec<Isoline>;

impl Isoline {
    pub fn new(isovalue: f64, color: Color, components: Vec<Polyline>) -> Self {
        Self {
            isovalue,
            color,
            components,
        }
    }

    /// True when the level crossed nothing.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.components.iter().map(Polyline::len).sum()
    }

    pub fn closed_count(&self) -> usize {
        self.components.iter().filter(|p| p.closed).count()
    }

    pub fn open_count(&self) -> usize {
        self.components.len() - self.closed_count()
    }

    /// Copy with every component smoothed by `iterations` Chaikin passes.
    pub fn smoothed(&self, iterations: u32) -> Isoline {
        Isoline {
            isovalue: self.isovalue,
            color: self.color,
            components: self
                .components
                .iter()
                .map(|p| smooth_polyline(p, iterations))
                .collect(),
        }
    }
}
