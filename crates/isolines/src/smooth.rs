//! Polyline smoothing.

use isoline_common::Point;

use crate::types::Polyline;

/// Apply Chaikin's corner cutting algorithm for smoothing.
///
/// Open polylines keep their endpoints. Closed polylines are cut all the way
/// around and the result repeats its first point at the end.
pub fn smooth_polyline(polyline: &Polyline, iterations: u32) -> Polyline {
    if iterations == 0 || polyline.points.len() < 3 {
        return polyline.clone();
    }

    // Work on the distinct ring for closed loops.
    let mut points = polyline.points.clone();
    if polyline.closed && points.len() > 1 {
        points.pop();
    }

    for _ in 0..iterations {
        points = chaikin_pass(&points, polyline.closed);
    }

    if polyline.closed {
        if let Some(&first) = points.first() {
            points.push(first);
        }
    }

    Polyline::new(points, polyline.closed)
}

fn chaikin_pass(points: &[Point], closed: bool) -> Vec<Point> {
    let n = points.len();
    let mut out = Vec::with_capacity(n * 2 + 2);

    if !closed {
        out.push(points[0]);
    }

    let pairs = if closed { n } else { n - 1 };
    for i in 0..pairs {
        let p1 = points[i];
        let p2 = points[(i + 1) % n];
        // 25% and 75% along the segment
        out.push(p1.lerp(&p2, 0.25));
        out.push(p1.lerp(&p2, 0.75));
    }

    if !closed {
        out.push(points[n - 1]);
    }
    out
}
