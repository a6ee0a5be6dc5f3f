//! Common test fixtures for isoline tests.

/// Common bounding box definitions for testing, as (min_x, min_y, max_x, max_y).
pub mod bbox {
    /// Unit square.
    pub const UNIT: (f64, f64, f64, f64) = (0.0, 0.0, 1.0, 1.0);

    /// A city-sized extent in projected meters.
    pub const CITY: (f64, f64, f64, f64) = (650_000.0, 6_860_000.0, 660_000.0, 6_870_000.0);

    /// Geographic extent straddling the prime meridian.
    pub const GEOGRAPHIC: (f64, f64, f64, f64) = (-5.0, 42.0, 8.0, 51.0);

    /// Single point (degenerate bbox)
    pub const POINT: (f64, f64, f64, f64) = (0.0, 0.0, 0.0, 0.0);

    /// Invalid bbox (min > max)
    pub const INVALID: (f64, f64, f64, f64) = (10.0, 10.0, 5.0, 5.0);
}

/// Scattered measurement sets as (x, y, value) triples.
pub mod stations {
    /// Three sensors in the unit square with one hot spot.
    pub const HOT_SPOT: [(f64, f64, f64); 3] = [(0.2, 0.2, 10.0), (0.8, 0.3, 20.0), (0.5, 0.8, 80.0)];

    /// Four sensors on the corners of the unit square.
    pub const CORNERS: [(f64, f64, f64); 4] = [
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 25.0),
        (1.0, 1.0, 50.0),
        (0.0, 1.0, 100.0),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_fixtures_ordering() {
        for (x0, y0, x1, y1) in [bbox::UNIT, bbox::CITY, bbox::GEOGRAPHIC] {
            assert!(x0 < x1 && y0 < y1);
        }
        let (x0, _, x1, _) = bbox::INVALID;
        assert!(x0 > x1);
    }

    #[test]
    fn test_station_fixtures_in_unit_square() {
        for (x, y, _) in stations::HOT_SPOT.iter().chain(stations::CORNERS.iter()) {
            assert!((0.0..=1.0).contains(x) && (0.0..=1.0).contains(y));
        }
    }
}
