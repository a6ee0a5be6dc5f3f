//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::error::{IsolineError, IsolineResult};

/// The world-space rectangle a grid is stretched over.
///
/// Coordinates are in whatever units the caller works in (degrees,
/// meters, pixels); the core only needs the mapping to be linear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Parse a comma separated "minx,miny,maxx,maxy" string.
    pub fn from_str_list(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let parse = |part: &str| -> Result<f64, BboxParseError> {
            part.parse()
                .map_err(|_| BboxParseError::InvalidNumber(part.to_string()))
        };

        Ok(Self {
            min_x: parse(parts[0])?,
            min_y: parse(parts[1])?,
            max_x: parse(parts[2])?,
            max_y: parse(parts[3])?,
        })
    }

    /// Check that the box is finite and has positive extent on both axes.
    pub fn validate(&self) -> IsolineResult<()> {
        let finite = [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(IsolineError::InvalidBoundingBox(format!(
                "non-finite bounds {:?}",
                self
            )));
        }
        if self.min_x >= self.max_x {
            return Err(IsolineError::InvalidBoundingBox(format!(
                "min_x ({}) must be < max_x ({})",
                self.min_x, self.max_x
            )));
        }
        if self.min_y >= self.max_y {
            return Err(IsolineError::InvalidBoundingBox(format!(
                "min_y ({}) must be < max_y ({})",
                self.min_y, self.max_y
            )));
        }
        Ok(())
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if a point is contained within this bbox.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid bounding box format: {0}. Expected 'minx,miny,maxx,maxy'")]
    InvalidFormat(String),

    #[error("Invalid number in bounding box: {0}")]
    InvalidNumber(String),
}

impl From<BboxParseError> for IsolineError {
    fn from(err: BboxParseError) -> Self {
        IsolineError::InvalidBoundingBox(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bbox() {
        let bbox = BoundingBox::from_str_list("-125.0,24.0,-66.0,50.0").unwrap();
        assert_eq!(bbox.min_x, -125.0);
        assert_eq!(bbox.min_y, 24.0);
        assert_eq!(bbox.max_x, -66.0);
        assert_eq!(bbox.max_y, 50.0);
    }

    #[test]
    fn test_validate_rejects_inverted() {
        assert!(BoundingBox::new(0.0, 0.0, 10.0, 10.0).validate().is_ok());
        assert!(BoundingBox::new(10.0, 0.0, 0.0, 10.0).validate().is_err());
        assert!(BoundingBox::new(0.0, 5.0, 10.0, 5.0).validate().is_err());
    }
}
