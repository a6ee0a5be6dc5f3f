//! Colors and value-to-color mapping strategies.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{IsolineError, IsolineResult};
use crate::grid::ScalarGrid;

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLUE: Color = Color::new(0, 0, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    /// Parse "#rrggbb" or "#rrggbbaa" (leading '#' optional).
    pub fn from_hex(hex: &str) -> IsolineResult<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if (digits.len() != 6 && digits.len() != 8) || !digits.is_ascii() {
            return Err(IsolineError::InvalidColor(hex.to_string()));
        }

        let channel = |idx: usize| -> IsolineResult<u8> {
            u8::from_str_radix(&digits[idx..idx + 2], 16)
                .map_err(|_| IsolineError::InvalidColor(hex.to_string()))
        };

        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Format as "#rrggbb", or "#rrggbbaa" when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Linear blend between two colors; `t` is clamped to [0, 1].
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| -> u8 { (a as f64 + (b as f64 - a as f64) * t).round() as u8 };
        Color::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(de::Error::custom)
    }
}

/// A pure value -> color function, queried once per contour level.
pub trait ColorSource: Send + Sync {
    fn color_for(&self, value: f64) -> Color;
}

impl<F> ColorSource for F
where
    F: Fn(f64) -> Color + Send + Sync,
{
    fn color_for(&self, value: f64) -> Color {
        self(value)
    }
}

/// Normalized position of `value` in `[min, max]`, clamped; 0 for a
/// degenerate range or a non-finite input.
fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if !(span > 0.0) || !value.is_finite() {
        return 0.0;
    }
    ((value - min) / span).clamp(0.0, 1.0)
}

fn validate_range(min: f64, max: f64) -> IsolineResult<()> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(IsolineError::InvalidColorScale(format!(
            "invalid value range [{}, {}]",
            min, max
        )));
    }
    Ok(())
}

/// Evenly spaced color stops stretched over `[min, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    stops: Vec<Color>,
    min: f64,
    max: f64,
}

impl LinearGradient {
    pub fn new(stops: Vec<Color>, min: f64, max: f64) -> IsolineResult<Self> {
        if stops.len() < 2 {
            return Err(IsolineError::InvalidColorScale(format!(
                "linear gradient needs at least 2 stops, got {}",
                stops.len()
            )));
        }
        validate_range(min, max)?;
        Ok(Self { stops, min, max })
    }

    /// Blue-to-red ramp, the default for concentration maps.
    pub fn blue_red(min: f64, max: f64) -> IsolineResult<Self> {
        Self::new(vec![Color::BLUE, Color::RED], min, max)
    }

    pub fn reset_range(&mut self, min: f64, max: f64) -> IsolineResult<()> {
        validate_range(min, max)?;
        self.min = min;
        self.max = max;
        Ok(())
    }

    /// Stretch the gradient over the extrema of `grid`.
    pub fn reset_from_grid<G: ScalarGrid + ?Sized>(&mut self, grid: &G) -> IsolineResult<()> {
        self.reset_range(grid.min(), grid.max())
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

impl ColorSource for LinearGradient {
    fn color_for(&self, value: f64) -> Color {
        let t = normalize(value, self.min, self.max);
        let segments = (self.stops.len() - 1) as f64;
        let pos = t * segments;
        let idx = (pos.floor() as usize).min(self.stops.len() - 2);
        self.stops[idx].lerp(&self.stops[idx + 1], pos - idx as f64)
    }
}

/// Two-color blend on a logarithmic axis, for fields spanning orders of magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct LogarithmicScale {
    low: Color,
    high: Color,
    min: f64,
    max: f64,
}

impl LogarithmicScale {
    pub fn new(low: Color, high: Color, min: f64, max: f64) -> IsolineResult<Self> {
        validate_range(min, max)?;
        Ok(Self {
            low,
            high,
            min,
            max,
        })
    }

    pub fn reset_range(&mut self, min: f64, max: f64) -> IsolineResult<()> {
        validate_range(min, max)?;
        self.min = min;
        self.max = max;
        Ok(())
    }
}

impl ColorSource for LogarithmicScale {
    fn color_for(&self, value: f64) -> Color {
        let span = self.max - self.min;
        if !(span > 0.0) || !value.is_finite() {
            return self.low;
        }
        let offset = (value - self.min).clamp(0.0, span);
        let t = offset.ln_1p() / span.ln_1p();
        self.low.lerp(&self.high, t)
    }
}

/// Discrete palette: `[min, max]` is cut into one bucket per color.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteLookup {
    colors: Vec<Color>,
    min: f64,
    max: f64,
}

impl PaletteLookup {
    pub fn new(colors: Vec<Color>, min: f64, max: f64) -> IsolineResult<Self> {
        if colors.is_empty() {
            return Err(IsolineError::InvalidColorScale(
                "palette must contain at least one color".to_string(),
            ));
        }
        validate_range(min, max)?;
        Ok(Self { colors, min, max })
    }

    pub fn reset_range(&mut self, min: f64, max: f64) -> IsolineResult<()> {
        validate_range(min, max)?;
        self.min = min;
        self.max = max;
        Ok(())
    }
}

impl ColorSource for PaletteLookup {
    fn color_for(&self, value: f64) -> Color {
        let n = self.colors.len();
        let t = normalize(value, self.min, self.max);
        let idx = ((t * n as f64).floor() as usize).min(n - 1);
        self.colors[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let c = Color::from_hex("#ff8000").unwrap();
        assert_eq!(c, Color::rgb(255, 128, 0));
        assert_eq!(c.to_hex(), "#ff8000");

        let c = Color::from_hex("00000080").unwrap();
        assert_eq!(c.a, 128);
        assert_eq!(c.to_hex(), "#00000080");
    }

    #[test]
    fn test_hex_invalid() {
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
    }

    #[test]
    fn test_linear_gradient_ends_and_middle() {
        let g = LinearGradient::new(
            vec![Color::rgb(0, 0, 0), Color::rgb(100, 200, 0), Color::rgb(200, 200, 200)],
            0.0,
            100.0,
        )
        .unwrap();
        assert_eq!(g.color_for(0.0), Color::rgb(0, 0, 0));
        assert_eq!(g.color_for(50.0), Color::rgb(100, 200, 0));
        assert_eq!(g.color_for(100.0), Color::rgb(200, 200, 200));
        assert_eq!(g.color_for(25.0), Color::rgb(50, 100, 0));
        // clamped outside range
        assert_eq!(g.color_for(-10.0), Color::rgb(0, 0, 0));
        assert_eq!(g.color_for(1e9), Color::rgb(200, 200, 200));
    }

    #[test]
    fn test_linear_gradient_needs_two_stops() {
        assert!(LinearGradient::new(vec![Color::BLACK], 0.0, 1.0).is_err());
        assert!(LinearGradient::new(vec![Color::BLACK, Color::WHITE], 1.0, 0.0).is_err());
    }

    #[test]
    fn test_logarithmic_scale() {
        let s = LogarithmicScale::new(Color::rgb(0, 0, 0), Color::rgb(200, 0, 0), 0.0, 99.0).unwrap();
        assert_eq!(s.color_for(0.0), Color::rgb(0, 0, 0));
        assert_eq!(s.color_for(99.0), Color::rgb(200, 0, 0));
        // ln(10) / ln(100) = 0.5
        assert_eq!(s.color_for(9.0), Color::rgb(100, 0, 0));
    }

    #[test]
    fn test_palette_lookup_buckets() {
        let p = PaletteLookup::new(vec![Color::BLACK, Color::BLUE, Color::RED], 0.0, 3.0).unwrap();
        assert_eq!(p.color_for(0.5), Color::BLACK);
        assert_eq!(p.color_for(1.5), Color::BLUE);
        assert_eq!(p.color_for(2.5), Color::RED);
        assert_eq!(p.color_for(3.0), Color::RED);
    }

    #[test]
    fn test_closure_color_source() {
        let source = |v: f64| if v > 0.0 { Color::RED } else { Color::BLUE };
        assert_eq!(source.color_for(1.0), Color::RED);
        assert_eq!(source.color_for(-1.0), Color::BLUE);
    }

    #[test]
    fn test_color_serde_as_hex() {
        let json = serde_json::to_string(&Color::rgb(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(1, 2, 3));
    }
}
