//! Small 3D vector value type.
//!
//! Used by the scattered-data interpolator for distances; the contour core
//! works purely in 2D and never touches it.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Coordinate axis selector for [`Vec3::compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn add(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Component-wise product.
    pub fn mul(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Component-wise quotient.
    pub fn div(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x / other.x, self.y / other.y, self.z / other.z)
    }

    pub fn scale(&self, k: f64) -> Vec3 {
        Vec3::new(self.x * k, self.y * k, self.z * k)
    }

    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn squared_norm(&self) -> f64 {
        self.dot(self)
    }

    pub fn norm(&self) -> f64 {
        self.squared_norm().sqrt()
    }

    pub fn distance(&self, other: &Vec3) -> f64 {
        self.sub(other).norm()
    }

    /// Scale to unit length in place and return the previous norm.
    ///
    /// Returns `None` and leaves the vector untouched when it has zero length.
    pub fn normalize(&mut self) -> Option<f64> {
        let norm = self.norm();
        if norm == 0.0 || !norm.is_finite() {
            return None;
        }
        *self = self.scale(1.0 / norm);
        Some(norm)
    }

    /// Unit vector in the same direction, if one exists.
    pub fn unit(&self) -> Option<Vec3> {
        let mut v = *self;
        v.normalize().map(|_| v)
    }

    /// Some vector orthogonal to this one (zero for the zero vector).
    pub fn orthogonal(&self) -> Vec3 {
        if self.z.abs() > self.x.abs().max(self.y.abs()) * 1e-12 {
            Vec3::new(self.z, self.z, -self.x - self.y)
        } else {
            Vec3::new(-self.y, self.x, 0.0)
        }
    }

    /// Order two vectors by a single coordinate.
    pub fn compare(&self, other: &Vec3, axis: Axis) -> Ordering {
        let (a, b) = match axis {
            Axis::X => (self.x, other.x),
            Axis::Y => (self.y, other.y),
            Axis::Z => (self.z, other.z),
        };
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    }

    pub fn approx_eq(&self, other: &Vec3, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.z - other.z).abs() <= epsilon
    }
}
