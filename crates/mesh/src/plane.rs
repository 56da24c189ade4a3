//! Cutting plane: a point and a unit normal.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Coordinate axis, used for default plane orientations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(&self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    pub fn all() -> &'static [Axis] {
        &[Axis::X, Axis::Y, Axis::Z]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// Plane through `origin` with unit `normal`. The kept side of a clip is the one
/// the normal points into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Vec3,
    pub normal: Vec3,
}

impl Plane {
    /// Create a plane, normalizing `normal`. A zero normal falls back to +Z.
    pub fn new(origin: Vec3, normal: Vec3) -> Self {
        let normal = normal.try_normalize().unwrap_or(Vec3::Z);
        Self { origin, normal }
    }

    pub fn from_axis(origin: Vec3, axis: Axis) -> Self {
        Self::new(origin, axis.unit())
    }

    /// Signed distance of `p`; positive on the kept side.
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p - self.origin)
    }

    /// Same orientation, origin moved by `distance` along the normal.
    pub fn translated(&self, distance: f32) -> Self {
        Self {
            origin: self.origin + self.normal * distance,
            normal: self.normal,
        }
    }

    /// Same origin, opposite kept side.
    pub fn flipped(&self) -> Self {
        Self {
            origin: self.origin,
            normal: -self.normal,
        }
    }

    /// Two unit vectors spanning the plane, orthogonal to each other and the normal.
    pub fn basis(&self) -> (Vec3, Vec3) {
        self.normal.any_orthonormal_pair()
    }

    /// Parameter `t` where the segment `a + t (b - a)` crosses the plane.
    pub fn segment_crossing(&self, a: Vec3, b: Vec3) -> Option<f32> {
        let da = self.signed_distance(a);
        let db = self.signed_distance(b);
        if da * db > 0.0 || (da - db).abs() < f32::EPSILON {
            return None;
        }
        Some(da / (da - db))
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::from_axis(Vec3::ZERO, Axis::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes() {
        let p = Plane::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(p.normal, Vec3::Y);
    }

    #[test]
    fn test_zero_normal_falls_back() {
        let p = Plane::new(Vec3::ONE, Vec3::ZERO);
        assert_eq!(p.normal, Vec3::Z);
    }

    #[test]
    fn test_signed_distance() {
        let p = Plane::from_axis(Vec3::new(0.0, 0.0, 1.0), Axis::Z);
        assert_eq!(p.signed_distance(Vec3::new(5.0, 5.0, 3.0)), 2.0);
        assert_eq!(p.signed_distance(Vec3::ZERO), -1.0);
    }

    #[test]
    fn test_translated_and_flipped() {
        let p = Plane::from_axis(Vec3::ZERO, Axis::X).translated(2.0);
        assert_eq!(p.origin, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(p.flipped().normal, Vec3::NEG_X);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let p = Plane::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
        let (u, v) = p.basis();
        assert!(u.dot(p.normal).abs() < 1e-5);
        assert!(v.dot(p.normal).abs() < 1e-5);
        assert!(u.dot(v).abs() < 1e-5);
    }

    #[test]
    fn test_segment_crossing() {
        let p = Plane::from_axis(Vec3::ZERO, Axis::X);
        let t = p.segment_crossing(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(t, Some(0.25));
        assert!(p.segment_crossing(Vec3::ONE, Vec3::splat(2.0)).is_none());
    }

    #[test]
    fn test_serde_shape() {
        let p = Plane::from_axis(Vec3::new(1.0, 2.0, 3.0), Axis::Y);
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["origin"], serde_json::json!([1.0, 2.0, 3.0]));
        assert_eq!(json["normal"], serde_json::json!([0.0, 1.0, 0.0]));
        let back: Plane = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }
}
