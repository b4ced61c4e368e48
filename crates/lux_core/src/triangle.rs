//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::surface::Surface;
use lux_math::{DVec3, Interval, EPSILON, HIT_RANGE, MAX_DISTANCE};

/// A triangle primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices
    a: DVec3,
    b: DVec3,
    c: DVec3,
    /// Cached edges from `a`
    edge1: DVec3,
    edge2: DVec3,
    /// Pre-computed face normal (unit length)
    normal: DVec3,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The face normal is (c - a) × (b - a), so the front face is the one
    /// from which the vertices appear clockwise.
    pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Self {
        let edge1 = b - a;
        let edge2 = c - a;
        let normal = lux_math::normalize(edge2.cross(edge1));

        Self {
            a,
            b,
            c,
            edge1,
            edge2,
            normal,
        }
    }

    pub fn vertices(&self) -> [DVec3; 3] {
        [self.a, self.b, self.c]
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.normal.length_squared() > 0.0 {
            Ok(())
        } else {
            Err("triangle has zero area".to_string())
        }
    }
}

impl Surface for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn distance(&self, origin: DVec3, direction: DVec3) -> f64 {
        let h = direction.cross(self.edge2);
        let det = self.edge1.dot(h);

        // Ray is parallel to triangle
        if det.abs() < EPSILON {
            return MAX_DISTANCE;
        }

        let f = 1.0 / det;
        let s = origin - self.a;
        let u = f * s.dot(h);
        if !Interval::UNIT.contains(u) {
            return MAX_DISTANCE;
        }

        let q = s.cross(self.edge1);
        let v = f * direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return MAX_DISTANCE;
        }

        let t = f * self.edge2.dot(q);
        if HIT_RANGE.surrounds(t) {
            t
        } else {
            MAX_DISTANCE
        }
    }

    fn normal(&self, _point: DVec3) -> DVec3 {
        self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy_triangle() -> Triangle {
        // Triangle in XY plane at z=-1
        Triangle::new(
            DVec3::new(-1.0, -1.0, -1.0),
            DVec3::new(1.0, -1.0, -1.0),
            DVec3::new(0.0, 1.0, -1.0),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let tri = xy_triangle();
        let t = tri.distance(DVec3::ZERO, -DVec3::Z);
        assert!((t - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_triangle_miss() {
        let tri = xy_triangle();

        // Ray pointing away
        assert_eq!(tri.distance(DVec3::ZERO, DVec3::Z), MAX_DISTANCE);

        // Ray passing outside the edges
        assert_eq!(
            tri.distance(DVec3::new(0.9, 0.9, 0.0), -DVec3::Z),
            MAX_DISTANCE
        );
    }

    #[test]
    fn test_triangle_parallel_ray_misses() {
        let tri = xy_triangle();
        assert_eq!(
            tri.distance(DVec3::new(-5.0, 0.0, -1.0), DVec3::X),
            MAX_DISTANCE
        );
    }

    #[test]
    fn test_triangle_normal_orientation() {
        // Counter-clockwise when seen from +z, so the face normal points to -z
        let tri = xy_triangle();
        assert!((tri.normal(DVec3::ZERO) + DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_degenerate_triangle_is_invalid() {
        let tri = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::X * 2.0);
        assert!(tri.validate().is_err());
        assert!(xy_triangle().validate().is_ok());
    }
}
