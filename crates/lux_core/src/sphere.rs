//! Sphere primitive for ray tracing.

use crate::surface::Surface;
use lux_math::{DVec3, HIT_RANGE, MAX_DISTANCE};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.radius > 0.0 && self.radius.is_finite() {
            Ok(())
        } else {
            Err(format!("sphere radius must be positive, got {}", self.radius))
        }
    }
}

impl Surface for Sphere {
    fn distance(&self, origin: DVec3, direction: DVec3) -> f64 {
        // |o + t*d - c|^2 = r^2 with |d| = 1
        let oc = origin - self.center;
        let b = 2.0 * direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return MAX_DISTANCE;
        }

        let sqrtd = discriminant.sqrt();
        let near = (-b - sqrtd) * 0.5;
        let far = (-b + sqrtd) * 0.5;

        if HIT_RANGE.surrounds(near) {
            near
        } else if HIT_RANGE.surrounds(far) {
            far
        } else {
            MAX_DISTANCE
        }
    }

    fn normal(&self, point: DVec3) -> DVec3 {
        lux_math::normalize(point - self.center)
    }
}
