//! Infinite plane primitive.

use crate::surface::Surface;
use lux_math::{DVec3, EPSILON, HIT_RANGE, MAX_DISTANCE};

/// The plane of points p with `normal · p + distance = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Pre-computed unit normal
    normal: DVec3,
    distance: f64,
}

impl Plane {
    /// Create a new plane. The normal is normalized here.
    pub fn new(normal: DVec3, distance: f64) -> Self {
        Self {
            normal: lux_math::normalize(normal),
            distance,
        }
    }

    pub fn unit_normal(&self) -> DVec3 {
        self.normal
    }

    /// Signed offset of the plane from the origin along the normal.
    pub fn offset(&self) -> f64 {
        self.distance
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.normal.length_squared() > 0.0 && self.distance.is_finite() {
            Ok(())
        } else {
            Err("plane normal must be nonzero".to_string())
        }
    }
}

impl Surface for Plane {
    fn distance(&self, origin: DVec3, direction: DVec3) -> f64 {
        let facing = direction.dot(self.normal);

        // Ray is parallel to the plane
        if facing.abs() <= EPSILON {
            return MAX_DISTANCE;
        }

        let t = -(self.normal.dot(origin) + self.distance) / facing;
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
