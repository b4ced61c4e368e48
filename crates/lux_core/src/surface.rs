//! Surface trait for batched ray-object intersection.

use lux_math::{DVec3, RayBatch, Vec3Batch};

/// Trait for shapes that can be hit by rays.
///
/// Shapes answer per-ray questions; the batched entry points used by the
/// tracer are provided on top of them.
pub trait Surface: Send + Sync {
    /// Distance along a unit `direction` to the nearest hit above
    /// [`lux_math::EPSILON`], or [`lux_math::MAX_DISTANCE`] when there is none.
    fn distance(&self, origin: DVec3, direction: DVec3) -> f64;

    /// Unit outward normal at a point on the surface.
    fn normal(&self, point: DVec3) -> DVec3;

    /// Nearest hit distance for every ray in the batch.
    ///
    /// Misses report the sentinel, so results from several surfaces can be
    /// reduced with `f64::min`.
    fn intersect(&self, rays: &RayBatch) -> Vec<f64> {
        rays.origin
            .iter()
            .zip(rays.direction.iter())
            .map(|(&origin, &direction)| self.distance(origin, direction))
            .collect()
    }

    /// Normals for a batch of surface points.
    fn normal_at(&self, points: &Vec3Batch) -> Vec3Batch {
        points.map(|p| self.normal(p))
    }
}
