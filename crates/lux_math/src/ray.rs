use crate::batch::{extract, Vec3Batch};

/// A batch of rays sharing one frame.
///
/// Directions are normalized on construction. `distance` and `active` start
/// out as "nothing hit yet" and are set once per intersection pass via
/// [`RayBatch::set_hits`]; after that, [`RayBatch::hit_points`] and
/// [`RayBatch::active_directions`] return compressed batches holding only
/// the active rays.
#[derive(Debug, Clone, PartialEq)]
pub struct RayBatch {
    pub origin: Vec3Batch,
    pub direction: Vec3Batch,
    distance: Vec<f64>,
    active: Vec<bool>,
}

impl RayBatch {
    /// Create a new ray batch. Every ray starts active with distance zero.
    pub fn new(origin: Vec3Batch, direction: Vec3Batch) -> Self {
        assert_eq!(
            origin.len(),
            direction.len(),
            "ray origins and directions differ in length"
        );
        let len = direction.len();
        Self {
            origin,
            direction: direction.normalized(),
            distance: vec![0.0; len],
            active: vec![true; len],
        }
    }

    /// Number of rays in the batch.
    #[inline]
    pub fn len(&self) -> usize {
        self.direction.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.direction.is_empty()
    }

    /// Record the hit distances and the subset of rays they apply to.
    pub fn set_hits(&mut self, distance: Vec<f64>, active: Vec<bool>) {
        assert_eq!(distance.len(), self.len(), "distance count differs from ray count");
        assert_eq!(active.len(), self.len(), "mask length differs from ray count");
        self.distance = distance;
        self.active = active;
    }

    /// The active subset mask.
    pub fn active(&self) -> &[bool] {
        &self.active
    }

    /// Hit distances of the active rays.
    pub fn active_distances(&self) -> Vec<f64> {
        extract(&self.active, &self.distance)
    }

    /// Directions of the active rays.
    pub fn active_directions(&self) -> Vec3Batch {
        self.direction.extract(&self.active)
    }

    /// Points reached by the active rays: origin + distance * direction.
    pub fn hit_points(&self) -> Vec3Batch {
        let origins = self.origin.extract(&self.active);
        let directions = self.active_directions();
        &origins + &directions.scale(&self.active_distances())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_directions_are_normalized() {
        let rays = RayBatch::new(
            Vec3Batch::zeros(2),
            Vec3Batch::new(vec![DVec3::new(0.0, 0.0, 5.0), DVec3::new(3.0, 4.0, 0.0)]),
        );
        assert_eq!(rays.direction.get(0), DVec3::Z);
        assert!((rays.direction.get(1) - DVec3::new(0.6, 0.8, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_hit_points_only_cover_active_rays() {
        let mut rays = RayBatch::new(
            Vec3Batch::new(vec![DVec3::ZERO, DVec3::ONE, DVec3::X]),
            Vec3Batch::new(vec![DVec3::Z, DVec3::Y, DVec3::X]),
        );
        rays.set_hits(vec![2.0, 9.0, 0.5], vec![true, false, true]);

        let points = rays.hit_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points.get(0), DVec3::new(0.0, 0.0, 2.0));
        assert_eq!(points.get(1), DVec3::new(1.5, 0.0, 0.0));
        assert_eq!(rays.active_directions().get(1), DVec3::X);
    }

    #[test]
    fn test_new_batch_is_fully_active() {
        let rays = RayBatch::new(Vec3Batch::zeros(3), Vec3Batch::splat(DVec3::Z, 3));
        assert!(rays.active().iter().all(|&a| a));
        assert_eq!(rays.len(), 3);
    }
}
