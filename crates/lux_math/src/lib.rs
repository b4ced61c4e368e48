// Re-export glam for convenience
pub use glam::*;

// Lux math types
mod batch;
mod interval;
pub mod quartic;
mod ray;

pub use batch::{extract, normalize, place, reflect, refract, Vec3Batch};
pub use interval::Interval;
pub use ray::RayBatch;

/// Smallest distance accepted as a real intersection.
pub const EPSILON: f64 = 1e-6;

/// Sentinel distance meaning "no intersection".
///
/// Finite so that it stays neutral under `f64::min` reductions.
pub const MAX_DISTANCE: f64 = f64::MAX;

/// Refraction index of air, used as the default ambient medium.
pub const AIR_REFRACTION_INDEX: f64 = 1.000293;

/// Range of distances that count as a hit.
pub const HIT_RANGE: Interval = Interval {
    min: EPSILON,
    max: MAX_DISTANCE,
};
