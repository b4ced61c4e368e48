//! Ray-torus intersection (quartic equation).
//!
//! The torus is centred at the origin with its axis along +Y:
//! (|p|² + R² - r²)² = 4R²(x² + z²), where R is the swept radius and r the
//! tube radius.

use crate::surface::Surface;
use lux_math::quartic::{is_real, solve_quartic};
use lux_math::{DVec3, HIT_RANGE, MAX_DISTANCE};

/// A torus primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus {
    swept_radius: f64,
    tube_radius: f64,
}

impl Torus {
    /// Create a new torus.
    pub fn new(swept_radius: f64, tube_radius: f64) -> Self {
        Self {
            swept_radius,
            tube_radius,
        }
    }

    pub fn swept_radius(&self) -> f64 {
        self.swept_radius
    }

    pub fn tube_radius(&self) -> f64 {
        self.tube_radius
    }

    /// Coefficients [c4, c3, c2, c1, c0] of the quartic in t along the ray.
    fn coefficients(&self, o: DVec3, d: DVec3) -> [f64; 5] {
        let r2 = self.swept_radius * self.swept_radius;
        let a2 = self.tube_radius * self.tube_radius;

        let dd = d.length_squared();
        let e = o.length_squared() - r2 - a2;
        let f = o.dot(d);
        let four_r2 = 4.0 * r2;

        [
            dd * dd,
            4.0 * dd * f,
            2.0 * dd * e + 4.0 * f * f + four_r2 * d.y * d.y,
            4.0 * f * e + 2.0 * four_r2 * o.y * d.y,
            e * e - four_r2 * (a2 - o.y * o.y),
        ]
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.swept_radius > 0.0 && self.tube_radius > 0.0 {
            Ok(())
        } else {
            Err(format!(
                "torus radii must be positive, got swept={} tube={}",
                self.swept_radius, self.tube_radius
            ))
        }
    }
}

impl Surface for Torus {
    fn distance(&self, origin: DVec3, direction: DVec3) -> f64 {
        let [c4, c3, c2, c1, c0] = self.coefficients(origin, direction);
        if c4 == 0.0 {
            return MAX_DISTANCE;
        }

        solve_quartic(c4, c3, c2, c1, c0)
            .into_iter()
            .filter(|&root| is_real(root))
            .map(|root| root.re)
            .filter(|&t| HIT_RANGE.surrounds(t))
            .fold(MAX_DISTANCE, f64::min)
    }

    fn normal(&self, p: DVec3) -> DVec3 {
        // Gradient of the implicit surface
        let r2 = self.swept_radius * self.swept_radius;
        let sum_r2 = r2 + self.tube_radius * self.tube_radius;
        let k = p.length_squared() - sum_r2;

        lux_math::normalize(DVec3::new(
            4.0 * p.x * k,
            4.0 * p.y * (k + 2.0 * r2),
            4.0 * p.z * k,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_through_hole_misses() {
        let torus = Torus::new(2.0, 0.5);
        let t = torus.distance(DVec3::new(0.0, -5.0, 0.0), DVec3::Y);
        assert_eq!(t, MAX_DISTANCE);
    }

    #[test]
    fn test_ray_through_tube_returns_nearest_root() {
        // Vertical ray through the tube centre: roots at y = -0.5 and y = 0.5
        let torus = Torus::new(2.0, 0.5);
        let origin = DVec3::new(2.0, -5.0, 0.0);

        let [c4, c3, c2, c1, c0] = torus.coefficients(origin, DVec3::Y);
        let real: Vec<f64> = solve_quartic(c4, c3, c2, c1, c0)
            .into_iter()
            .filter(|&r| is_real(r))
            .map(|r| r.re)
            .collect();
        assert_eq!(real.len(), 2);
        assert!(real.iter().all(|&t| t > 0.0));

        let t = torus.distance(origin, DVec3::Y);
        assert!((t - 4.5).abs() < 1e-6, "t = {t}");
    }

    #[test]
    fn test_ray_across_both_tubes() {
        // Along the x axis: surface at x = ±1.5 and x = ±2.5
        let torus = Torus::new(2.0, 0.5);
        let t = torus.distance(DVec3::new(-5.0, 0.0, 0.0), DVec3::X);
        assert!((t - 2.5).abs() < 1e-6, "t = {t}");
    }

    #[test]
    fn test_ray_starting_inside_tube() {
        let torus = Torus::new(2.0, 0.5);
        let t = torus.distance(DVec3::new(2.0, 0.0, 0.0), DVec3::X);
        assert!((t - 0.5).abs() < 1e-6, "t = {t}");
    }

    #[test]
    fn test_torus_normal() {
        let torus = Torus::new(2.0, 0.5);
        // Outer equator points away from the axis
        assert!((torus.normal(DVec3::new(2.5, 0.0, 0.0)) - DVec3::X).length() < 1e-9);
        // Inner equator points toward the axis
        assert!((torus.normal(DVec3::new(1.5, 0.0, 0.0)) + DVec3::X).length() < 1e-9);
        // Top of the tube points up
        assert!((torus.normal(DVec3::new(0.0, 0.5, 2.0)) - DVec3::Y).length() < 1e-9);
    }
}
