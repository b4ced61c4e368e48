//! Light sources.

use crate::gen_f64;
use crate::material::Color;
use lux_math::DVec3;
use rand::RngCore;

/// A light that illuminates the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightSource {
    /// A light emitting from a single point.
    Point {
        position: DVec3,
        color: Color,
        watts: f64,
    },

    /// A quadrilateral emitter. Every position query returns a new random
    /// point on it, which is what makes shadows soft.
    Area {
        vertices: [DVec3; 4],
        color: Color,
        watts: f64,
    },
}

impl LightSource {
    pub fn point(position: DVec3, color: Color, watts: f64) -> Self {
        LightSource::Point {
            position,
            color,
            watts,
        }
    }

    /// Create an area light from its four corners, in order.
    pub fn area(vertices: [DVec3; 4], color: Color, watts: f64) -> Self {
        LightSource::Area {
            vertices,
            color,
            watts,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            LightSource::Point { color, .. } | LightSource::Area { color, .. } => *color,
        }
    }

    pub fn watts(&self) -> f64 {
        match self {
            LightSource::Point { watts, .. } | LightSource::Area { watts, .. } => *watts,
        }
    }

    /// Position to shade against.
    ///
    /// Point lights always return their position. Area lights return
    /// `v2 + r1·(v0 - v1) + r2·(v0 - v3)` for fresh uniform r1, r2.
    pub fn sample_position(&self, rng: &mut dyn RngCore) -> DVec3 {
        match self {
            LightSource::Point { position, .. } => *position,
            LightSource::Area { vertices, .. } => {
                let [v0, v1, v2, v3] = *vertices;
                let r1 = gen_f64(rng);
                let r2 = gen_f64(rng);
                v2 + r1 * (v0 - v1) + r2 * (v0 - v3)
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let watts = self.watts();
        if !(watts >= 0.0 && watts.is_finite()) {
            return Err(format!("watts must be finite and >= 0, got {}", watts));
        }
        if let LightSource::Area { vertices, .. } = self {
            let [v0, v1, _, v3] = *vertices;
            if (v0 - v1).cross(v0 - v3).length_squared() == 0.0 {
                return Err("area light has zero extent".to_string());
            }
        }
        Ok(())
    }
}
