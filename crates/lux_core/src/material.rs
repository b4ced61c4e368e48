//! Materials: what a surface looks like at a point.
//!
//! A material supplies the diffuse color (flat or procedural), a specular
//! color and the scalar parameters the shader needs (shininess,
//! reflectivity, refraction index). Procedural sources read an external
//! coherent-noise field through the [`NoiseField`] trait.

use std::fmt;
use std::sync::Arc;

use lux_math::{DVec3, Interval, Vec3Batch, AIR_REFRACTION_INDEX};

/// Color type alias (RGB values typically 0-1)
pub type Color = DVec3;

/// One color per ray.
pub type ColorBatch = Vec3Batch;

/// A scalar noise field sampled at a point in space.
///
/// Implemented for any `Fn(DVec3) -> f64`, so callers can plug in whatever
/// noise generator they use.
pub trait NoiseField: Send + Sync {
    fn sample(&self, point: DVec3) -> f64;
}

impl<F> NoiseField for F
where
    F: Fn(DVec3) -> f64 + Send + Sync,
{
    fn sample(&self, point: DVec3) -> f64 {
        self(point)
    }
}

impl fmt::Debug for dyn NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NoiseField")
    }
}

/// Where a material's diffuse color comes from.
#[derive(Debug, Clone)]
pub enum DiffuseSource {
    /// The same color everywhere.
    Flat(Color),

    /// A 3-D checker pattern: `color1` where sin(sx)·sin(sy)·sin(sz) < 0.
    Checkerboard {
        color1: Color,
        color2: Color,
        scale: f64,
    },

    /// Wood rings from the fractional part of amplified noise.
    Wood {
        color1: Color,
        color2: Color,
        scale: f64,
        noise: Arc<dyn NoiseField>,
    },

    /// Multi-octave turbulence.
    Turbulence {
        color1: Color,
        color2: Color,
        scale: f64,
        octaves: u32,
        noise: Arc<dyn NoiseField>,
    },
}

impl DiffuseSource {
    /// Diffuse color at every point of the batch.
    pub fn colors_at(&self, points: &Vec3Batch) -> ColorBatch {
        match self {
            DiffuseSource::Flat(color) => ColorBatch::splat(*color, points.len()),
            DiffuseSource::Checkerboard {
                color1,
                color2,
                scale,
            } => points.map(|p| {
                let s = p * *scale;
                if s.x.sin() * s.y.sin() * s.z.sin() < 0.0 {
                    *color1
                } else {
                    *color2
                }
            }),
            DiffuseSource::Wood {
                color1,
                color2,
                scale,
                noise,
            } => points.map(|p| {
                let f = (noise.sample(p * *scale) * 5.0).fract();
                blend(*color1, *color2, f)
            }),
            DiffuseSource::Turbulence {
                color1,
                color2,
                scale,
                octaves,
                noise,
            } => points.map(|p| {
                let f = octave_noise(noise.as_ref(), p * *scale, *octaves, 0.5);
                blend(*color1, *color2, f)
            }),
        }
    }
}

/// color1·f + color2·(1 - f)
#[inline]
fn blend(color1: Color, color2: Color, f: f64) -> Color {
    color1 * f + color2 * (1.0 - f)
}

/// Sum `octaves` copies of the noise at doubling frequency and decaying
/// amplitude, then map the [-1, 1] result into [0, 1].
fn octave_noise(noise: &dyn NoiseField, point: DVec3, octaves: u32, persistence: f64) -> f64 {
    let mut total = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;
    let mut max_amplitude = 0.0;

    for _ in 0..octaves.max(1) {
        total += noise.sample(point * frequency) * amplitude;
        max_amplitude += amplitude;
        frequency *= 2.0;
        amplitude *= persistence;
    }

    0.5 * (total / max_amplitude) + 0.5
}

/// Bumps normals with a noise field.
#[derive(Debug, Clone)]
pub struct NormalMap {
    scale: f64,
    amount: f64,
    noise: Arc<dyn NoiseField>,
}

impl NormalMap {
    pub fn new(scale: f64, amount: f64, noise: Arc<dyn NoiseField>) -> Self {
        Self {
            scale,
            amount,
            noise,
        }
    }

    /// normalize(n + noise(scale·p)·amount·(1, 1, 1)) for every entry.
    pub fn perturb(&self, normals: &Vec3Batch, points: &Vec3Batch) -> Vec3Batch {
        normals
            .zip_map(points, |n, p| {
                n + DVec3::splat(self.noise.sample(p * self.scale) * self.amount)
            })
            .normalized()
    }
}

/// Surface appearance shared read-only by every primitive that uses it.
#[derive(Debug, Clone)]
pub struct Material {
    diffuse: DiffuseSource,
    specular: Color,
    shininess: f64,
    reflectivity: f64,
    refraction_index: f64,
    normal_map: Option<NormalMap>,
}

impl Material {
    /// Create a material with the given diffuse source and no specular,
    /// reflection or refraction.
    pub fn new(diffuse: DiffuseSource) -> Self {
        Self {
            diffuse,
            specular: Color::ZERO,
            shininess: 0.0,
            reflectivity: 0.0,
            refraction_index: AIR_REFRACTION_INDEX,
            normal_map: None,
        }
    }

    /// A plain colored material.
    pub fn flat(color: Color) -> Self {
        Self::new(DiffuseSource::Flat(color))
    }

    pub fn checkerboard(color1: Color, color2: Color, scale: f64) -> Self {
        Self::new(DiffuseSource::Checkerboard {
            color1,
            color2,
            scale,
        })
    }

    /// Dark and light brown wood rings.
    pub fn wood(noise: Arc<dyn NoiseField>) -> Self {
        Self::new(DiffuseSource::Wood {
            color1: Color::new(0.1043, 0.0737, 0.0517),
            color2: Color::new(0.4215, 0.2686, 0.1888),
            scale: 10.0,
            noise,
        })
    }

    /// White and blue four-octave turbulence.
    pub fn turbulence(noise: Arc<dyn NoiseField>) -> Self {
        Self::new(DiffuseSource::Turbulence {
            color1: Color::ONE,
            color2: Color::new(0.0, 0.0, 1.0),
            scale: 8.0,
            octaves: 4,
            noise,
        })
    }

    pub fn glass() -> Self {
        Self::flat(Color::splat(0.1))
            .with_specular(Color::splat(0.05))
            .with_shininess(96.0)
            .with_refraction_index(1.1)
    }

    pub fn mirror(color: Color) -> Self {
        Self::flat(color)
            .with_specular(Color::splat(0.05))
            .with_shininess(200.0)
            .with_reflectivity(1.0)
    }

    pub fn bronze() -> Self {
        Self::flat(Color::new(0.714, 0.4284, 0.18144))
            .with_specular(Color::new(0.393548, 0.271906, 0.166721))
            .with_shininess(25.6)
            .with_reflectivity(1.0)
    }

    pub fn with_specular(mut self, specular: Color) -> Self {
        self.specular = specular;
        self
    }

    pub fn with_shininess(mut self, shininess: f64) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_reflectivity(mut self, reflectivity: f64) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    pub fn with_refraction_index(mut self, refraction_index: f64) -> Self {
        self.refraction_index = refraction_index;
        self
    }

    pub fn with_normal_map(mut self, normal_map: NormalMap) -> Self {
        self.normal_map = Some(normal_map);
        self
    }

    /// Diffuse colors at the given points and the (uniform) specular color.
    pub fn colors(&self, points: &Vec3Batch) -> (ColorBatch, Color) {
        (self.diffuse.colors_at(points), self.specular)
    }

    pub fn diffuse(&self) -> &DiffuseSource {
        &self.diffuse
    }

    pub fn specular(&self) -> Color {
        self.specular
    }

    pub fn shininess(&self) -> f64 {
        self.shininess
    }

    pub fn reflectivity(&self) -> f64 {
        self.reflectivity
    }

    pub fn has_reflectivity(&self) -> bool {
        self.reflectivity != 0.0
    }

    pub fn refraction_index(&self) -> f64 {
        self.refraction_index
    }

    pub fn normal_map(&self) -> Option<&NormalMap> {
        self.normal_map.as_ref()
    }

    /// Check the scalar parameters, returning the reason the material is
    /// unusable.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.shininess >= 0.0) {
            return Err(format!("shininess must be >= 0, got {}", self.shininess));
        }
        if !Interval::UNIT.contains(self.reflectivity) {
            return Err(format!(
                "reflectivity must be within [0, 1], got {}",
                self.reflectivity
            ));
        }
        if !(self.refraction_index > 0.0) {
            return Err(format!(
                "refraction index must be positive, got {}",
                self.refraction_index
            ));
        }
        Ok(())
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::flat(Color::splat(0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec3Batch {
        Vec3Batch::new(vec![
            DVec3::new(0.1, 0.1, 0.1),
            DVec3::new(-0.1, 0.1, 0.1),
            DVec3::new(0.3, -0.2, 0.4),
        ])
    }

    #[test]
    fn test_flat_ignores_point() {
        let material = Material::flat(Color::new(0.2, 0.4, 0.6)).with_specular(Color::ONE);
        let (diffuse, specular) = material.colors(&points());
        assert_eq!(diffuse.len(), 3);
        assert!(diffuse.iter().all(|&c| c == Color::new(0.2, 0.4, 0.6)));
        assert_eq!(specular, Color::ONE);
    }

    #[test]
    fn test_checkerboard_alternates() {
        let white = Color::ONE;
        let black = Color::ZERO;
        let material = Material::checkerboard(white, black, 6.0);
        let (diffuse, _) = material.colors(&points());

        // All-positive sines give color2, one negative sine gives color1
        assert_eq!(diffuse.get(0), black);
        assert_eq!(diffuse.get(1), white);
        assert_eq!(diffuse.get(2), white);
    }

    #[test]
    fn test_wood_uses_fractional_noise() {
        let noise: Arc<dyn NoiseField> = Arc::new(|_p: DVec3| 0.25);
        let source = DiffuseSource::Wood {
            color1: Color::ONE,
            color2: Color::ZERO,
            scale: 10.0,
            noise,
        };
        // 0.25 * 5 = 1.25 -> 0.25
        let colors = source.colors_at(&points());
        assert!((colors.get(0) - Color::splat(0.25)).length() < 1e-12);
    }

    #[test]
    fn test_turbulence_maps_noise_into_unit_range() {
        let noise: Arc<dyn NoiseField> = Arc::new(|_p: DVec3| 1.0);
        let material = Material::turbulence(noise);
        let (colors, _) = material.colors(&points());
        // Full-strength noise selects color1
        assert!((colors.get(1) - Color::ONE).length() < 1e-12);

        let noise: Arc<dyn NoiseField> = Arc::new(|_p: DVec3| -1.0);
        let (colors, _) = Material::turbulence(noise).colors(&points());
        assert!((colors.get(1) - Color::new(0.0, 0.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_normal_map_perturbs_and_normalizes() {
        let noise: Arc<dyn NoiseField> = Arc::new(|_p: DVec3| 1.0);
        let map = NormalMap::new(2.0, 0.5, noise);
        let normals = Vec3Batch::splat(DVec3::Y, 1);
        let bumped = map.perturb(&normals, &Vec3Batch::zeros(1));
        let expected = DVec3::new(0.5, 1.5, 0.5).normalize();
        assert!((bumped.get(0) - expected).length() < 1e-12);
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(Material::glass().validate().is_ok());
        assert!(Material::mirror(Color::ZERO).validate().is_ok());
        assert!(Material::bronze().validate().is_ok());
        assert_eq!(Material::default().refraction_index(), AIR_REFRACTION_INDEX);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(Material::default().with_reflectivity(1.5).validate().is_err());
        assert!(Material::default().with_reflectivity(-0.1).validate().is_err());
        assert!(Material::default().with_reflectivity(f64::NAN).validate().is_err());
        assert!(Material::default().with_reflectivity(1.0).validate().is_ok());
        assert!(Material::default().with_shininess(-1.0).validate().is_err());
        assert!(Material::default().with_refraction_index(0.0).validate().is_err());
    }
}
