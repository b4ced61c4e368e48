//! Local reflectance model.
//!
//! Normalized Lambert diffuse plus an energy-normalized Phong or
//! Blinn-Phong lobe.

use std::f64::consts::PI;

use lux_core::{Color, ColorBatch};
use lux_math::{normalize, reflect, Vec3Batch};

use crate::config::SpecularModel;

/// Evaluate the BRDF for every shading point.
///
/// `light_dir` points from the surface to the light and `view_dir` from the
/// surface to the viewer; both are unit length, as are `normals`.
pub fn brdf(
    light_dir: &Vec3Batch,
    view_dir: &Vec3Batch,
    normals: &Vec3Batch,
    diffuse: &ColorBatch,
    specular: Color,
    shininess: f64,
    model: SpecularModel,
) -> ColorBatch {
    let specular_scale = specular * (shininess + 2.0) / (2.0 * PI);

    diffuse
        .iter()
        .zip(light_dir.iter())
        .zip(view_dir.iter())
        .zip(normals.iter())
        .map(|(((&kd, &l), &v), &n)| {
            let alpha = match model {
                SpecularModel::Phong => reflect(l, n).dot(v),
                SpecularModel::BlinnPhong => normalize(l + v).dot(n),
            }
            .max(0.0);
            kd / PI + specular_scale * alpha.powf(shininess)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_math::DVec3;

    fn single(v: DVec3) -> Vec3Batch {
        Vec3Batch::splat(v, 1)
    }

    #[test]
    fn test_diffuse_only() {
        let kd = Color::new(0.2, 0.4, 0.6);
        for model in [SpecularModel::Phong, SpecularModel::BlinnPhong] {
            let out = brdf(
                &single(DVec3::Y),
                &single(DVec3::new(1.0, 1.0, 0.0).normalize()),
                &single(DVec3::Y),
                &single(kd),
                Color::ZERO,
                32.0,
                model,
            );
            assert!((out.get(0) - kd / PI).length() < 1e-12);
        }
    }

    #[test]
    fn test_specular_peak() {
        // Light, view and normal aligned: both lobes peak at (n + 2) / 2π
        let ks = Color::ONE;
        let expected = Color::splat(0.5 / PI) + ks * 12.0 / (2.0 * PI);
        for model in [SpecularModel::Phong, SpecularModel::BlinnPhong] {
            let out = brdf(
                &single(DVec3::Z),
                &single(DVec3::Z),
                &single(DVec3::Z),
                &single(Color::splat(0.5)),
                ks,
                10.0,
                model,
            );
            assert!((out.get(0) - expected).length() < 1e-9);
        }
    }

    #[test]
    fn test_models_differ_off_peak() {
        let l = single(DVec3::new(1.0, 1.0, 0.0).normalize());
        let v = single(DVec3::Y);
        let n = single(DVec3::Y);
        let kd = single(Color::ZERO);

        // Phong: reflect(l, n) = (-1, 1, 0)/√2, so alpha = cos 45°
        let phong = brdf(&l, &v, &n, &kd, Color::ONE, 2.0, SpecularModel::Phong);
        let want = 4.0 * 0.5 / (2.0 * PI);
        assert!((phong.get(0).x - want).abs() < 1e-9);

        // Blinn-Phong: half vector at 22.5° from n
        let blinn = brdf(&l, &v, &n, &kd, Color::ONE, 2.0, SpecularModel::BlinnPhong);
        let cos = (PI / 8.0).cos();
        let want = 4.0 * cos * cos / (2.0 * PI);
        assert!((blinn.get(0).x - want).abs() < 1e-9);
    }

    #[test]
    fn test_back_facing_lobe_is_clamped() {
        let out = brdf(
            &single(DVec3::NEG_Z),
            &single(DVec3::Z),
            &single(DVec3::Z),
            &single(Color::ZERO),
            Color::ONE,
            4.0,
            SpecularModel::Phong,
        );
        assert_eq!(out.get(0), Color::ZERO);
    }
}
