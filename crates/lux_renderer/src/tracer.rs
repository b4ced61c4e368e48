//! Recursive batched ray tracing.
//!
//! A whole batch of rays is intersected against every primitive at once.
//! Each primitive then shades the compressed subset of rays it owns, spawns
//! reflected and refracted batches for that subset, and the results are
//! scattered back into a full-size color batch.

use std::f64::consts::PI;

use lux_core::{ColorBatch, Primitive, Scene, Surface};
use lux_math::{RayBatch, Vec3Batch, MAX_DISTANCE};
use rand::RngCore;

use crate::config::RenderConfig;
use crate::shading::brdf;

/// Offset along the normal for rays leaving a surface.
pub const SHADOW_BIAS: f64 = 1e-4;

/// Traces ray batches through a scene.
pub struct Tracer<'a> {
    scene: &'a Scene,
    config: &'a RenderConfig,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, config: &'a RenderConfig) -> Self {
        Self { scene, config }
    }

    /// Color seen along every ray of the batch.
    ///
    /// `depth` counts the bounces taken so far; batches deeper than
    /// `max_depth` come back black.
    pub fn trace(&self, mut rays: RayBatch, depth: u32, rng: &mut dyn RngCore) -> ColorBatch {
        let count = rays.len();
        let mut color = ColorBatch::zeros(count);
        if rays.is_empty() || depth > self.config.max_depth {
            return color;
        }

        let primitives = self.scene.primitives();
        let distances: Vec<Vec<f64>> = primitives.iter().map(|p| p.intersect(&rays)).collect();
        let nearest = nearest_distances(&distances, count);

        // Each ray belongs to the first primitive reaching the nearest distance
        let mut claimed = vec![false; count];
        for (index, (primitive, distance)) in primitives.iter().zip(&distances).enumerate() {
            let mask: Vec<bool> = (0..count)
                .map(|i| !claimed[i] && nearest[i] != MAX_DISTANCE && distance[i] == nearest[i])
                .collect();
            if !mask.iter().any(|&hit| hit) {
                continue;
            }
            for (owned, &hit) in claimed.iter_mut().zip(&mask) {
                *owned |= hit;
            }

            rays.set_hits(nearest.clone(), mask.clone());
            let shaded = self.shade(index, primitive, &rays, depth, rng);
            color += &shaded.place(&mask);
        }

        color
    }

    /// Shade the active rays of `rays`, all of which hit `primitive`.
    fn shade(
        &self,
        index: usize,
        primitive: &Primitive,
        rays: &RayBatch,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> ColorBatch {
        let material = primitive.material();
        let points = rays.hit_points();
        let directions = rays.active_directions();
        let count = points.len();

        let mut normals = primitive.normal_at(&points);
        if let Some(normal_map) = material.normal_map() {
            normals = normal_map.perturb(&normals, &points);
        }
        let offset_points = &points + &(&normals * SHADOW_BIAS);
        // Reversed incoming direction rather than the vector to the camera eye.
        // The two agree for primary rays and differ after a bounce.
        let view_dir = -&directions;
        let (diffuse, specular) = material.colors(&points);

        let ambient = ColorBatch::splat(self.scene.ambient(), count);
        let shadow_samples = self.config.samples_per_shadow.max(1);
        let mut color = ColorBatch::zeros(count);

        for light in self.scene.lights() {
            let mut contribution = ColorBatch::zeros(count);
            for _ in 0..shadow_samples {
                contribution += &ambient;

                let position = light.sample_position(rng);
                let to_light = points.map(|p| position - p);
                let light_distance = to_light.magnitude();
                let light_dir = to_light.normalized();

                let lit = self.visibility(index, &offset_points, &light_dir, &light_distance);
                let cosines = normals.dot(&light_dir);

                let response = brdf(
                    &light_dir,
                    &view_dir,
                    &normals,
                    &diffuse,
                    specular,
                    material.shininess(),
                    self.config.specular_model,
                );

                let weights: Vec<f64> = (0..count)
                    .map(|i| {
                        if !lit[i] {
                            return 0.0;
                        }
                        let d = light_distance[i];
                        cosines[i].max(0.0) * light.watts() / (PI * d * d)
                    })
                    .collect();
                contribution += &response.scale(&weights);
            }
            color += &(contribution * (1.0 / shadow_samples as f64));
        }

        if depth < self.config.max_depth {
            if material.has_reflectivity() {
                let reflected = RayBatch::new(offset_points.clone(), view_dir.reflect(&normals));
                let bounce = self.trace(reflected, depth + 1, rng);
                color += &(bounce * material.reflectivity());
            }

            let ambient_index = self.config.ambient_refraction_index;
            if material.refraction_index() != ambient_index {
                let refracted = RayBatch::new(
                    points,
                    directions.refract(&normals, ambient_index, material.refraction_index()),
                );
                color += &self.trace(refracted, depth + 1, rng);
            }
        }

        color
    }

    /// Whether each point sees the light.
    ///
    /// A point is lit if its own primitive is the nearest thing along the
    /// shadow ray, or if the nearest obstruction lies past the light.
    fn visibility(
        &self,
        own: usize,
        origins: &Vec3Batch,
        light_dir: &Vec3Batch,
        light_distance: &[f64],
    ) -> Vec<bool> {
        let shadow_rays = RayBatch::new(origins.clone(), light_dir.clone());
        let distances: Vec<Vec<f64>> = self
            .scene
            .primitives()
            .iter()
            .map(|p| p.intersect(&shadow_rays))
            .collect();
        let nearest = nearest_distances(&distances, shadow_rays.len());

        (0..shadow_rays.len())
            .map(|i| distances[own][i] == nearest[i] || nearest[i] > light_distance[i])
            .collect()
    }
}

/// Element-wise minimum over every primitive's distances.
fn nearest_distances(distances: &[Vec<f64>], count: usize) -> Vec<f64> {
    distances.iter().fold(vec![MAX_DISTANCE; count], |mut nearest, d| {
        for (n, &t) in nearest.iter_mut().zip(d) {
            *n = n.min(t);
        }
        nearest
    })
}
