//! Scene description for rendering.
//!
//! A [`Scene`] is assembled once with a [`SceneBuilder`], validated, and then
//! shared read-only by every render worker.

use log::{info, warn};

use crate::camera::Camera;
use crate::error::{SceneError, SceneResult};
use crate::light::LightSource;
use crate::material::Color;
use crate::primitive::Primitive;

/// Everything needed to render an image.
///
/// Primitive order matters: when two primitives are hit at exactly the same
/// distance, the one added first wins.
#[derive(Debug, Clone)]
pub struct Scene {
    camera: Camera,
    primitives: Vec<Primitive>,
    lights: Vec<LightSource>,
    ambient: Color,
}

impl Scene {
    /// Start building a scene viewed through `camera`.
    pub fn builder(camera: Camera) -> SceneBuilder {
        SceneBuilder {
            camera,
            primitives: Vec::new(),
            lights: Vec::new(),
            ambient: Color::ZERO,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    /// Ambient color added to every lit sample.
    pub fn ambient(&self) -> Color {
        self.ambient
    }

    /// Width and height of the rendered image.
    pub fn resolution(&self) -> (u32, u32) {
        (self.camera.width(), self.camera.height())
    }
}

/// Incrementally assembles a [`Scene`].
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    camera: Camera,
    primitives: Vec<Primitive>,
    lights: Vec<LightSource>,
    ambient: Color,
}

impl SceneBuilder {
    /// Set the ambient color (black by default).
    pub fn ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    /// Append a primitive.
    pub fn primitive(mut self, primitive: Primitive) -> Self {
        self.primitives.push(primitive);
        self
    }

    /// Append several primitives, keeping their order.
    pub fn primitives(mut self, primitives: impl IntoIterator<Item = Primitive>) -> Self {
        self.primitives.extend(primitives);
        self
    }

    /// Append a light.
    pub fn light(mut self, light: LightSource) -> Self {
        self.lights.push(light);
        self
    }

    /// Validate every primitive, material and light and produce the scene.
    pub fn build(self) -> SceneResult<Scene> {
        for (index, primitive) in self.primitives.iter().enumerate() {
            primitive
                .shape()
                .validate()
                .map_err(|reason| SceneError::InvalidPrimitive { index, reason })?;
            primitive
                .material()
                .validate()
                .map_err(|reason| SceneError::InvalidMaterial { index, reason })?;
        }
        for (index, light) in self.lights.iter().enumerate() {
            light
                .validate()
                .map_err(|reason| SceneError::InvalidLight { index, reason })?;
        }

        if self.primitives.is_empty() {
            warn!("Scene has no primitives; every pixel will be black");
        }
        if self.lights.is_empty() {
            warn!("Scene has no lights; only reflections and refractions will be visible");
        }

        info!(
            "Scene built: {} primitives, {} lights, {}x{}",
            self.primitives.len(),
            self.lights.len(),
            self.camera.width(),
            self.camera.height()
        );

        Ok(Scene {
            camera: self.camera,
            primitives: self.primitives,
            lights: self.lights,
            ambient: self.ambient,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Plane, Sphere};
    use lux_math::DVec3;
    use std::sync::Arc;

    fn camera() -> Camera {
        Camera::new(DVec3::ZERO, DVec3::Z, DVec3::Y, 4, 4).unwrap()
    }

    #[test]
    fn test_build_keeps_order() {
        let red = Arc::new(Material::flat(Color::new(1.0, 0.0, 0.0)));
        let scene = Scene::builder(camera())
            .ambient(Color::splat(0.1))
            .primitive(Primitive::new(Sphere::new(DVec3::new(0.0, 0.0, 5.0), 1.0), red.clone()))
            .primitive(Primitive::new(Plane::new(DVec3::Y, 1.0), red))
            .light(LightSource::point(DVec3::Y, Color::ONE, 10.0))
            .build()
            .unwrap();

        assert_eq!(scene.primitives().len(), 2);
        assert_eq!(scene.primitives()[1].shape().kind(), "plane");
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.ambient(), Color::splat(0.1));
        assert_eq!(scene.resolution(), (4, 4));
    }

    #[test]
    fn test_build_reports_bad_primitive_index() {
        let material = Arc::new(Material::default());
        let err = Scene::builder(camera())
            .primitive(Primitive::new(Sphere::new(DVec3::ZERO, 1.0), material.clone()))
            .primitive(Primitive::new(Sphere::new(DVec3::ZERO, -2.0), material))
            .build()
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidPrimitive { index: 1, .. }));
    }

    #[test]
    fn test_build_reports_bad_material_and_light() {
        let bad = Arc::new(Material::default().with_reflectivity(2.0));
        let err = Scene::builder(camera())
            .primitive(Primitive::new(Sphere::new(DVec3::ZERO, 1.0), bad))
            .build()
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidMaterial { index: 0, .. }));

        let err = Scene::builder(camera())
            .light(LightSource::point(DVec3::ZERO, Color::ONE, f64::NAN))
            .build()
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidLight { index: 0, .. }));
    }

    #[test]
    fn test_empty_scene_is_valid() {
        let _ = env_logger::builder().is_test(true).try_init();
        let scene = Scene::builder(camera()).build().unwrap();
        assert!(scene.primitives().is_empty());
        assert_eq!(scene.ambient(), Color::ZERO);
    }
}
