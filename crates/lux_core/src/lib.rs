//! Lux Core - Scene description for the Lux ray tracer.
//!
//! This crate provides:
//!
//! - **Primitives**: `Sphere`, `Plane`, `Triangle`, `Torus`, each with batched
//!   intersection and normals through the `Surface` trait
//! - **Shading inputs**: `Material` (flat and procedural diffuse sources,
//!   normal maps) and `LightSource` (point and area lights)
//! - **Scene graph**: `Camera`, `Scene` and its validating `SceneBuilder`
//!
//! # Example
//!
//! ```ignore
//! use lux_core::{Camera, LightSource, Material, Primitive, Scene, Sphere};
//!
//! let camera = Camera::new(eye, look_at, up, 320, 240)?;
//! let scene = Scene::builder(camera)
//!     .primitive(Primitive::new(Sphere::new(center, 1.0), Material::flat(red).into()))
//!     .light(LightSource::point(light_pos, Color::ONE, 100.0))
//!     .build()?;
//! ```

pub mod camera;
pub mod error;
pub mod light;
pub mod material;
pub mod plane;
pub mod primitive;
pub mod scene;
pub mod sphere;
pub mod surface;
pub mod torus;
pub mod triangle;

// Re-export commonly used types
pub use camera::{Camera, Jitter};
pub use error::{SceneError, SceneResult};
pub use light::LightSource;
pub use material::{Color, ColorBatch, DiffuseSource, Material, NoiseField, NormalMap};
pub use plane::Plane;
pub use primitive::{Primitive, Shape};
pub use scene::{Scene, SceneBuilder};
pub use sphere::Sphere;
pub use surface::Surface;
pub use torus::Torus;
pub use triangle::Triangle;

use rand::{Rng, RngCore};

/// Uniform sample in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}
