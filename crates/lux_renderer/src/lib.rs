//! Lux Renderer - batched recursive CPU ray tracing
//!
//! A Whitted-style ray tracer that processes every pixel of a sample pass
//! as one batch:
//! - Soft shadows from sampled area lights
//! - Mirror reflection and refraction up to a bounce limit
//! - Jittered anti-aliasing and lens-disk depth of field
//! - Sample passes run in parallel on a rayon pool

mod config;
mod error;
mod executor;
mod renderer;
mod shading;
mod tracer;

pub use config::{RenderConfig, SpecularModel};
pub use error::{RenderError, RenderResult};
pub use executor::{SampleExecutor, SampleStore};
pub use renderer::{clamp_01, color_to_rgb, ImageBuffer, Renderer};
pub use shading::brdf;
pub use tracer::{Tracer, SHADOW_BIAS};

/// Re-export scene types from lux_core
pub use lux_core::{
    Camera, Color, ColorBatch, LightSource, Material, Plane, Primitive, Scene, SceneBuilder,
    SceneError, Sphere, Torus, Triangle,
};
