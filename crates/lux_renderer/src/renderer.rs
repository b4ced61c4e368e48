//! Sample scheduling and image output.
//!
//! Implements the outer loop of the tracer:
//! - Anti-aliasing via jittered sample passes
//! - Depth of field via lens-disk eye displacement
//! - Parallel sample execution and averaging
//! - 8-bit quantization

use std::time::Instant;

use image::{Rgb, RgbImage};
use log::info;
use lux_core::{Color, ColorBatch, Jitter, Scene};
use lux_math::{DVec3, Interval};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::RenderConfig;
use crate::error::RenderResult;
use crate::executor::SampleExecutor;
use crate::tracer::Tracer;

/// Renders a scene with a fixed configuration.
#[derive(Debug, Clone)]
pub struct Renderer {
    scene: Scene,
    config: RenderConfig,
}

impl Renderer {
    /// Create a renderer, rejecting unusable configurations.
    pub fn new(scene: Scene, config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        Ok(Self { scene, config })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render the image.
    ///
    /// Runs `samples_per_pixel` independent passes in parallel and averages
    /// them. Any failing pass aborts the render.
    pub fn render(&self) -> RenderResult<ImageBuffer> {
        let (width, height) = self.scene.resolution();
        let samples = self.config.samples_per_pixel as usize;
        let workers = self
            .config
            .max_workers
            .unwrap_or_else(SampleExecutor::default_worker_cap);
        let base_seed = self.config.seed.unwrap_or_else(rand::random);

        info!(
            "Rendering {}x{} @ {} spp ({} shadow samples, {} lens samples) on up to {} workers",
            width,
            height,
            samples,
            self.config.samples_per_shadow,
            self.config.depth_complexity,
            workers
        );
        let start = Instant::now();

        let executor = SampleExecutor::new(workers);
        let pixels = executor.run(samples, self.scene.camera().pixel_count(), |index| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(index as u64));
            self.render_sample(&mut rng)
        })?;

        info!("Rendered in {:.2?}", start.elapsed());
        Ok(ImageBuffer::new(width, height, pixels))
    }

    /// One jittered pass over every pixel.
    ///
    /// With `depth_complexity > 1` the pass is itself the mean of several
    /// sub-passes, each seen from a different point on the lens disk. The
    /// same jitter is reused for every sub-pass.
    pub fn render_sample(&self, rng: &mut dyn RngCore) -> RenderResult<ColorBatch> {
        let camera = self.scene.camera();
        let tracer = Tracer::new(&self.scene, &self.config);
        let jitter = Jitter::sample(camera, rng);

        let passes = self.config.depth_complexity;
        if passes <= 1 {
            return Ok(tracer.trace(camera.rays(Some(&jitter)), 0, rng));
        }

        let radius = self.config.lens_radius();
        let mut color = ColorBatch::zeros(camera.pixel_count());
        for _ in 0..passes {
            let p = random_in_unit_disk(rng) * radius;
            let lens = camera.with_eye(camera.eye() + camera.u() * p.x + camera.v() * p.y)?;
            color += &tracer.trace(lens.rays(Some(&jitter)), 0, rng);
        }
        Ok(color * (1.0 / passes as f64))
    }
}

/// Generate a random point in the unit disk (z = 0).
fn random_in_unit_disk(rng: &mut dyn RngCore) -> DVec3 {
    loop {
        let p = DVec3::new(
            lux_core::gen_f64(rng) * 2.0 - 1.0,
            lux_core::gen_f64(rng) * 2.0 - 1.0,
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f64) -> f64 {
    Interval::UNIT.clamp(x)
}

/// Convert a linear color to 8-bit RGB by clamping and truncating.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [
        (255.0 * clamp_01(color.x)) as u8,
        (255.0 * clamp_01(color.y)) as u8,
        (255.0 * clamp_01(color.z)) as u8,
    ]
}

/// Linear render output, one color per pixel in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: ColorBatch,
}

impl ImageBuffer {
    pub fn new(width: u32, height: u32, pixels: ColorBatch) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels.get(y as usize * self.width as usize + x as usize)
    }

    /// Interleaved RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in self.pixels.iter() {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }

    /// One 8-bit plane per channel, each `height * width` long.
    pub fn channel_planes(&self) -> [Vec<u8>; 3] {
        let mut planes = [
            Vec::with_capacity(self.pixels.len()),
            Vec::with_capacity(self.pixels.len()),
            Vec::with_capacity(self.pixels.len()),
        ];
        for color in self.pixels.iter() {
            let [r, g, b] = color_to_rgb(*color);
            planes[0].push(r);
            planes[1].push(g);
            planes[2].push(b);
        }
        planes
    }

    /// Convert to an `image` buffer for encoding.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| Rgb(color_to_rgb(self.get(x, y))))
    }
}
