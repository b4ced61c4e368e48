//! Camera for primary ray generation.

use crate::error::{SceneError, SceneResult};
use crate::gen_f64;
use log::debug;
use lux_math::{DVec2, DVec3, RayBatch, Vec3Batch, EPSILON};
use rand::RngCore;

/// Vertical framing bias applied to the screen grid.
const VERTICAL_BIAS: f64 = 0.25;

/// Pinhole camera with a precomputed screen grid.
///
/// The grid holds one eye-to-screen offset per pixel in row-major order, so
/// [`Camera::rays`] returns `width * height` rays with the top-left pixel
/// first. A camera is never mutated; moving the eye builds a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    eye: DVec3,
    look_at: DVec3,
    up: DVec3,
    width: u32,
    height: u32,

    // Derived basis
    u: DVec3,
    v: DVec3,
    direction: DVec3,

    // u·x + v·y + direction per pixel
    eye_to_screen: Vec3Batch,
}

impl Camera {
    /// Create a camera looking from `eye` towards `look_at`.
    ///
    /// Fails if the image is empty, the eye sits on the look-at point, or
    /// `up` is parallel to the view direction.
    pub fn new(eye: DVec3, look_at: DVec3, up: DVec3, width: u32, height: u32) -> SceneResult<Self> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidCamera(format!(
                "image size must be non-zero, got {}x{}",
                width, height
            )));
        }
        if !(eye.is_finite() && look_at.is_finite() && up.is_finite()) {
            return Err(SceneError::InvalidCamera(
                "eye, look-at and up must be finite".to_string(),
            ));
        }

        let forward = look_at - eye;
        if forward.length_squared() <= EPSILON * EPSILON {
            return Err(SceneError::InvalidCamera(
                "eye and look-at point coincide".to_string(),
            ));
        }
        let direction = forward.normalize();

        let side = up.cross(direction);
        if side.length_squared() <= EPSILON * EPSILON {
            return Err(SceneError::InvalidCamera(
                "up vector is parallel to the view direction".to_string(),
            ));
        }
        let u = side.normalize();
        let v = direction.cross(u);

        let aspect = width as f64 / height as f64;
        let xs = linspace(-1.0, 1.0, width as usize);
        let ys = linspace(
            1.0 / aspect + VERTICAL_BIAS,
            -1.0 / aspect + VERTICAL_BIAS,
            height as usize,
        );
        let eye_to_screen = ys
            .iter()
            .flat_map(|&y| xs.iter().map(move |&x| u * x + v * y + direction))
            .collect();

        Ok(Self {
            eye,
            look_at,
            up,
            width,
            height,
            u,
            v,
            direction,
            eye_to_screen,
        })
    }

    /// A copy of this camera with the eye moved, keeping look-at, up and size.
    pub fn with_eye(&self, eye: DVec3) -> SceneResult<Self> {
        debug!("Rebuilding camera with eye at {:?}", eye);
        Self::new(eye, self.look_at, self.up, self.width, self.height)
    }

    pub fn eye(&self) -> DVec3 {
        self.eye
    }

    pub fn look_at(&self) -> DVec3 {
        self.look_at
    }

    pub fn up(&self) -> DVec3 {
        self.up
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (and primary rays).
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Horizontal basis vector.
    pub fn u(&self) -> DVec3 {
        self.u
    }

    /// Vertical basis vector.
    pub fn v(&self) -> DVec3 {
        self.v
    }

    /// Unit view direction.
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Eye-to-screen offsets, optionally displaced by a jitter.
    pub fn screen_points(&self, jitter: Option<&Jitter>) -> Vec3Batch {
        match jitter {
            None => self.eye_to_screen.clone(),
            Some(jitter) => self
                .eye_to_screen
                .iter()
                .zip(jitter.offsets.iter())
                .map(|(&p, offset)| p + self.u * offset.x + self.v * offset.y)
                .collect(),
        }
    }

    /// Primary rays from the eye through every pixel.
    pub fn rays(&self, jitter: Option<&Jitter>) -> RayBatch {
        RayBatch::new(
            Vec3Batch::splat(self.eye, self.pixel_count()),
            self.screen_points(jitter),
        )
    }
}

/// Per-pixel sub-pixel offsets for anti-aliasing.
///
/// x lies in [0, 1/width) along the camera's u axis and y in [0, 1/height)
/// along v.
#[derive(Debug, Clone, PartialEq)]
pub struct Jitter {
    offsets: Vec<DVec2>,
}

impl Jitter {
    /// Draw an independent offset for every pixel of the camera.
    pub fn sample(camera: &Camera, rng: &mut dyn RngCore) -> Self {
        let dx = 1.0 / camera.width as f64;
        let dy = 1.0 / camera.height as f64;
        let offsets = (0..camera.pixel_count())
            .map(|_| DVec2::new(gen_f64(rng) * dx, gen_f64(rng) * dy))
            .collect();
        Self { offsets }
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count == 1 {
        return vec![start];
    }
    let step = (end - start) / (count - 1) as f64;
    (0..count).map(|i| start + step * i as f64).collect()
}
