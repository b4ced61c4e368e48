//! Simple ray tracer example.
//!
//! Renders a small scene with every primitive kind and saves it as a PNG.
//!
//! Usage: `cargo run --example simple_render [config.json] [output.png]`

use std::sync::Arc;

use anyhow::Context;
use lux_core::{NoiseField, NormalMap};
use lux_math::DVec3;
use lux_renderer::{
    Camera, Color, LightSource, Material, Plane, Primitive, RenderConfig, Renderer, Scene,
    Sphere, Torus, Triangle,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config {}", path))?;
            serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path))?
        }
        None => RenderConfig {
            samples_per_pixel: 4,
            samples_per_shadow: 4,
            ..Default::default()
        },
    };
    let output = args.next().unwrap_or_else(|| "output.png".to_string());

    let start = std::time::Instant::now();
    let scene = build_scene()?;
    println!("Scene built in {:?}", start.elapsed());

    let renderer = Renderer::new(scene, config)?;
    let image = renderer.render()?;

    image
        .to_image()
        .save(&output)
        .with_context(|| format!("Failed to save {}", output))?;
    println!("Saved to {}", output);

    Ok(())
}

fn build_scene() -> anyhow::Result<Scene> {
    let camera = Camera::new(
        DVec3::new(0.0, 1.0, -6.0), // eye
        DVec3::new(0.0, 0.5, 0.0),  // look_at
        DVec3::Y,                   // up
        320,
        240,
    )?;

    let noise: Arc<dyn NoiseField> = Arc::new(lattice_noise);

    let floor = Arc::new(Material::checkerboard(Color::ONE, Color::splat(0.1), 6.0));
    let wood = Arc::new(Material::wood(noise.clone()));
    let marble = Arc::new(
        Material::turbulence(noise.clone())
            .with_specular(Color::splat(0.3))
            .with_shininess(32.0)
            .with_normal_map(NormalMap::new(8.0, 0.1, noise)),
    );
    let glass = Arc::new(Material::glass());
    let mirror = Arc::new(Material::mirror(Color::ZERO));
    let bronze = Arc::new(Material::bronze());

    let scene = Scene::builder(camera)
        .ambient(Color::splat(0.02))
        .primitive(Primitive::new(Plane::new(DVec3::Y, 1.0), floor))
        .primitive(Primitive::new(Plane::new(DVec3::NEG_Z, 8.0), wood))
        .primitive(Primitive::new(Sphere::new(DVec3::new(-2.6, 0.0, 1.5), 1.0), marble))
        .primitive(Primitive::new(Sphere::new(DVec3::new(2.6, 0.0, 1.5), 1.0), glass))
        .primitive(Primitive::new(Torus::new(1.0, 0.25), bronze))
        .primitive(Primitive::new(
            Triangle::new(
                DVec3::new(-3.0, -1.0, 6.0),
                DVec3::new(3.0, -1.0, 6.0),
                DVec3::new(0.0, 3.0, 6.0),
            ),
            mirror,
        ))
        .light(LightSource::area(
            [
                DVec3::new(1.0, 6.0, -1.0),
                DVec3::new(-1.0, 6.0, -1.0),
                DVec3::new(-1.0, 6.0, -3.0),
                DVec3::new(1.0, 6.0, -3.0),
            ],
            Color::ONE,
            2500.0,
        ))
        .light(LightSource::point(DVec3::new(-4.0, 3.0, -4.0), Color::new(1.0, 0.9, 0.8), 400.0))
        .build()?;

    Ok(scene)
}

/// Smoothly interpolated hash noise in [-1, 1].
fn lattice_noise(p: DVec3) -> f64 {
    fn hash(x: f64, y: f64, z: f64) -> f64 {
        let h = (x * 127.1 + y * 311.7 + z * 74.7).sin() * 43758.5453;
        2.0 * h.fract().abs() - 1.0
    }

    let cell = p.floor();
    let f = p - cell;
    let w = f * f * (DVec3::splat(3.0) - 2.0 * f);

    let corner = |dx: f64, dy: f64, dz: f64| hash(cell.x + dx, cell.y + dy, cell.z + dz);
    let lerp = |a: f64, b: f64, t: f64| a + (b - a) * t;

    let x00 = lerp(corner(0.0, 0.0, 0.0), corner(1.0, 0.0, 0.0), w.x);
    let x10 = lerp(corner(0.0, 1.0, 0.0), corner(1.0, 1.0, 0.0), w.x);
    let x01 = lerp(corner(0.0, 0.0, 1.0), corner(1.0, 0.0, 1.0), w.x);
    let x11 = lerp(corner(0.0, 1.0, 1.0), corner(1.0, 1.0, 1.0), w.x);
    lerp(lerp(x00, x10, w.y), lerp(x01, x11, w.y), w.z)
}
