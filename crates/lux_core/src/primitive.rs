//! Primitives: a shape paired with the material it is shaded with.

use std::sync::Arc;

use crate::material::Material;
use crate::surface::Surface;
use crate::{Plane, Sphere, Torus, Triangle};
use lux_math::DVec3;

/// The closed set of shapes the tracer knows how to intersect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
    Torus(Torus),
}

impl Shape {
    /// Short name of the shape kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Sphere(_) => "sphere",
            Shape::Plane(_) => "plane",
            Shape::Triangle(_) => "triangle",
            Shape::Torus(_) => "torus",
        }
    }

    /// Check the shape's parameters, returning the reason it is unusable.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Shape::Sphere(s) => s.validate(),
            Shape::Plane(p) => p.validate(),
            Shape::Triangle(t) => t.validate(),
            Shape::Torus(t) => t.validate(),
        }
    }
}

impl Surface for Shape {
    fn distance(&self, origin: DVec3, direction: DVec3) -> f64 {
        match self {
            Shape::Sphere(s) => s.distance(origin, direction),
            Shape::Plane(p) => p.distance(origin, direction),
            Shape::Triangle(t) => t.distance(origin, direction),
            Shape::Torus(t) => t.distance(origin, direction),
        }
    }

    fn normal(&self, point: DVec3) -> DVec3 {
        match self {
            Shape::Sphere(s) => s.normal(point),
            Shape::Plane(p) => p.normal(point),
            Shape::Triangle(t) => t.normal(point),
            Shape::Torus(t) => t.normal(point),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

impl From<Torus> for Shape {
    fn from(torus: Torus) -> Self {
        Shape::Torus(torus)
    }
}

/// A shape and its material.
///
/// The material is fixed when the primitive is created and shared read-only
/// with every worker.
#[derive(Debug, Clone)]
pub struct Primitive {
    shape: Shape,
    material: Arc<Material>,
}

impl Primitive {
    /// Create a new primitive.
    pub fn new(shape: impl Into<Shape>, material: Arc<Material>) -> Self {
        Self {
            shape: shape.into(),
            material,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Surface for Primitive {
    fn distance(&self, origin: DVec3, direction: DVec3) -> f64 {
        self.shape.distance(origin, direction)
    }

    fn normal(&self, point: DVec3) -> DVec3 {
        self.shape.normal(point)
    }
}
