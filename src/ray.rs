use crate::object::Object;
use crate::vector::{Point, Vector};

#[derive(Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vector,
    /// Number of reflection bounces that led to this ray; primary rays start at 0.
    pub depth: u32,
}

impl Ray {
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self { origin, direction, depth: 0 }
    }

    pub fn with_depth(self, depth: u32) -> Self {
        Self { depth, ..self }
    }

    pub fn at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }
}

/// Nearest intersection found along a ray.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    pub object: &'a Object,
    pub t: f64,
}

impl<'a> Hit<'a> {
    pub fn point(&self, ray: &Ray) -> Point {
        ray.at(self.t)
    }
}
