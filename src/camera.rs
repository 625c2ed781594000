use nalgebra::vector;

use crate::ray::Ray;
use crate::vector::{Point, VectorExt};

/// Pinhole camera looking down the negative z axis with y up.
///
/// The view plane spans `left..right` and `bottom..top` at `distance` in front
/// of the camera. The defaults give a field of view of about 53 degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Point,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub distance: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            position: Point::origin(),
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
            distance: 2.0,
        }
    }
}

impl Camera {
    pub fn viewport(&self, width: u32, height: u32) -> Viewport {
        Viewport {
            camera: self.clone(),
            image_width: width as f64,
            image_height: height as f64,
        }
    }

    pub fn field_of_view(&self) -> f64 {
        2.0 * ((self.top - self.bottom) / 2.0).atan2(self.distance)
    }
}

/// Camera bound to a raster size.
pub struct Viewport {
    camera: Camera,
    pub image_width: f64,
    pub image_height: f64,
}

impl Viewport {
    /// Primary ray through the center of pixel (x, y), row 0 at the top.
    pub fn emit_ray(&self, x: u32, y: u32) -> Ray {
        let c = &self.camera;
        let u = c.left + (c.right - c.left) * (x as f64 + 0.5) / self.image_width;
        let v = c.top + (c.bottom - c.top) * (y as f64 + 0.5) / self.image_height;
        let direction = vector![u, v, -c.distance].safe_normalize();
        Ray::new(c.position, direction)
    }
}
