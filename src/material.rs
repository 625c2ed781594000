use std::f64::consts::PI;

use crate::picture::Color;
use crate::vector::{Point, Vector, VectorExt};

pub const SHININESS: f64 = 42.0;

const CHECKER_FREQUENCY: f64 = 0.125;
const CHECKER_DARK: Color = Color::gray(0.2);
const CHECKER_LIGHT: Color = Color::gray(0.6);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhongCoefficients {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub shininess: f64,
}

impl PhongCoefficients {
    /// Ambient and diffuse take the surface color, the highlight stays white.
    pub fn uniform(color: Color) -> Self {
        PhongCoefficients {
            ambient: color,
            diffuse: color,
            specular: Color::WHITE,
            shininess: SHININESS,
        }
    }

    pub fn is_reflective(&self) -> bool {
        self.specular.magnitude() > 0.0
    }
}

pub fn reflect(v: &Vector, n: &Vector) -> Vector {
    v - 2.0 * v.dot(n) * n
}

/// Gray checkerboard over the world x/z coordinates.
pub fn checkerboard(point: &Point) -> Color {
    let s = (2.0 * PI * CHECKER_FREQUENCY * point.x).cos() * (2.0 * PI * CHECKER_FREQUENCY * point.z).cos();
    if s > 0.0 {
        CHECKER_LIGHT
    } else {
        CHECKER_DARK
    }
}

/// Radiance one light contributes at a surface point.
///
/// `intensity` is expected to be attenuated already. All directions point away
/// from the surface and are normalized here, so callers may pass raw vectors.
pub fn phong_lighting(
    view: &Vector,
    normal: &Vector,
    light: &Vector,
    coefficients: &PhongCoefficients,
    light_color: Color,
    intensity: f64,
) -> Color {
    let n = normal.safe_normalize();
    let v = view.safe_normalize();
    let l = light.safe_normalize();

    let ambient = coefficients.ambient * intensity;
    let diffuse = coefficients.diffuse * n.dot(&l).max(0.0) * intensity;

    let r = reflect(&-l, &n);
    let highlight = r.dot(&v).max(0.0).powf(coefficients.shininess);
    let specular = light_color * coefficients.specular * highlight * intensity;

    ambient + diffuse + specular
}
