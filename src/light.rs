use fastrand::Rng;

use crate::picture::Color;
use crate::vector::Point;

#[derive(Clone, Debug, PartialEq)]
pub struct PointLight {
    pub position: Point,
    pub color: Color,
    pub intensity: f64,
}

impl PointLight {
    pub fn new(position: Point, color: Color, intensity: f64) -> Self {
        PointLight { position, color, intensity }
    }

    /// Light with a random color and an intensity in `[2, 3.5)`.
    pub fn random(rng: &mut Rng, position: Point) -> Self {
        let color = Color::new(rng.f64(), rng.f64(), rng.f64());
        let intensity = 2.0 + rng.f64() * 1.5;
        PointLight::new(position, color, intensity)
    }

    /// Intensity reaching a point `distance` away, with inverse-square falloff.
    pub fn attenuated_intensity(&self, distance: f64) -> f64 {
        self.intensity / (distance * distance)
    }
}
