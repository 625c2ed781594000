use rayon::prelude::*;

use crate::camera::{Camera, Viewport};
use crate::light::PointLight;
use crate::material::{phong_lighting, reflect, PhongCoefficients};
use crate::object::trace;
use crate::picture::{Color, Picture};
use crate::ray::Ray;
use crate::scene::Scene;
use crate::vector::{Point, Vector, VectorExt};

pub const MAX_DEPTH: u32 = 5;
pub const BACKGROUND: Color = Color::new(0.0, 0.0, 0.2);

// secondary rays start this far off the surface to avoid shadow acne
const SURFACE_OFFSET: f64 = 1e-4;
const REFLECTION_WEIGHT: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub max_depth: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            width: 600,
            height: 600,
            max_depth: MAX_DEPTH,
        }
    }
}

/// Mirror ray leaving `point`, one bounce deeper than `ray`.
pub fn reflection_ray(ray: &Ray, point: &Point, normal: &Vector) -> Ray {
    let view = (ray.origin - point).safe_normalize();
    let direction = reflect(&-view, normal).safe_normalize();
    Ray::new(point + normal * SURFACE_OFFSET, direction).with_depth(ray.depth + 1)
}

fn light_contribution(
    ray: &Ray,
    point: &Point,
    normal: &Vector,
    coefficients: &PhongCoefficients,
    light: &PointLight,
    scene: &Scene,
) -> Color {
    let to_light = light.position - point;
    let distance = to_light.magnitude();
    let light_direction = to_light.safe_normalize();

    let shadow_ray = Ray::new(point + normal * SURFACE_OFFSET, light_direction);
    let in_shadow = trace(&shadow_ray, &scene.objects)
        .is_some_and(|hit| hit.t < distance);

    let intensity = light.attenuated_intensity(distance);
    if in_shadow {
        coefficients.ambient * intensity
    } else {
        let view = ray.origin - point;
        phong_lighting(&view, normal, &light_direction, coefficients, light.color, intensity)
    }
}

/// Color seen along `ray`: local Phong lighting from every light plus a
/// weighted mirror bounce, recursing until `max_depth` is exceeded.
pub fn cast_ray(ray: &Ray, scene: &Scene, max_depth: u32) -> Color {
    if ray.depth > max_depth {
        return BACKGROUND;
    }

    let Some(hit) = trace(ray, &scene.objects) else {
        return BACKGROUND;
    };

    let point = hit.point(ray);
    let normal = hit.object.surface_normal(&point);
    let coefficients = hit.object.phong_coefficients(&point);

    let mut color: Color = scene.lights.iter()
        .map(|light| light_contribution(ray, &point, &normal, &coefficients, light, scene))
        .sum();

    if coefficients.is_reflective() {
        let reflected = reflection_ray(ray, &point, &normal);
        color += REFLECTION_WEIGHT * cast_ray(&reflected, scene, max_depth);
    }

    color
}

pub fn render_pixel(x: u32, y: u32, viewport: &Viewport, scene: &Scene, max_depth: u32) -> Color {
    let ray = viewport.emit_ray(x, y);
    cast_ray(&ray, scene, max_depth)
}

/// Renders the scene into a fresh framebuffer, one rayon task per pixel row.
pub fn render(scene: &Scene, camera: &Camera, settings: &RenderSettings) -> Picture<Color> {
    let RenderSettings { width, height, max_depth } = *settings;
    let mut picture = Picture::filled(width, height, BACKGROUND);
    if width == 0 || height == 0 {
        return picture;
    }

    let viewport = camera.viewport(width, height);
    picture.buffer_mut()
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            log::trace!(target: "app", "Rendering row {}", y);
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = render_pixel(x as u32, y as u32, &viewport, scene, max_depth);
            }
        });
    picture
}
