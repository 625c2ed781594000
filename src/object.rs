use float_ord::FloatOrd;

use crate::material::{checkerboard, PhongCoefficients};
use crate::picture::Color;
use crate::ray::{Hit, Ray};
use crate::vector::{Point, Vector, VectorExt};

// rays closer to parallel than this never reach the plane
const PARALLEL_EPSILON: f64 = 1e-6;

/// Infinite plane through `point`, seen from both sides.
#[derive(Clone, Debug)]
pub struct Plane {
    pub point: Point,
    pub normal: Vector,
}

impl Plane {
    pub fn new(point: Point, normal: Vector) -> Self {
        Plane { point, normal: normal.safe_normalize() }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let denom = self.normal.dot(&ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (self.point - ray.origin).dot(&self.normal) / denom;
        (t > 0.0).then_some(t)
    }
}

#[derive(Clone, Debug)]
pub struct Sphere {
    pub center: Point,
    pub radius: f64,
    pub color: Color,
}

impl Sphere {
    pub fn new(center: Point, radius: f64, color: Color) -> Self {
        Sphere { center, radius, color }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let l = ray.origin - self.center;
        let a = ray.direction.magnitude_squared();
        let b = 2.0 * ray.direction.dot(&l);
        let c = l.magnitude_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        // q keeps the sign of b so the two roots never cancel catastrophically
        let (t0, t1) = if discriminant == 0.0 {
            let t = -0.5 * b / a;
            (t, t)
        } else {
            let sqrtd = discriminant.sqrt();
            let q = if b > 0.0 { -0.5 * (b + sqrtd) } else { -0.5 * (b - sqrtd) };
            (q / a, c / q)
        };
        let (near, far) = if t0 > t1 { (t1, t0) } else { (t0, t1) };

        if near > 0.0 {
            Some(near)
        } else if far > 0.0 {
            Some(far)
        } else {
            None
        }
    }

    pub fn surface_normal(&self, point: &Point) -> Vector {
        (point - self.center).safe_normalize()
    }
}

#[derive(Clone, Debug)]
pub enum Object {
    Plane(Plane),
    Sphere(Sphere),
}

impl From<Plane> for Object {
    fn from(plane: Plane) -> Self {
        Object::Plane(plane)
    }
}

impl From<Sphere> for Object {
    fn from(sphere: Sphere) -> Self {
        Object::Sphere(sphere)
    }
}

impl Object {
    /// Distance along `ray` to the nearest strictly positive root, if any.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self {
            Object::Plane(plane) => plane.intersect(ray),
            Object::Sphere(sphere) => sphere.intersect(ray),
        }
    }

    pub fn surface_normal(&self, point: &Point) -> Vector {
        match self {
            Object::Plane(plane) => plane.normal,
            Object::Sphere(sphere) => sphere.surface_normal(point),
        }
    }

    pub fn surface_color(&self, point: &Point) -> Color {
        match self {
            Object::Plane(_) => checkerboard(point),
            Object::Sphere(sphere) => sphere.color,
        }
    }

    /// Material at `point`; ambient and diffuse follow the surface color.
    pub fn phong_coefficients(&self, point: &Point) -> PhongCoefficients {
        PhongCoefficients::uniform(self.surface_color(point))
    }
}

/// Finds the object nearest to the ray origin at a strictly positive distance.
///
/// On equal distances the object listed first wins.
pub fn trace<'a>(ray: &Ray, objects: &'a [Object]) -> Option<Hit<'a>> {
    objects.iter()
        .filter_map(|object| {
            object.intersect(ray)
                .filter(|t| *t > 0.0)
                .map(|t| Hit { object, t })
        })
        .min_by_key(|hit| FloatOrd(hit.t))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{point, vector};

    use super::*;

    fn unit_sphere_at(center: Point) -> Sphere {
        Sphere::new(center, 1.0, Color::WHITE)
    }

    fn floor() -> Plane {
        Plane::new(point![0.0, -1.0, 0.0], Vector::y())
    }

    #[test]
    fn sphere_behind_ray_is_missed() {
        let sphere = unit_sphere_at(point![0.0, 0.0, -5.0]);
        let ray = Ray::new(Point::origin(), Vector::z());
        assert_eq!(sphere.intersect(&ray), None);

        let sideways = Ray::new(point![0.0, 0.0, -2.0], vector![0.0, 1.0, 1.0].normalize());
        assert_eq!(sphere.intersect(&sideways), None);
    }

    #[test]
    fn sphere_off_axis_is_missed() {
        let sphere = unit_sphere_at(point![0.0, 0.0, -5.0]);
        let ray = Ray::new(point![0.0, 2.0, 0.0], -Vector::z());
        assert_eq!(sphere.intersect(&ray), None);
    }

    #[test]
    fn ray_from_center_exits_at_radius() {
        let sphere = Sphere::new(point![1.0, 2.0, 3.0], 2.5, Color::WHITE);
        for direction in [Vector::x(), -Vector::y(), vector![1.0, 1.0, -1.0].normalize()] {
            let ray = Ray::new(sphere.center, direction);
            assert_relative_eq!(sphere.intersect(&ray).unwrap(), 2.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn through_center_returns_near_root() {
        let sphere = unit_sphere_at(point![0.0, 0.0, -5.0]);
        let ray = Ray::new(Point::origin(), -Vector::z());
        assert_relative_eq!(sphere.intersect(&ray).unwrap(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn off_center_chord_returns_near_root() {
        let sphere = unit_sphere_at(point![0.0, 0.0, -5.0]);
        let ray = Ray::new(point![0.0, 0.6, 0.0], -Vector::z());
        // chord half-length is 0.8 at this offset
        assert_relative_eq!(sphere.intersect(&ray).unwrap(), 4.2, epsilon = 1e-12);
    }

    #[test]
    fn tangent_ray_touches_once() {
        let sphere = unit_sphere_at(point![0.0, 0.0, -5.0]);
        let ray = Ray::new(point![0.0, 1.0, 0.0], -Vector::z());
        assert_relative_eq!(sphere.intersect(&ray).unwrap(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn unnormalized_direction_is_supported() {
        let sphere = unit_sphere_at(point![0.0, 0.0, -5.0]);
        let ray = Ray::new(Point::origin(), vector![0.0, 0.0, -2.0]);
        let t = sphere.intersect(&ray).unwrap();
        assert_relative_eq!(ray.at(t), point![0.0, 0.0, -4.0], epsilon = 1e-12);
    }

    #[test]
    fn ray_starting_on_surface_hits_far_side() {
        let sphere = unit_sphere_at(point![0.0, 0.0, -5.0]);
        let ray = Ray::new(point![0.0, 0.0, -4.0], -Vector::z());
        assert_relative_eq!(sphere.intersect(&ray).unwrap(), 2.0, epsilon = 1e-12);

        let objects = vec![Object::from(sphere)];
        let hit = trace(&ray, &objects).unwrap();
        assert_relative_eq!(hit.t, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn ray_leaving_surface_misses_sphere() {
        let sphere = unit_sphere_at(point![0.0, 0.0, -5.0]);
        let ray = Ray::new(point![0.0, 0.0, -4.0], Vector::z());
        assert_eq!(sphere.intersect(&ray), None);
    }

    #[test]
    fn sphere_normal_points_outward() {
        let sphere = Sphere::new(point![0.0, 0.0, -5.0], 2.0, Color::WHITE);
        assert_relative_eq!(sphere.surface_normal(&point![0.0, 2.0, -5.0]), Vector::y(), epsilon = 1e-12);
    }

    #[test]
    fn plane_hit_from_above() {
        let ray = Ray::new(Point::origin(), vector![0.0, -1.0, -1.0].normalize());
        let t = floor().intersect(&ray).unwrap();
        assert_relative_eq!(ray.at(t), point![0.0, -1.0, -1.0], epsilon = 1e-12);
    }

    #[test]
    fn plane_is_two_sided() {
        let ray = Ray::new(point![0.0, -3.0, 0.0], Vector::y());
        assert_relative_eq!(floor().intersect(&ray).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn plane_rejects_parallel_and_receding_rays() {
        let parallel = Ray::new(Point::origin(), -Vector::z());
        assert_eq!(floor().intersect(&parallel), None);

        let receding = Ray::new(Point::origin(), Vector::y());
        assert_eq!(floor().intersect(&receding), None);
    }

    #[test]
    fn plane_normal_is_constant() {
        let plane = Object::from(Plane::new(Point::origin(), vector![0.0, 2.0, 0.0]));
        assert_eq!(plane.surface_normal(&point![10.0, 0.0, -3.0]), Vector::y());
        assert_eq!(plane.surface_normal(&point![-4.0, 0.0, 7.0]), Vector::y());
    }

    #[test]
    fn plane_material_follows_checkerboard() {
        let plane = Object::from(floor());
        let point = point![4.0, -1.0, 0.0];
        let coefficients = plane.phong_coefficients(&point);
        assert_eq!(coefficients.diffuse, plane.surface_color(&point));
        assert_eq!(coefficients.ambient, Color::gray(0.2));
        assert_eq!(coefficients.specular, Color::WHITE);
    }

    #[test]
    fn trace_empty_scene_misses() {
        let ray = Ray::new(Point::origin(), -Vector::z());
        assert!(trace(&ray, &[]).is_none());
    }

    #[test]
    fn trace_picks_nearest_object() {
        let objects = vec![
            Object::from(unit_sphere_at(point![0.0, 0.0, -10.0])),
            Object::from(unit_sphere_at(point![0.0, 0.0, -4.0])),
            Object::from(floor()),
        ];
        let ray = Ray::new(Point::origin(), -Vector::z());
        let hit = trace(&ray, &objects).unwrap();
        assert!(std::ptr::eq(hit.object, &objects[1]));
        assert_relative_eq!(hit.t, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn trace_keeps_first_of_equal_hits() {
        let objects = vec![
            Object::from(Sphere::new(point![0.0, 0.0, -4.0], 1.0, Color::new(1.0, 0.0, 0.0))),
            Object::from(Sphere::new(point![0.0, 0.0, -4.0], 1.0, Color::new(0.0, 1.0, 0.0))),
        ];
        let ray = Ray::new(Point::origin(), -Vector::z());
        let hit = trace(&ray, &objects).unwrap();
        assert!(std::ptr::eq(hit.object, &objects[0]));
    }

    #[test]
    fn trace_ignores_zero_distance_hits() {
        let objects = vec![Object::from(floor())];
        let ray = Ray::new(point![0.0, -1.0, 0.0], vector![0.0, 1.0, -1.0].normalize());
        assert!(trace(&ray, &objects).is_none());
        assert_eq!(floor().intersect(&ray), None);
    }
}
