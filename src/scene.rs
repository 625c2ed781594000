use fastrand::Rng;
use nalgebra::{point, Point3};

use crate::light::PointLight;
use crate::object::{Object, Plane, Sphere};
use crate::picture::Color;
use crate::vector::Vector;

/// Objects and lights shared read-only by every pixel of a render.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub objects: Vec<Object>,
    pub lights: Vec<PointLight>,
}

type SphereData = ([f64; 3], f64, [f64; 3]);
type LightData = ([f64; 3], f64, [f64; 3]);

const CLASSIC_SPHERES: [SphereData; 32] = [
    ([2.79691, -3.16565, -14.9654], 0.59685, [0.680215, 0.3897, 0.0832257]),
    ([-0.407511, -4.00025, -11.4583], 0.333709, [0.231187, 0.899334, 0.132472]),
    ([-4.43588, 1.50888, -8.42867], 0.721999, [0.327648, 0.336679, 0.533702]),
    ([4.92212, -4.99221, -16.3855], 0.617482, [0.0900409, 0.545919, 0.940942]),
    ([-4.76938, -4.92934, -13.1165], 0.524775, [0.889082, 0.818827, 0.376314]),
    ([4.73756, -4.53334, -10.9986], 0.232771, [0.69184, 0.131286, 0.933796]),
    ([-1.17538, 1.18386, -7.90606], 0.983231, [0.224297, 0.147904, 0.61634]),
    ([1.80308, 3.5994, -11.6676], 0.450499, [0.471878, 0.436242, 0.30572]),
    ([0.632882, 4.42202, -7.13265], 0.385417, [0.0638121, 0.538282, 0.832521]),
    ([-2.58975, -2.69106, -7.15966], 0.683264, [0.340974, 0.597084, 0.282512]),
    ([-3.26635, 3.33195, -13.1], 0.391061, [0.8033, 0.364325, 0.509903]),
    ([-0.748441, 2.55361, -8.82236], 0.207942, [0.629547, 0.482853, 0.0628588]),
    ([3.42285, -4.68687, -12.677], 0.449754, [0.16608, 0.851683, 0.916801]),
    ([2.27272, 4.26659, -10.9515], 0.326541, [0.2159, 0.950424, 0.299693]),
    ([4.61172, 0.208343, -12.7044], 0.844534, [0.235393, 0.68133, 0.814113]),
    ([0.867512, 0.396921, -14.4732], 0.965255, [0.657187, 0.699725, 0.713496]),
    ([-2.03726, -2.24001, -13.0703], 0.165267, [0.937254, 0.918642, 0.338299]),
    ([-1.05118, -0.765985, -7.15636], 0.293488, [0.698401, 0.0248872, 0.832002]),
    ([2.11342, -3.01158, -7.1408], 0.790176, [0.14572, 0.903395, 0.800197]),
    ([1.51077, 4.26301, -13.0596], 0.91496, [0.844889, 0.495297, 0.660831]),
    ([-4.0459, -0.505493, -15.5004], 0.370818, [0.565382, 0.340108, 0.676196]),
    ([0.912978, 1.65922, -13.6884], 0.274722, [0.605955, 0.560501, 0.874004]),
    ([4.71712, -1.17073, -12.6124], 0.848914, [0.495297, 0.452428, 0.253168]),
    ([-2.43932, -2.64015, -14.2173], 0.0404336, [0.562847, 0.231306, 0.420837]),
    ([-0.606635, -3.89109, -14.1066], 0.201719, [0.497781, 0.196731, 0.467383]),
    ([0.632756, -0.246298, -15.9576], 0.695516, [0.0286482, 0.0439981, 0.0260184]),
    ([0.398411, 1.04417, -8.39331], 0.203061, [0.782078, 0.920722, 0.0483436]),
    ([1.94785, 0.988655, -16.4285], 0.880468, [0.118627, 0.316963, 0.0509399]),
    ([-3.94506, -2.04366, -13.2435], 0.456535, [0.821713, 0.296983, 0.443441]),
    ([3.8328, -0.834901, -9.1844], 0.324345, [0.177003, 0.100103, 0.0759562]),
    ([4.06828, -1.43702, -8.22088], 0.272132, [0.535684, 0.992047, 0.599507]),
    ([-1.47431, -4.9948, -13.4769], 0.304781, [0.8382, 0.174815, 0.621885]),
];

const CLASSIC_LIGHTS: [LightData; 16] = [
    ([-8.390730, 3.668696, -18.896290], 2.124839, [0.763399, 0.913718, 0.953702]),
    ([12.000752, 8.916655, -12.905505], 3.349001, [0.132472, 0.680215, 0.389700]),
    ([10.713996, 6.674172, -8.777467], 2.491471, [0.336679, 0.533702, 0.231187]),
    ([-6.659963, 1.128232, -14.526654], 2.564471, [0.090041, 0.545919, 0.940942]),
    ([-14.766347, 0.015575, -23.156581], 2.196929, [0.933796, 0.889082, 0.818827]),
    ([14.788011, 12.233063, -13.524445], 2.336445, [0.147904, 0.616340, 0.691840]),
    ([3.004171, 10.495493, 4.308127], 3.248782, [0.471878, 0.436242, 0.305720]),
    ([8.016860, 19.475110, 3.600030], 2.895625, [0.282512, 0.063812, 0.538282]),
    ([3.526140, 12.367720, 2.281807], 3.204950, [0.364325, 0.509903, 0.340974]),
    ([-10.798212, 9.335258, -24.496927], 3.375201, [0.629547, 0.482853, 0.062859]),
    ([14.602051, 9.009985, -15.409226], 3.425637, [0.299693, 0.166080, 0.851683]),
    ([3.437505, 11.265764, -23.266053], 2.353089, [0.681330, 0.814113, 0.215900]),
    ([7.769236, 4.617876, 4.521012], 2.507449, [0.657187, 0.699725, 0.713496]),
    ([-9.995847, 12.199933, -15.497906], 2.037331, [0.832002, 0.937254, 0.918642]),
    ([9.532917, 7.821212, -0.200939], 2.218581, [0.903395, 0.800197, 0.698401]),
    ([8.761750, 8.503118, -17.660842], 3.014294, [0.844889, 0.495297, 0.660831]),
];

fn color_of(rgb: [f64; 3]) -> Color {
    Color::new(rgb[0], rgb[1], rgb[2])
}

fn ground() -> Object {
    Plane::new(point![0.0, -1.0, 5.0], Vector::y()).into()
}

fn random_in(rng: &mut Rng, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * rng.f64()
}

impl Scene {
    pub fn new(objects: Vec<Object>, lights: Vec<PointLight>) -> Self {
        Scene { objects, lights }
    }

    /// Checkerboard ground with 32 colored spheres hanging in front of the camera.
    pub fn classic() -> Self {
        let spheres = CLASSIC_SPHERES.iter()
            .map(|&(center, radius, color)| Object::from(Sphere::new(Point3::from(center), radius, color_of(color))));
        let objects = std::iter::once(ground()).chain(spheres).collect();

        let lights = CLASSIC_LIGHTS.iter()
            .map(|&(position, intensity, color)| PointLight::new(Point3::from(position), color_of(color), intensity))
            .collect();

        Scene::new(objects, lights)
    }

    /// Checkerboard ground plus randomly placed spheres and lights.
    ///
    /// The layout depends only on the state of `rng`, so a fixed seed always
    /// yields the same scene.
    pub fn random(rng: &mut Rng, spheres: usize, lights: usize) -> Self {
        let mut objects = Vec::with_capacity(spheres + 1);
        objects.push(ground());
        for _ in 0..spheres {
            let center = point![
                random_in(rng, -5.0, 5.0),
                random_in(rng, -5.0, 5.0),
                random_in(rng, -17.0, -7.0)
            ];
            let radius = random_in(rng, 0.05, 1.0);
            let color = Color::new(rng.f64(), rng.f64(), rng.f64());
            objects.push(Object::from(Sphere::new(center, radius, color)));
        }

        let lights = (0..lights)
            .map(|_| {
                let position = point![
                    random_in(rng, -15.0, 15.0),
                    random_in(rng, 0.0, 20.0),
                    random_in(rng, -25.0, 5.0)
                ];
                PointLight::random(rng, position)
            })
            .collect();

        Scene::new(objects, lights)
    }

    pub fn sphere_count(&self) -> usize {
        self.objects.iter().filter(|object| matches!(object, Object::Sphere(_))).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_scene_layout() {
        let scene = Scene::classic();
        assert_eq!(scene.objects.len(), 33);
        assert_eq!(scene.sphere_count(), 32);
        assert_eq!(scene.lights.len(), 16);
        assert!(matches!(scene.objects[0], Object::Plane(_)));
    }

    #[test]
    fn random_scene_is_reproducible() {
        let a = Scene::random(&mut Rng::with_seed(42), 10, 4);
        let b = Scene::random(&mut Rng::with_seed(42), 10, 4);
        assert_eq!(a.lights, b.lights);
        for (left, right) in a.objects.iter().zip(&b.objects) {
            match (left, right) {
                (Object::Sphere(l), Object::Sphere(r)) => {
                    assert_eq!(l.center, r.center);
                    assert_eq!(l.radius, r.radius);
                    assert_eq!(l.color, r.color);
                }
                (Object::Plane(_), Object::Plane(_)) => {}
                _ => panic!("object kinds differ"),
            }
        }
    }

    #[test]
    fn random_scene_respects_counts_and_bounds() {
        let scene = Scene::random(&mut Rng::with_seed(3), 25, 6);
        assert_eq!(scene.sphere_count(), 25);
        assert_eq!(scene.lights.len(), 6);
        for object in &scene.objects {
            if let Object::Sphere(sphere) = object {
                assert!((0.05..1.0).contains(&sphere.radius));
                assert!((-17.0..-7.0).contains(&sphere.center.z));
            }
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = Scene::random(&mut Rng::with_seed(1), 3, 1);
        let b = Scene::random(&mut Rng::with_seed(2), 3, 1);
        assert_ne!(a.lights, b.lights);
    }
}
