use nalgebra::{Point3, Vector3};

pub type Point = Point3<f64>;
pub type Vector = Vector3<f64>;

pub trait VectorExt {
    fn is_approx_zero(&self) -> bool;

    /// Unit vector in the same direction. The zero vector is returned unchanged.
    fn safe_normalize(&self) -> Self;
}

impl VectorExt for Vector {
    fn is_approx_zero(&self) -> bool {
        self.iter().all(|c| c.abs() < f64::EPSILON)
    }

    fn safe_normalize(&self) -> Self {
        if self.is_approx_zero() {
            *self
        } else {
            self / self.magnitude()
        }
    }
}
