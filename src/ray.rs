//! Query rays in 2D and 3D.
//!
//! Mirrors the point/vector split used throughout `space`: the inverse
//! direction is precomputed once per ray since the slab method in
//! [`crate::space::bbox`] divides by each component on every node test.

use cgmath::{BaseFloat, Point2, Point3, Vector2, Vector3};

/// Default double-precision 3D ray.
pub type Ray3f = Ray3<f64>;

/// Default double-precision 2D ray.
pub type Ray2f = Ray2<f64>;

/// A 2D ray: an origin point and a (not necessarily normalized) direction.
#[derive(Debug, Copy, Clone)]
pub struct Ray2<T: BaseFloat> {
    pub origin: Point2<T>,
    pub d: Vector2<T>,
    /// `1/d` component-wise; a zero component yields a signed infinity,
    /// which flows correctly through the slab method in box hit tests.
    pub dinv: Vector2<T>,
}

/// A 3D ray: an origin point and a (not necessarily normalized) direction.
#[derive(Debug, Copy, Clone)]
pub struct Ray3<T: BaseFloat> {
    pub origin: Point3<T>,
    pub d: Vector3<T>,
    pub dinv: Vector3<T>,
}

impl<T: BaseFloat> Ray2<T> {
    pub fn new(origin: Point2<T>, d: Vector2<T>) -> Self {
        let zero = T::zero();
        debug_assert!(d.x != zero || d.y != zero, "ray direction must be nonzero");
        let one = T::one();
        Ray2 {
            origin,
            d,
            dinv: Vector2::new(one / d.x, one / d.y),
        }
    }
}

impl<T: BaseFloat> Ray3<T> {
    pub fn new(origin: Point3<T>, d: Vector3<T>) -> Self {
        let zero = T::zero();
        debug_assert!(
            d.x != zero || d.y != zero || d.z != zero,
            "ray direction must be nonzero"
        );
        let one = T::one();
        Ray3 {
            origin,
            d,
            dinv: Vector3::new(one / d.x, one / d.y, one / d.z),
        }
    }
}
