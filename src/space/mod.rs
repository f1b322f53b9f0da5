//! Shortcuts for the linear-algebra types used throughout the crate, plus the
//! handful of free vector functions the bounding-volume constructors need.

use cgmath::{BaseFloat, Point2, Point3, Vector2, Vector3};

pub mod bbox;
pub mod bsphere;

pub use self::bbox::{BBox2, BBox3};
pub use self::bsphere::{BSphere2, BSphere3};

/// Default double-precision point/vector aliases, matching the precision the
/// traversal engine is tested against.
pub type Point2f = Point2<f64>;
pub type Point3f = Point3<f64>;
pub type Vector2f = Vector2<f64>;
pub type Vector3f = Vector3<f64>;

#[inline]
pub fn dot2<T: BaseFloat>(a: Vector2<T>, b: Vector2<T>) -> T {
    a.x * b.x + a.y * b.y
}

#[inline]
pub fn dot3<T: BaseFloat>(a: Vector3<T>, b: Vector3<T>) -> T {
    a.x * b.x + a.y * b.y + a.z * b.z
}

#[inline]
pub fn dist2sq<T: BaseFloat>(a: Point2<T>, b: Point2<T>) -> T {
    let d = a - b;
    dot2(d, d)
}

#[inline]
pub fn dist3sq<T: BaseFloat>(a: Point3<T>, b: Point3<T>) -> T {
    let d = a - b;
    dot3(d, d)
}

#[inline]
pub fn dist2<T: BaseFloat>(a: Point2<T>, b: Point2<T>) -> T {
    dist2sq(a, b).sqrt()
}

#[inline]
pub fn dist3<T: BaseFloat>(a: Point3<T>, b: Point3<T>) -> T {
    dist3sq(a, b).sqrt()
}
