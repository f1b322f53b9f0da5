//! Bounding spheres in 2D and 3D, including the triangle-circumsphere
//! construction.

use cgmath::BaseFloat;
use cgmath::{Point2, Point3};
use num_traits::Float;

use crate::ray::{Ray2, Ray3};
use crate::space::bbox::BBox3;
use crate::space::{dist2, dist2sq, dist3, dist3sq, dot2, dot3};

/// Bounding sphere in 2D: center `x`, radius `r >= 0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BSphere2<T: BaseFloat> {
    pub x: Point2<T>,
    pub r: T,
}

/// Bounding sphere in 3D: center `x`, radius `r >= 0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BSphere3<T: BaseFloat> {
    pub x: Point3<T>,
    pub r: T,
}

impl<T: BaseFloat> BSphere2<T> {
    #[inline]
    pub fn new(x: Point2<T>, r: T) -> Self {
        debug_assert!(r >= T::zero(), "bounding sphere radius must be non-negative");
        BSphere2 { x, r }
    }

    /// Sphere with `a`-`b` as a diameter.
    pub fn from_segment(a: Point2<T>, b: Point2<T>) -> Self {
        let two = T::one() + T::one();
        let center = Point2::new((a.x + b.x) / two, (a.y + b.y) / two);
        BSphere2::new(center, dist2(center, a))
    }

    /// Smallest sphere enclosing a triangle; see `BSphere3::from_triangle`
    /// for the derivation (the formulas are dimension-agnostic, since they
    /// operate only on dot products of edge vectors).
    pub fn from_triangle(a: Point2<T>, b: Point2<T>, c: Point2<T>) -> Self {
        let ab = b - a;
        let ac = c - a;
        let abab = dot2(ab, ab);
        let abac = dot2(ab, ac);
        let acac = dot2(ac, ac);
        let two = T::one() + T::one();
        let d = two * (abab * acac - abac * abac);

        if d.abs() <= T::epsilon() {
            let bbox = crate::space::bbox::BBox2::from_segment(a, b).merge(
                &crate::space::bbox::BBox2::from_segment(a, c),
            );
            let center = bbox.center();
            return BSphere2::new(center, dist2(center, bbox.up));
        }

        let s = (abab * acac - acac * abac) / d;
        let t = (acac * abab - abab * abac) / d;

        if s <= T::zero() {
            return Self::from_segment(a, c);
        }
        if t <= T::zero() {
            return Self::from_segment(a, b);
        }
        if s + t >= T::one() {
            return Self::from_segment(b, c);
        }

        let center = a + ab * s + ac * t;
        BSphere2::new(center, dist2(center, a))
    }

    /// Smallest sphere enclosing `self` and `other`.
    pub fn merge(&self, other: &Self) -> Self {
        let l = dist2(self.x, other.x);
        if l + self.r <= other.r {
            return *other;
        }
        if l + other.r <= self.r {
            return *self;
        }
        let two = T::one() + T::one();
        let frac = ((other.r - self.r) / l + T::one()) / two;
        let center = Point2::new(
            self.x.x + (other.x.x - self.x.x) * frac,
            self.x.y + (other.x.y - self.x.y) * frac,
        );
        let r = (l + self.r + other.r) / two;
        BSphere2::new(center, r)
    }

    #[inline]
    pub fn center(&self) -> Point2<T> {
        self.x
    }

    /// True if `p` lies strictly inside the sphere; points on the boundary
    /// miss.
    #[inline]
    pub fn contains_point(&self, p: Point2<T>) -> bool {
        dist2sq(p, self.x) < self.r * self.r
    }

    /// Quadratic-root ray/sphere test: solves `‖(p + t·d) − x‖² = r²` and
    /// keeps only forward-facing roots, treating an origin already inside
    /// the sphere as a hit regardless of direction.
    pub fn hit_ray(&self, ray: &Ray2<T>) -> bool {
        let oc = ray.origin - self.x;
        let a = dot2(ray.d, ray.d);
        let b = (dot2(oc, ray.d)) * (T::one() + T::one());
        let c = dot2(oc, oc) - self.r * self.r;
        let disc = b * b - (T::one() + T::one() + T::one() + T::one()) * a * c;
        if disc < T::zero() {
            return false;
        }
        c <= T::zero() || b <= T::zero()
    }
}

impl<T: BaseFloat> std::ops::Add for BSphere2<T> {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        self.merge(&other)
    }
}

impl<T: BaseFloat> BSphere3<T> {
    #[inline]
    pub fn new(x: Point3<T>, r: T) -> Self {
        debug_assert!(r >= T::zero(), "bounding sphere radius must be non-negative");
        BSphere3 { x, r }
    }

    pub fn from_segment(a: Point3<T>, b: Point3<T>) -> Self {
        let two = T::one() + T::one();
        let center = Point3::new(
            (a.x + b.x) / two,
            (a.y + b.y) / two,
            (a.z + b.z) / two,
        );
        BSphere3::new(center, dist3(center, a))
    }

    /// Smallest sphere enclosing a triangle, via its circumscribed sphere
    /// when the circumcenter projects inside the triangle, falling back to
    /// the sphere over the nearest edge (or, for collinear points, the
    /// bounding-box diagonal) otherwise, including a collinear epsilon check
    /// to preserve near-degenerate edge cases.
    pub fn from_triangle(a: Point3<T>, b: Point3<T>, c: Point3<T>) -> Self {
        let ab = b - a;
        let ac = c - a;
        let abab = dot3(ab, ab);
        let abac = dot3(ab, ac);
        let acac = dot3(ac, ac);
        let two = T::one() + T::one();
        let d = two * (abab * acac - abac * abac);

        if d.abs() <= T::epsilon() {
            let bbox = BBox3::from_triangle(a, b, c);
            let center = bbox.center();
            return BSphere3::new(center, dist3(center, bbox.up));
        }

        let s = (abab * acac - acac * abac) / d;
        let t = (acac * abab - abab * abac) / d;

        if s <= T::zero() {
            return Self::from_segment(a, c);
        }
        if t <= T::zero() {
            return Self::from_segment(a, b);
        }
        if s + t >= T::one() {
            return Self::from_segment(b, c);
        }

        let center = a + ab * s + ac * t;
        BSphere3::new(center, dist3(center, a))
    }

    pub fn merge(&self, other: &Self) -> Self {
        let l = dist3(self.x, other.x);
        if l + self.r <= other.r {
            return *other;
        }
        if l + other.r <= self.r {
            return *self;
        }
        let two = T::one() + T::one();
        let frac = ((other.r - self.r) / l + T::one()) / two;
        let center = Point3::new(
            self.x.x + (other.x.x - self.x.x) * frac,
            self.x.y + (other.x.y - self.x.y) * frac,
            self.x.z + (other.x.z - self.x.z) * frac,
        );
        let r = (l + self.r + other.r) / two;
        BSphere3::new(center, r)
    }

    #[inline]
    pub fn center(&self) -> Point3<T> {
        self.x
    }

    /// Squared distance from a point to the center; cheaper than the
    /// radius comparison when only containment is needed.
    #[inline]
    pub fn contains_within(&self, p: Point3<T>, eps: T) -> bool {
        dist3sq(p, self.x) <= (self.r + eps) * (self.r + eps)
    }

    /// True if `p` lies strictly inside the sphere; boundary is a miss,
    /// unlike [`BSphere3::contains_within`] which is the relaxed
    /// invariant check used in tests.
    #[inline]
    pub fn contains_point(&self, p: Point3<T>) -> bool {
        dist3sq(p, self.x) < self.r * self.r
    }

    /// Quadratic-root ray/sphere test. A ray whose origin is
    /// already inside the sphere is always a hit; otherwise only
    /// forward-facing roots (`b <= 0`) count, since `a > 0` fixes their sign.
    pub fn hit_ray(&self, ray: &Ray3<T>) -> bool {
        let oc = ray.origin - self.x;
        let a = dot3(ray.d, ray.d);
        let b = dot3(oc, ray.d) * (T::one() + T::one());
        let c = dot3(oc, oc) - self.r * self.r;
        let four = T::one() + T::one() + T::one() + T::one();
        let disc = b * b - four * a * c;
        if disc < T::zero() {
            return false;
        }
        c <= T::zero() || b <= T::zero()
    }
}

impl<T: BaseFloat> std::ops::Add for BSphere3<T> {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        self.merge(&other)
    }
}
