//! Axis-aligned bounding boxes in 2D and 3D.
//!
//! `BBox2`/`BBox3` mirror each other field-for-field; they're kept as two
//! concrete structs rather than one generic-over-dimension type so the
//! componentwise min/max in the hot construction and merge paths stay
//! unrolled instead of looping over a dimension count.

use cgmath::{BaseFloat, BaseNum, Matrix2, Matrix3, Point2, Point3};

use crate::ray::{Ray2, Ray3};
use crate::scalar::{max2, max3, min2, min3};
use crate::space::bsphere::{BSphere2, BSphere3};
use crate::space::{dist2, dist3};

/// Axis-aligned bounding box over a 2D point/tuple of `lo`, `up` corners.
///
/// Invariant: `lo.x <= up.x && lo.y <= up.y` whenever built from real
/// geometry; a degenerate
/// box built from a single point has `lo == up`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BBox2<T: BaseNum> {
    pub lo: Point2<T>,
    pub up: Point2<T>,
}

/// Axis-aligned bounding box over a 3D point/triangle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BBox3<T: BaseNum> {
    pub lo: Point3<T>,
    pub up: Point3<T>,
}

impl<T: BaseNum> BBox2<T> {
    /// Store the two corners verbatim.
    #[inline]
    pub fn new(lo: Point2<T>, up: Point2<T>) -> Self {
        BBox2 { lo, up }
    }

    /// Bounding box of a line segment.
    #[inline]
    pub fn from_segment(p1: Point2<T>, p2: Point2<T>) -> Self {
        BBox2 {
            lo: Point2::new(min2(p1.x, p2.x), min2(p1.y, p2.y)),
            up: Point2::new(max2(p1.x, p2.x), max2(p1.y, p2.y)),
        }
    }

    /// Bounding box of the two columns of a 2x2 vertex matrix.
    #[inline]
    pub fn from_matrix(m: &Matrix2<T>) -> Self {
        Self::from_segment(Point2::new(m.x.x, m.x.y), Point2::new(m.y.x, m.y.y))
    }

    /// Expand to also enclose `other`.
    #[inline]
    pub fn merge(&self, other: &Self) -> Self {
        BBox2 {
            lo: Point2::new(min2(self.lo.x, other.lo.x), min2(self.lo.y, other.lo.y)),
            up: Point2::new(max2(self.up.x, other.up.x), max2(self.up.y, other.up.y)),
        }
    }

    #[inline]
    pub fn from_sphere(s: &BSphere2<T>) -> Self {
        BBox2 {
            lo: Point2::new(s.x.x - s.r, s.x.y - s.r),
            up: Point2::new(s.x.x + s.r, s.x.y + s.r),
        }
    }

    /// True if `p` lies within the box, boundary inclusive on both sides.
    #[inline]
    pub fn contains_point(&self, p: Point2<T>) -> bool {
        self.lo.x <= p.x && p.x <= self.up.x && self.lo.y <= p.y && p.y <= self.up.y
    }
}

impl<T: BaseFloat> BBox2<T> {
    /// Slab-method ray/box test. A ray tangent to a box corner
    /// (`tmin == tmax`) counts as a hit; a box entirely behind the ray
    /// origin (`tmax < 0`) does not.
    pub fn hit_ray(&self, ray: &Ray2<T>) -> bool {
        let (t1x, t2x) = (
            (self.lo.x - ray.origin.x) * ray.dinv.x,
            (self.up.x - ray.origin.x) * ray.dinv.x,
        );
        let mut tmin = min2(t1x, t2x);
        let mut tmax = max2(t1x, t2x);

        let (t1y, t2y) = (
            (self.lo.y - ray.origin.y) * ray.dinv.y,
            (self.up.y - ray.origin.y) * ray.dinv.y,
        );
        tmin = max2(tmin, min2(t1y, t2y));
        tmax = min2(tmax, max2(t1y, t2y));

        tmin <= tmax && tmax >= T::zero()
    }

    /// Smallest box enclosing two bounding spheres: if one sphere encloses
    /// the other, its box is returned directly; otherwise the two spheres'
    /// boxes are merged.
    pub fn from_spheres(a: &BSphere2<T>, b: &BSphere2<T>) -> Self {
        let l = dist2(a.x, b.x);
        if l + a.r <= b.r {
            return Self::from_sphere(b);
        }
        if l + b.r <= a.r {
            return Self::from_sphere(a);
        }
        Self::from_sphere(a).merge(&Self::from_sphere(b))
    }

    #[inline]
    pub fn center(&self) -> Point2<T> {
        let two = T::one() + T::one();
        Point2::new((self.lo.x + self.up.x) / two, (self.lo.y + self.up.y) / two)
    }
}

impl<T: BaseNum> std::ops::Add for BBox2<T> {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        self.merge(&other)
    }
}

impl<T: BaseNum> BBox3<T> {
    #[inline]
    pub fn new(lo: Point3<T>, up: Point3<T>) -> Self {
        BBox3 { lo, up }
    }

    /// Bounding box of a triangle's three vertices.
    #[inline]
    pub fn from_triangle(p1: Point3<T>, p2: Point3<T>, p3: Point3<T>) -> Self {
        BBox3 {
            lo: Point3::new(
                min3(p1.x, p2.x, p3.x),
                min3(p1.y, p2.y, p3.y),
                min3(p1.z, p2.z, p3.z),
            ),
            up: Point3::new(
                max3(p1.x, p2.x, p3.x),
                max3(p1.y, p2.y, p3.y),
                max3(p1.z, p2.z, p3.z),
            ),
        }
    }

    /// Bounding box of the three columns of a 3x3 vertex matrix.
    #[inline]
    pub fn from_matrix(m: &Matrix3<T>) -> Self {
        Self::from_triangle(
            Point3::new(m.x.x, m.x.y, m.x.z),
            Point3::new(m.y.x, m.y.y, m.y.z),
            Point3::new(m.z.x, m.z.y, m.z.z),
        )
    }

    #[inline]
    pub fn merge(&self, other: &Self) -> Self {
        BBox3 {
            lo: Point3::new(
                min2(self.lo.x, other.lo.x),
                min2(self.lo.y, other.lo.y),
                min2(self.lo.z, other.lo.z),
            ),
            up: Point3::new(
                max2(self.up.x, other.up.x),
                max2(self.up.y, other.up.y),
                max2(self.up.z, other.up.z),
            ),
        }
    }

    #[inline]
    pub fn from_sphere(s: &BSphere3<T>) -> Self {
        BBox3 {
            lo: Point3::new(s.x.x - s.r, s.x.y - s.r, s.x.z - s.r),
            up: Point3::new(s.x.x + s.r, s.x.y + s.r, s.x.z + s.r),
        }
    }

    /// True if `p` lies within the box, boundary inclusive on both sides.
    #[inline]
    pub fn contains_point(&self, p: Point3<T>) -> bool {
        self.lo.x <= p.x
            && p.x <= self.up.x
            && self.lo.y <= p.y
            && p.y <= self.up.y
            && self.lo.z <= p.z
            && p.z <= self.up.z
    }
}

impl<T: BaseFloat> BBox3<T> {
    pub fn from_spheres(a: &BSphere3<T>, b: &BSphere3<T>) -> Self {
        let l = dist3(a.x, b.x);
        if l + a.r <= b.r {
            return Self::from_sphere(b);
        }
        if l + b.r <= a.r {
            return Self::from_sphere(a);
        }
        Self::from_sphere(a).merge(&Self::from_sphere(b))
    }

    #[inline]
    pub fn center(&self) -> Point3<T> {
        let two = T::one() + T::one();
        Point3::new(
            (self.lo.x + self.up.x) / two,
            (self.lo.y + self.up.y) / two,
            (self.lo.z + self.up.z) / two,
        )
    }

    /// Slab-method ray/box test; see [`BBox2::hit_ray`] for the per-axis fold.
    pub fn hit_ray(&self, ray: &Ray3<T>) -> bool {
        let (t1x, t2x) = (
            (self.lo.x - ray.origin.x) * ray.dinv.x,
            (self.up.x - ray.origin.x) * ray.dinv.x,
        );
        let mut tmin = min2(t1x, t2x);
        let mut tmax = max2(t1x, t2x);

        let (t1y, t2y) = (
            (self.lo.y - ray.origin.y) * ray.dinv.y,
            (self.up.y - ray.origin.y) * ray.dinv.y,
        );
        tmin = max2(tmin, min2(t1y, t2y));
        tmax = min2(tmax, max2(t1y, t2y));

        let (t1z, t2z) = (
            (self.lo.z - ray.origin.z) * ray.dinv.z,
            (self.up.z - ray.origin.z) * ray.dinv.z,
        );
        tmin = max2(tmin, min2(t1z, t2z));
        tmax = min2(tmax, max2(t1z, t2z));

        tmin <= tmax && tmax >= T::zero()
    }
}

impl<T: BaseNum> std::ops::Add for BBox3<T> {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        self.merge(&other)
    }
}
