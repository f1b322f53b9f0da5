//! A pre-built BVH as consumed by the traversal engine.
//!
//! Construction is an external collaborator's job: this
//! module only defines the shape the traversal core borrows for the
//! duration of a query — node/leaf bounding volumes, the leaf-order
//! permutation, and the level metadata from [`crate::tree`].

use cgmath::{BaseFloat, Point2, Point3};

use crate::ray::{Ray2, Ray3};
use crate::space::{BBox2, BBox3, BSphere2, BSphere3};
use crate::tree::TreeMeta;

/// A bounding volume usable as a 2D BVH node/leaf: anything that can answer
/// a ray and a point query against itself. Implemented for both [`BBox2`]
/// and [`BSphere2`] so a BVH can be built over either volume kind without
/// the traversal engine caring which.
pub trait Volume2<T: BaseFloat>: Copy + Sync {
    fn hit_ray(&self, ray: &Ray2<T>) -> bool;
    fn contains_point(&self, p: Point2<T>) -> bool;
}

/// 3D counterpart of [`Volume2`].
pub trait Volume3<T: BaseFloat>: Copy + Sync {
    fn hit_ray(&self, ray: &Ray3<T>) -> bool;
    fn contains_point(&self, p: Point3<T>) -> bool;
}

impl<T: BaseFloat> Volume2<T> for BBox2<T> {
    #[inline]
    fn hit_ray(&self, ray: &Ray2<T>) -> bool {
        BBox2::hit_ray(self, ray)
    }
    #[inline]
    fn contains_point(&self, p: Point2<T>) -> bool {
        BBox2::contains_point(self, p)
    }
}

impl<T: BaseFloat> Volume2<T> for BSphere2<T> {
    #[inline]
    fn hit_ray(&self, ray: &Ray2<T>) -> bool {
        BSphere2::hit_ray(self, ray)
    }
    #[inline]
    fn contains_point(&self, p: Point2<T>) -> bool {
        BSphere2::contains_point(self, p)
    }
}

impl<T: BaseFloat> Volume3<T> for BBox3<T> {
    #[inline]
    fn hit_ray(&self, ray: &Ray3<T>) -> bool {
        BBox3::hit_ray(self, ray)
    }
    #[inline]
    fn contains_point(&self, p: Point3<T>) -> bool {
        BBox3::contains_point(self, p)
    }
}

impl<T: BaseFloat> Volume3<T> for BSphere3<T> {
    #[inline]
    fn hit_ray(&self, ray: &Ray3<T>) -> bool {
        BSphere3::hit_ray(self, ray)
    }
    #[inline]
    fn contains_point(&self, p: Point3<T>) -> bool {
        BSphere3::contains_point(self, p)
    }
}

/// A pre-built 2D BVH, borrowed for the duration of a query.
///
/// `nodes` holds internal-node bounding volumes indexed by storage index
/// (virtual nodes excluded, see [`TreeMeta`]); `leaves` holds real-leaf
/// bounding volumes in build (Morton) order; `order[i]` is the original
/// primitive index of the `i`-th leaf.
#[derive(Copy, Clone)]
pub struct Bvh2<'a, T: BaseFloat, V: Volume2<T>> {
    pub nodes: &'a [V],
    pub leaves: &'a [V],
    pub order: &'a [u32],
    pub tree: TreeMeta,
    _marker: std::marker::PhantomData<T>,
}

/// 3D counterpart of [`Bvh2`].
#[derive(Copy, Clone)]
pub struct Bvh3<'a, T: BaseFloat, V: Volume3<T>> {
    pub nodes: &'a [V],
    pub leaves: &'a [V],
    pub order: &'a [u32],
    pub tree: TreeMeta,
    _marker: std::marker::PhantomData<T>,
}

impl<'a, T: BaseFloat, V: Volume2<T>> Bvh2<'a, T, V> {
    pub fn new(nodes: &'a [V], leaves: &'a [V], order: &'a [u32], tree: TreeMeta) -> Self {
        debug_assert_eq!(leaves.len(), order.len());
        Bvh2 {
            nodes,
            leaves,
            order,
            tree,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<'a, T: BaseFloat, V: Volume3<T>> Bvh3<'a, T, V> {
    pub fn new(nodes: &'a [V], leaves: &'a [V], order: &'a [u32], tree: TreeMeta) -> Self {
        debug_assert_eq!(leaves.len(), order.len());
        Bvh3 {
            nodes,
            leaves,
            order,
            tree,
            _marker: std::marker::PhantomData,
        }
    }
}
