//! Traversal core for a pre-built bounding-volume hierarchy (BVH).
//!
//! This crate does not build BVHs — tree construction, the Morton-code
//! sorter, and the geometry loader are external collaborators it expects a
//! finished tree from. What it owns is the three tightly coupled pieces needed to
//! answer a batch of ray/point queries against an already-built tree: the
//! bounding-volume primitives in [`space`], the implicit flat-array tree
//! addressing in [`tree`], and the parallel breadth-first traversal engine
//! in [`traverse`].

pub mod bvh;
pub mod ray;
pub mod scalar;
pub mod space;
pub mod tree;
pub mod traverse;

use cgmath::{BaseFloat, Point2, Point3};

use crate::bvh::{Bvh2, Bvh3, Volume2, Volume3};
use crate::ray::{Ray2, Ray3};

pub use crate::traverse::{Options, Pair};

/// Intersect a batch of 3D points against a BVH. Returns one pair per
/// `(leaf, point)` that actually overlaps.
pub fn intersect_points3<T, V>(bvh: &Bvh3<T, V>, points: &[Point3<T>], options: &Options) -> Vec<Pair>
where
    T: BaseFloat,
    V: Volume3<T>,
{
    traverse::traverse(bvh.nodes, bvh.leaves, bvh.order, &bvh.tree, points, options, |v: &V, p: &Point3<T>| {
        v.contains_point(*p)
    })
}

/// Intersect a batch of 3D rays against a BVH.
pub fn intersect_rays3<T, V>(bvh: &Bvh3<T, V>, rays: &[Ray3<T>], options: &Options) -> Vec<Pair>
where
    T: BaseFloat,
    V: Volume3<T>,
{
    traverse::traverse(bvh.nodes, bvh.leaves, bvh.order, &bvh.tree, rays, options, |v: &V, ray: &Ray3<T>| {
        v.hit_ray(ray)
    })
}

/// Intersect a batch of 2D points against a BVH.
pub fn intersect_points2<T, V>(bvh: &Bvh2<T, V>, points: &[Point2<T>], options: &Options) -> Vec<Pair>
where
    T: BaseFloat,
    V: Volume2<T>,
{
    traverse::traverse(bvh.nodes, bvh.leaves, bvh.order, &bvh.tree, points, options, |v: &V, p: &Point2<T>| {
        v.contains_point(*p)
    })
}

/// Intersect a batch of 2D rays against a BVH.
pub fn intersect_rays2<T, V>(bvh: &Bvh2<T, V>, rays: &[Ray2<T>], options: &Options) -> Vec<Pair>
where
    T: BaseFloat,
    V: Volume2<T>,
{
    traverse::traverse(bvh.nodes, bvh.leaves, bvh.order, &bvh.tree, rays, options, |v: &V, ray: &Ray2<T>| {
        v.hit_ray(ray)
    })
}
