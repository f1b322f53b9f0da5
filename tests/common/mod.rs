//! Bottom-up BVH builder for exercising the traversal core end-to-end.
//!
//! Tree construction is an external collaborator the core doesn't ship,
//! so this only exists to make the traversal engine testable in
//! isolation: it is not a stand-in for a production build (no SAH, no
//! Morton sort — just a plain pairwise merge).

use bvh_traversal::bvh::Bvh3;
use bvh_traversal::space::BBox3;
use bvh_traversal::tree::TreeMeta;
use cgmath::Point3;

fn next_pow2(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    let mut p = 1;
    while p < n {
        p <<= 1;
    }
    p
}

/// Owns the flat arrays a [`Bvh3`] borrows from; callers build one of
/// these and then call [`OwnedBvh3::as_bvh`] to get a borrowed view.
pub struct OwnedBvh3 {
    pub nodes: Vec<BBox3<f64>>,
    pub leaves: Vec<BBox3<f64>>,
    pub order: Vec<u32>,
    pub tree: TreeMeta,
}

impl OwnedBvh3 {
    pub fn as_bvh(&self) -> Bvh3<'_, f64, BBox3<f64>> {
        Bvh3::new(&self.nodes, &self.leaves, &self.order, self.tree)
    }
}

/// Build a BVH over `leaf_boxes`, indexed by original primitive index
/// (this becomes the `leaves` array verbatim). `order[pos]` is the
/// original index placed at tree leaf-position `pos`; callers may pass a
/// shuffled permutation to exercise the `order` indirection, or `0..n` for
/// a natural-order tree.
pub fn build_bvh3(leaf_boxes: &[BBox3<f64>], order: Vec<u32>) -> OwnedBvh3 {
    assert_eq!(leaf_boxes.len(), order.len());
    let num_real = leaf_boxes.len();
    let leaf_level_size = next_pow2(num_real);
    let virtual_leaves = (leaf_level_size - num_real) as u32;
    let levels = leaf_level_size.trailing_zeros() + 1;
    let tree = TreeMeta::new(levels, virtual_leaves);

    // Boxes in tree leaf-position order, used only to merge bottom-up.
    let position_ordered: Vec<BBox3<f64>> = order.iter().map(|&i| leaf_boxes[i as usize]).collect();

    let mut levels_bottom_up: Vec<Vec<BBox3<f64>>> = Vec::new();
    let mut current = position_ordered;
    while current.len() > 1 {
        let mut parent = Vec::with_capacity((current.len() + 1) / 2);
        let mut i = 0;
        while i < current.len() {
            if i + 1 < current.len() {
                parent.push(current[i].merge(&current[i + 1]));
            } else {
                // Lone real child; its sibling slot is virtual.
                parent.push(current[i]);
            }
            i += 2;
        }
        levels_bottom_up.push(parent.clone());
        current = parent;
    }
    levels_bottom_up.reverse(); // root-first, matching implicit-index order

    let nodes: Vec<BBox3<f64>> = levels_bottom_up.into_iter().flatten().collect();

    OwnedBvh3 {
        nodes,
        leaves: leaf_boxes.to_vec(),
        order,
        tree,
    }
}

pub fn grid_point(x: i32, y: i32, z: i32) -> Point3<f64> {
    Point3::new(x as f64, y as f64, z as f64)
}

pub fn unit_box_at(p: Point3<f64>) -> BBox3<f64> {
    BBox3::new(
        Point3::new(p.x - 0.5, p.y - 0.5, p.z - 0.5),
        Point3::new(p.x + 0.5, p.y + 0.5, p.z + 0.5),
    )
}
