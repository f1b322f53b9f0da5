//! End-to-end traversal scenarios against the bottom-up test builder in
//! `tests/common`.

mod common;

use bvh_traversal::ray::Ray3;
use bvh_traversal::traverse::Options;
use bvh_traversal::{intersect_points3, intersect_rays3};
use cgmath::{Point3, Vector3};
use common::{build_bvh3, grid_point, unit_box_at};

/// Scenario F: a BVH over unit boxes at every integer grid point in
/// (0..=9)^3, queried with a single point inside cell (3,3,3). Exactly one
/// hit should come back, referencing that cell's primitive, regardless of
/// how many threads the traversal uses.
#[test]
fn point_query_hits_exact_grid_cell_independent_of_thread_count() {
    let mut boxes = Vec::new();
    let mut target_index = None;
    for x in 0..10 {
        for y in 0..10 {
            for z in 0..10 {
                if (x, y, z) == (3, 3, 3) {
                    target_index = Some(boxes.len() as u32);
                }
                boxes.push(unit_box_at(grid_point(x, y, z)));
            }
        }
    }
    let target_index = target_index.unwrap();

    let order: Vec<u32> = (0..boxes.len() as u32).collect();
    let owned = build_bvh3(&boxes, order);
    let bvh = owned.as_bvh();

    let query = [Point3::new(3.5, 3.5, 3.5)];

    for &num_threads in &[1usize, 2, 4, 8] {
        let options = Options::new(num_threads, 1);
        let hits = intersect_points3(&bvh, &query, &options);
        assert_eq!(hits.len(), 1, "num_threads={num_threads}");
        assert_eq!(hits[0], (target_index, 0), "num_threads={num_threads}");
    }
}

/// The `order` permutation is exercised directly: shuffle the tree
/// leaf-position assignment so it differs from primitive-array order, and
/// confirm the returned primitive index is still the *original* index,
/// not the tree position.
#[test]
fn point_query_resolves_through_shuffled_order_permutation() {
    let boxes = vec![
        unit_box_at(grid_point(0, 0, 0)),
        unit_box_at(grid_point(5, 5, 5)),
        unit_box_at(grid_point(10, 10, 10)),
        unit_box_at(grid_point(-5, -5, -5)),
    ];
    // Reverse order: tree leaf position 0 holds primitive 3, ..., position 3 holds primitive 0.
    let order = vec![3, 2, 1, 0];
    let owned = build_bvh3(&boxes, order);
    let bvh = owned.as_bvh();

    let query = [Point3::new(5.0, 5.0, 5.0)];
    let options = Options::default();
    let hits = intersect_points3(&bvh, &query, &options);
    assert_eq!(hits, vec![(1, 0)]);
}

/// A single-primitive BVH has no internal levels at all (`tree.levels ==
/// 1`): the root implicit index (1) is already at the leaf level.
#[test]
fn single_primitive_bvh_is_just_the_leaf_level() {
    let boxes = vec![unit_box_at(grid_point(0, 0, 0))];
    let owned = build_bvh3(&boxes, vec![0]);
    assert_eq!(owned.tree.levels, 1);
    let bvh = owned.as_bvh();

    let options = Options::default();
    let hit = intersect_points3(&bvh, &[Point3::new(0.0, 0.0, 0.0)], &options);
    assert_eq!(hit, vec![(0, 0)]);

    let miss = intersect_points3(&bvh, &[Point3::new(10.0, 10.0, 10.0)], &options);
    assert!(miss.is_empty());
}

/// Soundness and completeness: the traversal's result set must equal the
/// brute-force set of (leaf, query) pairs that actually intersect, for a
/// non-power-of-two leaf count (so virtual leaves are exercised) and a
/// batch of rays.
#[test]
fn ray_query_matches_brute_force_with_virtual_leaves() {
    // 13 boxes: not a power of two, so 3 virtual leaves pad to 16.
    let mut boxes = Vec::new();
    for i in 0..13 {
        boxes.push(unit_box_at(grid_point(i * 3, 0, 0)));
    }
    let order: Vec<u32> = (0..boxes.len() as u32).collect();
    let owned = build_bvh3(&boxes, order);
    let bvh = owned.as_bvh();

    let rays = vec![
        Ray3::new(Point3::new(-100.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)), // grazes every box
        Ray3::new(Point3::new(6.0, 0.0, -100.0), Vector3::new(0.0, 0.0, 1.0)), // hits box at i=2 only
        Ray3::new(Point3::new(0.0, 100.0, 0.0), Vector3::new(0.0, -1.0, 0.0)), // hits box at i=0 only
        Ray3::new(Point3::new(0.0, 100.0, 0.0), Vector3::new(0.0, 1.0, 0.0)),  // misses everything
    ];

    let options = Options::new(4, 1);
    let mut got = intersect_rays3(&bvh, &rays, &options);
    got.sort();

    let mut expected = Vec::new();
    for (qi, ray) in rays.iter().enumerate() {
        for (leaf_i, b) in boxes.iter().enumerate() {
            if b.hit_ray(ray) {
                expected.push((leaf_i as u32, qi as u32));
            }
        }
    }
    expected.sort();

    assert_eq!(got, expected);
}

/// Thread count changes the order of pairs only, never the set.
#[test]
fn ray_query_result_set_is_thread_count_invariant() {
    let mut boxes = Vec::new();
    for i in 0..37 {
        boxes.push(unit_box_at(grid_point(i, (i * 7) % 5, (i * 3) % 11)));
    }
    let order: Vec<u32> = (0..boxes.len() as u32).collect();
    let owned = build_bvh3(&boxes, order);
    let bvh = owned.as_bvh();

    let rays: Vec<Ray3<f64>> = (0..20)
        .map(|i| Ray3::new(Point3::new(-50.0, (i % 5) as f64, (i % 11) as f64), Vector3::new(1.0, 0.0, 0.0)))
        .collect();

    let baseline_options = Options::new(1, 1);
    let mut baseline = intersect_rays3(&bvh, &rays, &baseline_options);
    baseline.sort();

    for &num_threads in &[2usize, 3, 8] {
        let options = Options::new(num_threads, 1);
        let mut got = intersect_rays3(&bvh, &rays, &options);
        got.sort();
        assert_eq!(got, baseline, "num_threads={num_threads}");
    }
}

/// An empty query batch returns immediately with no work.
#[test]
fn empty_query_batch_returns_empty() {
    let boxes = vec![unit_box_at(grid_point(0, 0, 0)), unit_box_at(grid_point(1, 0, 0))];
    let owned = build_bvh3(&boxes, vec![0, 1]);
    let bvh = owned.as_bvh();
    let options = Options::default();
    let points: [Point3<f64>; 0] = [];
    assert!(intersect_points3(&bvh, &points, &options).is_empty());
}
