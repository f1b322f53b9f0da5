//! Parallel top-down BVH traversal.
//!
//! The engine itself doesn't know whether it's testing rays or points, or
//! 2D or 3D volumes — [`Bvh2`]/[`Bvh3`] and their `Volume` bound only
//! matter to the public entry points in [`crate::lib`], which hand this
//! module a `test` closure. What's dimension-agnostic here is the hard
//! part: the BFS frontier, the per-level partitioning, and the lock-free
//! compaction of per-task output regions.

use std::ops::Range;

use crate::tree::TreeMeta;

/// Tunables for a traversal call.
///
/// A plain struct built by the caller and passed by reference, with
/// `Default` resolving `num_threads` via [`num_cpus::get`].
#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub num_threads: usize,
    pub min_traversals_per_thread: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            num_threads: num_cpus::get(),
            min_traversals_per_thread: 100,
        }
    }
}

impl Options {
    pub fn new(num_threads: usize, min_traversals_per_thread: usize) -> Self {
        debug_assert!(num_threads >= 1);
        debug_assert!(min_traversals_per_thread >= 1);
        Options {
            num_threads,
            min_traversals_per_thread,
        }
    }
}

/// A single entry in the BVTT frontier: a node/leaf implicit index paired
/// with the index of the query it's being tested against.
pub type Pair = (u32, u32);

/// Split `0..n` into contiguous ranges, at most `options.num_threads` of
/// them, each at least `options.min_traversals_per_thread` wide (except
/// possibly the last).
fn partition(n: usize, options: &Options) -> Vec<Range<usize>> {
    if n == 0 {
        return Vec::new();
    }
    let even_share = (n + options.num_threads - 1) / options.num_threads;
    let chunk = std::cmp::max(options.min_traversals_per_thread, even_share);

    let mut ranges = Vec::new();
    let mut start = 0;
    while start < n {
        let end = std::cmp::min(start + chunk, n);
        ranges.push(start..end);
        start = end;
    }
    ranges
}

/// Run `process` over `0..src_len`, split across `ranges.len()` tasks
/// writing into disjoint `out_factor`-sized regions of `dst`, then compact
/// the written prefixes into a single contiguous run starting at `dst[0]`.
///
/// When the partitioner returns a single task, `process` runs inline on
/// the whole range and writes directly into `dst` — no region splitting,
/// no compaction.
fn run_level<F>(src_len: usize, out_factor: usize, options: &Options, dst: &mut [Pair], process: F) -> usize
where
    F: Fn(Range<usize>, &mut [Pair]) -> usize + Sync,
{
    let ranges = partition(src_len, options);
    if ranges.is_empty() {
        return 0;
    }
    if ranges.len() == 1 {
        return process(0..src_len, dst);
    }

    let mut region_starts = Vec::with_capacity(ranges.len());
    let mut offset = 0;
    for r in &ranges {
        region_starts.push(offset);
        offset += out_factor * r.len();
    }

    let mut counts = vec![0usize; ranges.len()];
    std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(ranges.len());
        let mut remaining = dst;
        for r in ranges.iter().cloned() {
            let region_len = out_factor * r.len();
            let (region, rest) = remaining.split_at_mut(region_len);
            remaining = rest;
            let process = &process;
            handles.push(scope.spawn(move || process(r, region)));
        }
        for (i, h) in handles.into_iter().enumerate() {
            counts[i] = h.join().expect("traversal task panicked");
        }
    });

    // Task 1's region already starts at dst[0]; only tasks 2..T need
    // copying, each immediately after the previous task's written tail.
    let mut write_at = counts[0];
    for i in 1..ranges.len() {
        let written = counts[i];
        if written > 0 {
            let start = region_starts[i];
            dst.copy_within(start..start + written, write_at);
        }
        write_at += written;
    }
    write_at
}

/// Test one range of internal-node pairs against `nodes`, expanding hits
/// into `dst` as left/right child pairs.
fn nodes_range<V: Copy, Q>(
    nodes: &[V],
    tree: &TreeMeta,
    level: u32,
    queries: &[Q],
    src: &[Pair],
    range: Range<usize>,
    dst: &mut [Pair],
    test: &(impl Fn(&V, &Q) -> bool + Sync),
) -> usize {
    let virtual_before = tree.virtual_nodes_before(level);
    let mut written = 0;
    for &(implicit, q) in &src[range] {
        let storage = (implicit - virtual_before - 1) as usize;
        if test(&nodes[storage], &queries[q as usize]) {
            let left = implicit * 2;
            dst[written] = (left, q);
            written += 1;
            let right = left + 1;
            if !tree.is_virtual(right) {
                dst[written] = (right, q);
                written += 1;
            }
        }
    }
    written
}

/// Test one range of leaf-level pairs against `leaves`, emitting
/// `(leaf_primitive_index, query_index)` hits.
fn leaves_range<V: Copy, Q>(
    leaves: &[V],
    order: &[u32],
    tree: &TreeMeta,
    queries: &[Q],
    src: &[Pair],
    range: Range<usize>,
    out: &mut [Pair],
    test: &(impl Fn(&V, &Q) -> bool + Sync),
) -> usize {
    let num_above = tree.num_above();
    let mut written = 0;
    for &(implicit, q) in &src[range] {
        let pos = (implicit - num_above - 1) as usize;
        let iorder = order[pos];
        if test(&leaves[iorder as usize], &queries[q as usize]) {
            out[written] = (iorder, q);
            written += 1;
        }
    }
    written
}

/// Run a full BFS traversal from the root to the leaves and return the
/// compacted list of `(leaf_primitive_index, query_index)` hits.
///
/// Generic over the bounding-volume type `V` and the query type `Q` so the
/// same engine serves 2D/3D, boxes/spheres, and rays/points alike; callers
/// only need to supply the right `test` predicate (see
/// [`crate::bvh::Volume2`]/[`crate::bvh::Volume3`]).
pub(crate) fn traverse<V, Q>(
    nodes: &[V],
    leaves: &[V],
    order: &[u32],
    tree: &TreeMeta,
    queries: &[Q],
    options: &Options,
    test: impl Fn(&V, &Q) -> bool + Sync,
) -> Vec<Pair>
where
    V: Copy + Sync,
    Q: Sync,
{
    let mut src: Vec<Pair> = (0..queries.len() as u32).map(|q| (1u32, q)).collect();
    let mut dst: Vec<Pair> = Vec::new();

    for level in 1..tree.levels {
        if src.is_empty() {
            break;
        }
        dst.clear();
        dst.resize(src.len() * 2, (0, 0));
        let written = run_level(src.len(), 2, options, &mut dst, |range, region| {
            nodes_range(nodes, tree, level, queries, &src, range, region, &test)
        });
        dst.truncate(written);
        std::mem::swap(&mut src, &mut dst);
    }

    if src.is_empty() {
        return Vec::new();
    }

    let mut result: Vec<Pair> = vec![(0, 0); src.len()];
    let written = run_level(src.len(), 1, options, &mut result, |range, region| {
        leaves_range(leaves, order, tree, queries, &src, range, region, &test)
    });
    result.truncate(written);
    result
}
