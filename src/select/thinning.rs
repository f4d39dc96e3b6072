//! Greedy minimum-distance thinning, the first pass of the constrained selection.

use crate::common::IndexMask;
use crate::{KdTree2, Point2};

/// The state of one thinning pass. Every flag lives in an explicit mask indexed by point
/// position, and the pass mutates them from a single thread only.
struct Thinning<'a> {
    points: &'a [Point2],
    tree: KdTree2,
    radius: f64,
    selected: IndexMask,
    covered: IndexMask,
}

impl<'a> Thinning<'a> {
    fn new(points: &'a [Point2], radius: f64) -> Self {
        Thinning {
            points,
            tree: KdTree2::new(points),
            radius,
            selected: IndexMask::new(points.len(), false),
            covered: IndexMask::new(points.len(), false),
        }
    }

    fn visit(&mut self, i: usize) {
        if self.covered.get(i) {
            return;
        }

        self.selected.set(i, true);

        // The neighborhood includes `i` itself. Anything already selected inside it can only be
        // `i`, since every earlier selection covered its own neighborhood.
        for (n, _) in self.tree.within(&self.points[i], self.radius) {
            self.covered.set(n, true);
        }
        self.covered.set(i, true);
    }
}

/// Greedily pick points so that no two picked points are closer than `min_distance`. Points are
/// visited in the order given by `order`; a visited point is picked unless an earlier pick
/// already lies within `min_distance` of it, in which case it is skipped for good. Indices not
/// present in `order` are never picked.
///
/// The result is a valid but not maximal-cardinality packing, and it depends on the visiting
/// order. Shuffling the order removes any bias from the input's original ordering.
///
/// # Arguments
///
/// * `points`: the candidate locations
/// * `order`: the indices of `points` to visit, in visiting order
/// * `min_distance`: the minimum allowed spacing between picked points
///
/// returns: IndexMask with the picked points set to true
pub fn thin_min_distance(points: &[Point2], order: &[usize], min_distance: f64) -> IndexMask {
    let mut thinning = Thinning::new(points, min_distance);
    for &i in order {
        thinning.visit(i);
    }

    tracing::debug!(
        candidates = order.len(),
        selected = thinning.selected.count_true(),
        "Finished minimum distance thinning"
    );
    thinning.selected
}
