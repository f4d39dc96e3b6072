//! A static kd-tree over planar points, used for the radius queries of the selection passes.

use crate::Point2;
use crate::common::points::is_finite;
use kiddo::SquaredEuclidean;
use kiddo::immutable::float::kdtree::ImmutableKdTree;

type Tree = ImmutableKdTree<f64, usize, 2, 32>;

/// Relative slack applied to the squared radius handed to kiddo. Candidates are always checked
/// again against the exact radius, so this only makes sure nothing sitting on the boundary is
/// lost to the tree's own comparison.
const QUERY_SLACK: f64 = 1e-9;

/// An immutable kd-tree over a slice of planar points. The items returned from queries are the
/// indices of the points in the slice the tree was built from. Points with non-finite
/// coordinates are left out of the tree and will never be returned.
pub struct KdTree2 {
    tree: Option<Tree>,

    /// Maps a position in the tree's source slice back to the caller's index
    items: Vec<usize>,
}

impl KdTree2 {
    pub fn new(points: &[Point2]) -> Self {
        let mut entries = Vec::with_capacity(points.len());
        let mut items = Vec::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            if is_finite(p) {
                entries.push([p.x, p.y]);
                items.push(i);
            }
        }

        let tree = if entries.is_empty() {
            None
        } else {
            Some(Tree::new_from_slice(&entries))
        };

        Self { tree, items }
    }

    /// The number of points held by the tree
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find all points within `radius` of `point`, boundary inclusive (`d <= radius`). The
    /// results are `(index, distance)` pairs in no particular order, and will include a point at
    /// the exact query location if one exists in the tree.
    ///
    /// # Arguments
    ///
    /// * `point`: the query location
    /// * `radius`: the search radius, in the same units as the points
    ///
    /// returns: Vec<(usize, f64), Global>
    pub fn within(&self, point: &Point2, radius: f64) -> Vec<(usize, f64)> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        if !is_finite(point) || radius < 0.0 {
            return Vec::new();
        }

        let r2 = radius * radius;
        let padded = r2 * (1.0 + QUERY_SLACK) + f64::MIN_POSITIVE;
        tree.within_unsorted::<SquaredEuclidean>(&[point.x, point.y], padded)
            .into_iter()
            .filter(|n| n.distance <= r2)
            .map(|n| (self.items[n.item], n.distance.sqrt()))
            .collect()
    }

    /// Count the points within `radius` of `point`, boundary inclusive.
    pub fn count_within(&self, point: &Point2, radius: f64) -> usize {
        self.within(point, radius).len()
    }
}
