//! An R-tree over the bounding boxes of a set of regions, used to prune which polygons need an
//! exact point-in-polygon test for a given query point.

use crate::{Point2, Region};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, RTree};

type RegionBox = GeomWithData<Rectangle<[f64; 2]>, usize>;

pub struct RegionIndex {
    tree: RTree<RegionBox>,
}

impl RegionIndex {
    pub fn new(regions: &[Region]) -> Self {
        let boxes = regions
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let aabb = r.aabb();
                let rect = Rectangle::from_corners(
                    [aabb.mins.x, aabb.mins.y],
                    [aabb.maxs.x, aabb.maxs.y],
                );
                GeomWithData::new(rect, i)
            })
            .collect::<Vec<_>>();

        Self {
            tree: RTree::bulk_load(boxes),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Find the indices of the regions whose bounding box contains the point (boundary
    /// inclusive). Regions not returned here cannot contain the point.
    pub fn candidates(&self, point: &Point2) -> Vec<usize> {
        let envelope = AABB::from_point([point.x, point.y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|b| b.data)
            .collect()
    }
}
