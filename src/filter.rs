//! This module has the containment filter, which reduces a point cloud to the points lying
//! inside at least one of a set of polygon regions.

use crate::common::Planar;
use crate::common::points::is_finite;
use crate::geom2::RegionIndex;
use crate::{Point2, Region};
use geo::MultiPolygon;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How a point lying exactly on a region's edge or vertex is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Only the strict interior of a region counts as inside
    #[default]
    Exclusive,

    /// Points on a region's boundary are also inside
    Inclusive,
}

/// Counts of what happened to the input geometries while building a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RepairReport {
    /// Geometries which ended up as usable regions, repaired or not
    pub accepted: usize,

    /// Of the accepted geometries, how many were invalid and had to be rebuilt
    pub repaired: usize,

    /// Geometries which could not be turned into a non-empty region and were left out
    pub dropped: usize,
}

/// Keeps the points which fall inside at least one of a set of regions. A bounding box R-tree
/// over the regions is built once, so each point is only tested exactly against the few regions
/// whose boxes contain it.
pub struct ContainmentFilter {
    regions: Vec<Region>,
    index: RegionIndex,
    boundary: BoundaryMode,
    report: RepairReport,
}

impl ContainmentFilter {
    /// Create a filter from regions which have already been normalized.
    pub fn new(regions: Vec<Region>) -> Self {
        let report = RepairReport {
            accepted: regions.len(),
            repaired: regions.iter().filter(|r| r.was_repaired()).count(),
            dropped: 0,
        };
        let index = RegionIndex::new(&regions);
        Self {
            regions,
            index,
            boundary: BoundaryMode::default(),
            report,
        }
    }

    /// Create a filter from raw polygon or multi-polygon geometries. Each geometry goes through
    /// `Region::try_repair`, and any which can't be made into a non-empty region are dropped and
    /// counted in the report rather than failing the whole build.
    ///
    /// # Arguments
    ///
    /// * `geometries`: the polygons or multi-polygons to build regions from
    ///
    /// returns: ContainmentFilter
    ///
    /// # Examples
    ///
    /// ```
    /// use cloudthin::{ContainmentFilter, CloudPoint};
    /// use geo::polygon;
    ///
    /// let square = polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 4.0)];
    /// let sliver = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 0.0)];
    /// let filter = ContainmentFilter::from_geometries(vec![square, sliver]);
    /// assert_eq!(filter.report().dropped, 1);
    ///
    /// let points = vec![CloudPoint::from_xyz(1.0, 1.0, 0.0), CloudPoint::from_xyz(9.0, 1.0, 0.0)];
    /// assert_eq!(filter.filter(&points).len(), 1);
    /// ```
    pub fn from_geometries<G>(geometries: impl IntoIterator<Item = G>) -> Self
    where
        G: Into<MultiPolygon<f64>>,
    {
        let mut regions = Vec::new();
        let mut dropped = 0;
        for (i, g) in geometries.into_iter().enumerate() {
            match Region::try_repair(g) {
                Ok(r) => regions.push(r),
                Err(e) => {
                    tracing::warn!(geometry = i, error = %e, "Dropping region");
                    dropped += 1;
                }
            }
        }

        let mut filter = Self::new(regions);
        filter.report.dropped = dropped;
        tracing::debug!(
            accepted = filter.report.accepted,
            repaired = filter.report.repaired,
            dropped,
            "Built containment filter"
        );
        filter
    }

    pub fn with_boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn report(&self) -> RepairReport {
        self.report
    }

    /// Test a single location against all regions
    pub fn contains(&self, point: &Point2) -> bool {
        if !is_finite(point) {
            return false;
        }
        self.index
            .candidates(point)
            .into_iter()
            .any(|i| self.regions[i].contains(point, self.boundary))
    }

    /// Find the indices of the points which lie inside at least one region. The indices are in
    /// ascending order and each appears once, no matter how many overlapping regions contain the
    /// point.
    pub fn filter_indices<T: Planar + Sync>(&self, points: &[T]) -> Vec<usize> {
        if self.regions.is_empty() {
            return Vec::new();
        }

        let kept = (0..points.len())
            .into_par_iter()
            .filter(|&i| self.contains(&points[i].xy()))
            .collect::<Vec<_>>();

        tracing::info!(
            input = points.len(),
            kept = kept.len(),
            "Filtered points to regions"
        );
        kept
    }

    /// Clone the points which lie inside at least one region, preserving input order.
    pub fn filter<T: Planar + Clone + Sync>(&self, points: &[T]) -> Vec<T> {
        self.filter_indices(points)
            .into_iter()
            .map(|i| points[i].clone())
            .collect()
    }
}

/// Keep the points which lie in the strict interior of at least one of `regions`. Invalid
/// geometries are repaired and unusable ones skipped, see `ContainmentFilter::from_geometries`.
pub fn filter_points<T, G>(points: &[T], regions: impl IntoIterator<Item = G>) -> Vec<T>
where
    T: Planar + Clone + Sync,
    G: Into<MultiPolygon<f64>>,
{
    ContainmentFilter::from_geometries(regions).filter(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CloudPoint;
    use geo::{Contains, Polygon, polygon};
    use proptest::prelude::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
        polygon![(x: x0, y: y0), (x: x1, y: y0), (x: x1, y: y1), (x: x0, y: y1)]
    }

    fn grid(n: usize, step: f64) -> Vec<Point2> {
        let mut points = Vec::new();
        for i in 0..n {
            for j in 0..n {
                points.push(Point2::new(i as f64 * step, j as f64 * step));
            }
        }
        points
    }

    #[test]
    fn empty_regions_give_empty_result() {
        let points = grid(5, 1.0);
        let kept = filter_points(&points, Vec::<Polygon<f64>>::new());
        assert!(kept.is_empty());
    }

    #[test]
    fn overlapping_regions_do_not_duplicate() {
        let points = vec![Point2::new(1.5, 1.5), Point2::new(0.5, 0.5), Point2::new(9.0, 9.0)];
        let filter = ContainmentFilter::from_geometries(vec![
            rect(0.0, 0.0, 2.0, 2.0),
            rect(1.0, 1.0, 3.0, 3.0),
        ]);
        assert_eq!(filter.filter_indices(&points), vec![0, 1]);
    }

    #[test]
    fn payload_is_preserved() {
        let points = vec![
            CloudPoint::new(crate::Point3::new(1.0, 1.0, 12.5), "keep"),
            CloudPoint::new(crate::Point3::new(5.0, 5.0, 3.0), "drop"),
        ];
        let kept = filter_points(&points, vec![rect(0.0, 0.0, 2.0, 2.0)]);
        assert_eq!(kept, vec![points[0].clone()]);
    }

    #[test]
    fn boundary_points_follow_mode() {
        let points = vec![Point2::new(0.0, 1.0), Point2::new(1.0, 1.0), Point2::new(2.0, 2.0)];
        let exclusive = ContainmentFilter::from_geometries(vec![rect(0.0, 0.0, 2.0, 2.0)]);
        assert_eq!(exclusive.filter_indices(&points), vec![1]);

        let inclusive = ContainmentFilter::from_geometries(vec![rect(0.0, 0.0, 2.0, 2.0)])
            .with_boundary(BoundaryMode::Inclusive);
        assert_eq!(inclusive.filter_indices(&points), vec![0, 1, 2]);
    }

    #[test]
    fn self_intersecting_region_does_not_fail() {
        let bowtie = polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 10.0, y: 0.0),
            (x: 0.0, y: 10.0),
        ];
        let points = vec![
            Point2::new(2.0, 5.0),
            Point2::new(8.0, 5.0),
            Point2::new(5.0, 2.0),
            Point2::new(5.0, 8.0),
        ];
        let filter = ContainmentFilter::from_geometries(vec![bowtie]);
        assert_eq!(filter.report().repaired, 1);
        assert_eq!(filter.report().dropped, 0);
        assert_eq!(filter.filter_indices(&points), vec![0, 1]);
    }

    #[test]
    fn unusable_regions_are_counted() {
        let sliver = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 0.0)];
        let filter = ContainmentFilter::from_geometries(vec![sliver, rect(0.0, 0.0, 1.0, 1.0)]);
        let report = filter.report();
        assert_eq!(report.accepted, 1);
        assert_eq!(report.dropped, 1);
        assert_eq!(filter.regions().len(), 1);
    }

    #[test]
    fn non_finite_points_are_never_inside() {
        let points = vec![Point2::new(f64::NAN, 1.0), Point2::new(1.0, 1.0)];
        let kept = filter_points(&points, vec![rect(0.0, 0.0, 2.0, 2.0)]);
        assert_eq!(kept, vec![Point2::new(1.0, 1.0)]);
    }

    #[test]
    fn overlapping_parts_of_one_geometry_keep_the_overlap() {
        let parts = MultiPolygon::new(vec![rect(0.0, 0.0, 4.0, 4.0), rect(2.0, 0.0, 6.0, 4.0)]);
        let points = vec![Point2::new(1.0, 2.0), Point2::new(3.0, 2.0), Point2::new(5.0, 2.0)];
        let filter = ContainmentFilter::from_geometries(vec![parts]);
        assert_eq!(filter.report().repaired, 1);
        assert_eq!(filter.report().dropped, 0);
        assert_eq!(filter.filter_indices(&points), vec![0, 1, 2]);
    }

    fn arb_rect() -> impl Strategy<Value = Polygon<f64>> {
        (0.0..20.0f64, 0.0..20.0f64, 0.5..8.0f64, 0.5..8.0f64)
            .prop_map(|(x, y, w, h)| rect(x, y, x + w, y + h))
    }

    /// A self-intersecting bowtie with its two lobes as separate valid triangles
    fn bowtie_and_lobes(x: f64, y: f64, s: f64) -> (Polygon<f64>, Vec<Polygon<f64>>) {
        let (cx, cy) = (x + s / 2.0, y + s / 2.0);
        let bowtie = polygon![(x: x, y: y), (x: x + s, y: y + s), (x: x + s, y: y), (x: x, y: y + s)];
        let left = polygon![(x: x, y: y), (x: cx, y: cy), (x: x, y: y + s)];
        let right = polygon![(x: x + s, y: y), (x: x + s, y: y + s), (x: cx, y: cy)];
        (bowtie, vec![left, right])
    }

    /// A multi-polygon of overlapping rectangles and bowties, paired with the valid pieces it
    /// was made of. A point is inside the geometry exactly when it is inside one of the pieces.
    fn arb_messy_geometry() -> impl Strategy<Value = (MultiPolygon<f64>, Vec<Polygon<f64>>)> {
        let part = prop_oneof![
            arb_rect().prop_map(|r| (r.clone(), vec![r])),
            (0.0..20.0f64, 0.0..20.0f64, 1.0..8.0f64)
                .prop_map(|(x, y, s)| bowtie_and_lobes(x, y, s)),
        ];
        prop::collection::vec(part, 1..5).prop_map(|parts| {
            let (shapes, pieces): (Vec<_>, Vec<_>) = parts.into_iter().unzip();
            (MultiPolygon::new(shapes), pieces.concat())
        })
    }

    fn arb_points() -> impl Strategy<Value = Vec<Point2>> {
        prop::collection::vec((-2.0..30.0f64, -2.0..30.0f64), 0..60)
            .prop_map(|v| v.into_iter().map(|(x, y)| Point2::new(x, y)).collect())
    }

    proptest! {
        #[test]
        fn filter_matches_brute_force(points in arb_points(), polys in prop::collection::vec(arb_rect(), 0..6)) {
            let regions = polys.iter().cloned().map(|p| Region::try_repair(p).unwrap()).collect::<Vec<_>>();
            let expected = points
                .iter()
                .enumerate()
                .filter(|(_, p)| regions.iter().any(|r| r.contains_point(p)))
                .map(|(i, _)| i)
                .collect::<Vec<_>>();

            let filter = ContainmentFilter::new(regions);
            prop_assert_eq!(filter.filter_indices(&points), expected);
        }

        #[test]
        fn messy_geometry_keeps_every_covered_point(
            points in arb_points(),
            geometries in prop::collection::vec(arb_messy_geometry(), 1..4),
        ) {
            let expected = points
                .iter()
                .enumerate()
                .filter(|(_, p)| {
                    let gp = geo::Point::new(p.x, p.y);
                    geometries
                        .iter()
                        .flat_map(|(_, pieces)| pieces)
                        .any(|piece| piece.contains(&gp))
                })
                .map(|(i, _)| i)
                .collect::<Vec<_>>();

            let count = geometries.len();
            let filter = ContainmentFilter::from_geometries(geometries.into_iter().map(|(g, _)| g));
            prop_assert_eq!(filter.report().dropped, 0);
            prop_assert_eq!(filter.report().accepted, count);
            prop_assert_eq!(filter.filter_indices(&points), expected);
        }

        #[test]
        fn filter_is_idempotent(points in arb_points(), polys in prop::collection::vec(arb_rect(), 0..6)) {
            let filter = ContainmentFilter::from_geometries(polys);
            let once = filter.filter(&points);
            let twice = filter.filter(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
