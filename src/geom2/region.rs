//! Polygon regions used to restrict a point cloud. Regions arrive from external loaders and may
//! be topologically invalid, so they are normalized before any containment query is run.

use crate::errors::InvalidGeometry;
use crate::filter::BoundaryMode;
use crate::{Aabb2, Point2, Result};
use geo::{
    Area, BooleanOps, BoundingRect, Contains, CoordsIter, Intersects, MultiPolygon, Validation,
};

/// A valid, non-empty planar (multi-)polygon along with its bounding box.
#[derive(Debug, Clone)]
pub struct Region {
    shape: MultiPolygon<f64>,
    aabb: Aabb2,
    repaired: bool,
}

impl Region {
    /// Normalize a polygon or multi-polygon into a usable region. Geometry which is already
    /// valid is kept exactly as given. Anything else (self-intersecting rings, overlapping
    /// parts, slivers) is rebuilt the way a zero-width buffer would: each part is unioned with
    /// itself to resolve crossings, then the parts are unioned together so that overlaps merge
    /// instead of cancelling out.
    ///
    /// # Arguments
    ///
    /// * `geometry`: a `geo::Polygon<f64>` or `geo::MultiPolygon<f64>`
    ///
    /// returns: Result<Region, Box<dyn Error, Global>>
    ///
    /// # Examples
    ///
    /// ```
    /// use cloudthin::{Point2, Region};
    /// use geo::polygon;
    ///
    /// let square = polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 4.0)];
    /// let region = Region::try_repair(square).unwrap();
    /// assert!(!region.was_repaired());
    /// assert!(region.contains_point(&Point2::new(2.0, 2.0)));
    /// ```
    pub fn try_repair(geometry: impl Into<MultiPolygon<f64>>) -> Result<Self> {
        let shape: MultiPolygon<f64> = geometry.into();
        if shape.coords_iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(Box::new(InvalidGeometry::NonFiniteCoordinates));
        }

        let (shape, repaired) = if shape.is_valid() {
            (shape, false)
        } else {
            (dissolve(&shape), true)
        };

        if shape.0.is_empty() || shape.unsigned_area() <= 0.0 {
            return Err(Box::new(InvalidGeometry::EmptyAfterRepair));
        }

        let rect = shape
            .bounding_rect()
            .ok_or(InvalidGeometry::EmptyAfterRepair)?;
        let aabb = Aabb2::new(
            Point2::new(rect.min().x, rect.min().y),
            Point2::new(rect.max().x, rect.max().y),
        );

        Ok(Self {
            shape,
            aabb,
            repaired,
        })
    }

    /// The normalized geometry of the region
    pub fn shape(&self) -> &MultiPolygon<f64> {
        &self.shape
    }

    pub fn aabb(&self) -> &Aabb2 {
        &self.aabb
    }

    /// True if the input geometry was invalid and had to be rebuilt
    pub fn was_repaired(&self) -> bool {
        self.repaired
    }

    pub fn area(&self) -> f64 {
        self.shape.unsigned_area()
    }

    /// Test whether a point lies inside the region. With `BoundaryMode::Exclusive` only the
    /// strict interior counts, with `BoundaryMode::Inclusive` points on an edge or vertex are
    /// also accepted.
    pub fn contains(&self, point: &Point2, mode: BoundaryMode) -> bool {
        let p = geo::Point::new(point.x, point.y);
        match mode {
            BoundaryMode::Exclusive => self.shape.contains(&p),
            BoundaryMode::Inclusive => self.shape.intersects(&p),
        }
    }

    /// Strict interior containment
    pub fn contains_point(&self, point: &Point2) -> bool {
        self.contains(point, BoundaryMode::Exclusive)
    }
}

/// Rebuild an invalid multi-polygon as the union of its repaired parts. geo's boolean ops fill
/// with the even-odd rule, so overlapping parts must be merged one at a time; a single pass over
/// the whole multi-polygon would punch holes where parts overlap.
fn dissolve(shape: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    let empty = MultiPolygon::new(Vec::new());
    shape
        .0
        .iter()
        .fold(empty.clone(), |acc, part| acc.union(&part.union(&empty)))
}
