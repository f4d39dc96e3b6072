mod index_mask;
pub mod points;

pub use index_mask::IndexMask;

use crate::{Point2, Point3};

/// Anything which has a location in the plane. Distance constraints and containment tests only
/// ever look at this location, so elevation and other attributes pass through untouched.
pub trait Planar {
    fn xy(&self) -> Point2;
}

impl Planar for Point2 {
    fn xy(&self) -> Point2 {
        *self
    }
}

impl Planar for Point3 {
    fn xy(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// A single point from a scanned cloud, with the position in a projected (metric) coordinate
/// system and whatever per-point attributes the loader attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudPoint<P = ()> {
    /// The position of the point, the z coordinate is carried but never used for distances
    pub point: Point3,

    /// Opaque per-point attributes (intensity, classification, return number, ...)
    pub payload: P,
}

impl<P> CloudPoint<P> {
    pub fn new(point: Point3, payload: P) -> Self {
        Self { point, payload }
    }
}

impl CloudPoint<()> {
    pub fn from_xyz(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z), ())
    }
}

impl<P> Planar for CloudPoint<P> {
    fn xy(&self) -> Point2 {
        self.point.xy()
    }
}

/// Collect the planar locations of a slice of items, in order.
pub fn planar_coords<T: Planar>(items: &[T]) -> Vec<Point2> {
    items.iter().map(|p| p.xy()).collect()
}
