//! Common operations on f64 points in D-dimensional space.

use parry2d_f64::na::Point;

/// Returns the distance between two points in D-dimensional space.
///
/// # Arguments
///
/// * `a`: the first point
/// * `b`: the second point
///
/// returns: f64
///
/// # Examples
///
/// ```
/// use cloudthin::common::points::dist;
/// use cloudthin::Point2;
/// let a = Point2::new(1.0, 2.0);
/// let b = Point2::new(3.0, 2.0);
/// let d = dist(&a, &b);
/// assert_eq!(d, 2.0);
/// ```
pub fn dist<const D: usize>(a: &Point<f64, D>, b: &Point<f64, D>) -> f64 {
    (a - b).norm()
}

/// Returns true if every coordinate of the point is finite.
pub fn is_finite<const D: usize>(p: &Point<f64, D>) -> bool {
    p.coords.iter().all(|c| c.is_finite())
}
