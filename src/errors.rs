use std::error::Error;
use std::fmt::{Display, Formatter};

/// A polygon region which could not be turned into usable geometry, even after repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidGeometry {
    /// The geometry has no area left once self-intersections and slivers were resolved
    EmptyAfterRepair,

    /// At least one vertex has a NaN or infinite coordinate
    NonFiniteCoordinates,
}

impl Display for InvalidGeometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for InvalidGeometry {}

/// A violation of the distance parameter contract `0 < min_distance <= max_distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidParameter {
    MinDistanceNotPositive(f64),
    MaxBelowMin { min_distance: f64, max_distance: f64 },
    NonFinite,
}

impl Display for InvalidParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidParameter::MinDistanceNotPositive(d) => {
                write!(f, "min_distance must be positive, got {}", d)
            }
            InvalidParameter::MaxBelowMin {
                min_distance,
                max_distance,
            } => write!(
                f,
                "max_distance ({}) must not be less than min_distance ({})",
                max_distance, min_distance
            ),
            InvalidParameter::NonFinite => write!(f, "distance parameters must be finite"),
        }
    }
}

impl Error for InvalidParameter {}
