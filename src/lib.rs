//! Polygon-restricted, spacing-constrained subsampling of planar point clouds.
//!
//! The crate has two stages which are normally used in sequence: a [`ContainmentFilter`] which
//! keeps only the points lying inside a set of (repaired) polygon regions, and a constrained
//! selector ([`select`]) which thins the surviving points so that no two are closer than a
//! minimum distance while every kept point still has a neighbor within a maximum distance.

use std::error::Error;

pub mod common;
pub mod errors;
pub mod filter;
pub mod geom2;
pub mod pipeline;
pub mod select;

pub use common::{CloudPoint, IndexMask, Planar};
pub use errors::{InvalidGeometry, InvalidParameter};
pub use filter::{BoundaryMode, ContainmentFilter, RepairReport, filter_points};
pub use geom2::{Aabb2, KdTree2, Point2, Region};
pub use pipeline::{Outcome, PipelineOutput, PipelineReport};
pub use select::{Selection, SelectionParams, select, select_indices, select_indices_with_rng};

pub type Point3 = parry3d_f64::na::Point3<f64>;

pub type Result<T> = std::result::Result<T, Box<dyn Error>>;
