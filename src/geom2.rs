mod kd_tree2;
mod region;
pub mod region_index;

pub type Point2 = parry2d_f64::na::Point2<f64>;
pub type Aabb2 = parry2d_f64::bounding_volume::Aabb;

pub use self::kd_tree2::KdTree2;
pub use self::region::Region;
pub use self::region_index::RegionIndex;
