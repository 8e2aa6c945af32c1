mod aircraft;
mod bounding_box;
mod flat;
mod geo_point;

pub use aircraft::*;
pub use bounding_box::*;
pub use flat::*;
pub use geo_point::*;
