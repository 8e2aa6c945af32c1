//! Convex hull reduction of polygon boundaries

mod graham_scan;
mod search_point;

pub use graham_scan::{GrahamScan, ReducedHull};
pub use search_point::{SearchPoint, SearchPointVector};
