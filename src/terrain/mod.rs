//! Terrain height queries

mod grid;
mod shared;

pub use grid::TerrainGrid;
pub use shared::SharedTerrain;

use crate::types::GeoPoint;

/// Lookup precision hint passed along with every terrain query
///
/// Both values are angular half-widths in degrees. A provider may answer with
/// any height representative of the area within that radius, which lets long
/// coarse searches skip fine-grained interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rounding {
    pub lon: f64,
    pub lat: f64,
}

impl Rounding {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Exact lookups
    pub const fn none() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Half the angular distance between two consecutive query locations
    pub fn between(a: GeoPoint, b: GeoPoint) -> Self {
        Self::new((b.lon - a.lon).abs() / 2.0, (b.lat - a.lat).abs() / 2.0)
    }
}

/// A source of ground elevation
///
/// Implementations return `None` when they have no data for a location, for
/// example outside the loaded map. Callers must not read `None` as a height.
pub trait TerrainHeight {
    /// Ground elevation above mean sea level in meters
    fn height(&self, location: GeoPoint, rounding: Rounding) -> Option<f64>;
}

impl<T: TerrainHeight + ?Sized> TerrainHeight for &T {
    fn height(&self, location: GeoPoint, rounding: Rounding) -> Option<f64> {
        (**self).height(location, rounding)
    }
}

impl<T: TerrainHeight + ?Sized> TerrainHeight for Box<T> {
    fn height(&self, location: GeoPoint, rounding: Rounding) -> Option<f64> {
        (**self).height(location, rounding)
    }
}

/// Ground height used by the searches: missing data counts as sea level
pub(crate) fn ground_height<T: TerrainHeight + ?Sized>(
    terrain: &T,
    location: GeoPoint,
    rounding: Rounding,
) -> f64 {
    terrain
        .height(location, rounding)
        .filter(|h| h.is_finite())
        .map_or(0.0, |h| h.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<f64>);

    impl TerrainHeight for Fixed {
        fn height(&self, _: GeoPoint, _: Rounding) -> Option<f64> {
            self.0
        }
    }

    #[test]
    fn rounding_between_points() {
        let rounding = Rounding::between(GeoPoint::new(7.0, 50.0), GeoPoint::new(6.5, 50.25));
        assert_eq!(rounding, Rounding::new(0.25, 0.125));
    }

    #[test]
    fn ground_height_policy() {
        let location = GeoPoint::new(7.0, 50.0);

        assert_eq!(ground_height(&Fixed(Some(420.0)), location, Rounding::none()), 420.0);
        assert_eq!(ground_height(&Fixed(None), location, Rounding::none()), 0.0);
        assert_eq!(ground_height(&Fixed(Some(-28.0)), location, Rounding::none()), 0.0);
        assert_eq!(ground_height(&Fixed(Some(f64::NAN)), location, Rounding::none()), 0.0);
    }

    #[test]
    fn references_and_boxes_are_terrain() {
        let fixed = Fixed(Some(12.0));
        let boxed: Box<dyn TerrainHeight> = Box::new(Fixed(Some(13.0)));
        let location = GeoPoint::new(0.0, 0.0);

        assert_eq!((&fixed).height(location, Rounding::none()), Some(12.0));
        assert_eq!(boxed.height(location, Rounding::none()), Some(13.0));
    }
}
