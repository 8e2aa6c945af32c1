use crate::types::GeoPoint;

/// A horizontal velocity, used for wind
///
/// Follows the meteorological convention: `bearing` is the direction the air
/// comes *from*, in degrees true.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedVector {
    /// Direction the wind blows from (degrees)
    pub bearing: f64,
    /// Speed (m/s)
    pub norm: f64,
}

impl SpeedVector {
    pub const fn new(bearing: f64, norm: f64) -> Self {
        Self { bearing, norm }
    }

    /// Calm air
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.norm == 0.0
    }

    /// Direction the air is moving towards (degrees)
    pub fn downwind(&self) -> f64 {
        (self.bearing + 180.0).rem_euclid(360.0)
    }

    /// Split the wind into components along and across a track
    ///
    /// Returns `(tailwind, crosswind)` in m/s; a headwind gives a negative
    /// tailwind component.
    pub fn components(&self, track: f64) -> (f64, f64) {
        let angle = (self.downwind() - track).to_radians();
        (self.norm * angle.cos(), self.norm * angle.sin())
    }
}

/// Aircraft state consumed by the terrain and thermal searches
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AircraftState {
    pub location: GeoPoint,
    /// Altitude above mean sea level (m)
    pub altitude: f64,
    /// Track over ground (degrees true)
    pub track: f64,
    /// Wind at the aircraft position
    pub wind: SpeedVector,
}

impl AircraftState {
    /// Create a state in calm air
    pub fn new(location: GeoPoint, altitude: f64, track: f64) -> Self {
        Self {
            location,
            altitude,
            track,
            wind: SpeedVector::zero(),
        }
    }

    pub fn with_wind(mut self, wind: SpeedVector) -> Self {
        self.wind = wind;
        self
    }

    pub fn with_track(mut self, track: f64) -> Self {
        self.track = track;
        self
    }
}
