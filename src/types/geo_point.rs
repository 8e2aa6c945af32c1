/// Mean Earth radius used for all great-circle calculations (meters)
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// A geographic location
///
/// Coordinates are stored in degrees. Equality is exact, there is no
/// tolerance involved when comparing two points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Longitude in degrees, positive east
    pub lon: f64,
    /// Latitude in degrees, positive north
    pub lat: f64,
}

impl GeoPoint {
    /// Create a point from longitude and latitude in degrees
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Check that both coordinates are finite and within range
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && self.lon.abs() <= 180.0
            && self.lat.abs() <= 90.0
    }

    /// Great-circle distance to another point in meters (haversine)
    pub fn distance(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let s1 = ((lat2 - lat1) / 2.0).sin();
        let s2 = ((other.lon - self.lon).to_radians() / 2.0).sin();

        let a = (s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2).clamp(0.0, 1.0);
        EARTH_RADIUS * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
    }

    /// Initial bearing towards another point in degrees (0..360)
    ///
    /// Returns 0 for coincident points.
    pub fn bearing(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let y = dlon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
        if x == 0.0 && y == 0.0 {
            return 0.0;
        }
        y.atan2(x).to_degrees().rem_euclid(360.0)
    }

    /// Destination point after travelling `distance` meters on `bearing`
    pub fn project(&self, bearing: f64, distance: f64) -> GeoPoint {
        if distance == 0.0 {
            return *self;
        }

        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();
        let brg = bearing.to_radians();
        let d = distance / EARTH_RADIUS;

        let lat2 = (lat1.sin() * d.cos() + lat1.cos() * d.sin() * brg.cos()).asin();
        let lon2 = lon1
            + (brg.sin() * d.sin() * lat1.cos()).atan2(d.cos() - lat1.sin() * lat2.sin());

        GeoPoint {
            lon: (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0,
            lat: lat2.to_degrees(),
        }
    }

    /// Linear interpolation in coordinate space (`f = 0` is `self`)
    pub fn interpolate(&self, other: &GeoPoint, f: f64) -> GeoPoint {
        GeoPoint {
            lon: self.lon + (other.lon - self.lon) * f,
            lat: self.lat + (other.lat - self.lat) * f,
        }
    }
}
