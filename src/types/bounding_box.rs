use crate::types::GeoPoint;

/// Bounding box for geographic areas
///
/// Represents a rectangular geographic area defined by longitude and latitude bounds.
/// All coordinates are stored in degrees.
///
/// # Limitations
///
/// **Anti-meridian handling**: This implementation does not correctly handle areas
/// crossing the ±180° longitude line (anti-meridian). Simple min/max logic is used,
/// which will produce incorrect results for such regions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub left: f64,   // west longitude
    pub top: f64,    // north latitude
    pub right: f64,  // east longitude
    pub bottom: f64, // south latitude
}

impl BoundingBox {
    /// Create a bounding box from a slice of points
    ///
    /// Returns `None` if the slice is empty.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let (first, rest) = points.split_first()?;

        let mut bbox = Self::from(*first);
        for &point in rest {
            bbox.extend(point);
        }
        Some(bbox)
    }

    /// Extend bounding box to include a point
    ///
    /// Grows the bounding box if necessary to encompass the given point.
    /// If the point is already inside the bbox, no change is made.
    pub fn extend(&mut self, point: GeoPoint) {
        self.left = self.left.min(point.lon);
        self.right = self.right.max(point.lon);
        self.top = self.top.max(point.lat);
        self.bottom = self.bottom.min(point.lat);
    }

    /// Merge another bounding box into this one
    pub fn merge(&mut self, other: BoundingBox) {
        self.left = self.left.min(other.left);
        self.right = self.right.max(other.right);
        self.top = self.top.max(other.top);
        self.bottom = self.bottom.min(other.bottom);
    }

    /// Check whether a point lies inside or on the edge of the box
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lon >= self.left
            && point.lon <= self.right
            && point.lat >= self.bottom
            && point.lat <= self.top
    }

    /// Width in degrees of longitude
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height in degrees of latitude
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// South-west corner
    pub fn south_west(&self) -> GeoPoint {
        GeoPoint::new(self.left, self.bottom)
    }
}

impl From<GeoPoint> for BoundingBox {
    fn from(point: GeoPoint) -> Self {
        Self {
            left: point.lon,
            top: point.lat,
            right: point.lon,
            bottom: point.lat,
        }
    }
}
