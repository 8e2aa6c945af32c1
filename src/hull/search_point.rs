use std::cmp::Ordering;

use crate::hull::GrahamScan;
use crate::types::{BoundingBox, GeoPoint};

/// A boundary vertex fed into the hull reduction
///
/// `id` is an ordering key chosen by the caller, typically the index of the
/// vertex in the original boundary. It is carried through the reduction
/// untouched so hull vertices can be mapped back to their source.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchPoint {
    pub location: GeoPoint,
    pub id: u32,
}

impl SearchPoint {
    pub const fn new(location: GeoPoint, id: u32) -> Self {
        Self { location, id }
    }
}

/// Cross product of `p0 - p1` and `p2 - p1` (longitude as x, latitude as y)
///
/// Positive when `p2` lies clockwise of the line `p0 → p1`, negative when it
/// lies counter-clockwise, zero when the three points are collinear.
pub(crate) fn direction(p0: GeoPoint, p1: GeoPoint, p2: GeoPoint) -> f64 {
    (p0.lon - p1.lon) * (p2.lat - p1.lat) - (p2.lon - p1.lon) * (p0.lat - p1.lat)
}

/// Total "sortleft" order: longitude, then latitude, then id
///
/// `-0.0` and `0.0` compare equal so equal locations always end up adjacent.
pub(crate) fn sort_left(a: &SearchPoint, b: &SearchPoint) -> Ordering {
    let key = |p: &SearchPoint| (p.location.lon + 0.0, p.location.lat + 0.0);
    let (a_lon, a_lat) = key(a);
    let (b_lon, b_lat) = key(b);

    a_lon
        .total_cmp(&b_lon)
        .then_with(|| a_lat.total_cmp(&b_lat))
        .then_with(|| a.id.cmp(&b.id))
}

/// Signed turn at `b` when walking `a → b → c` (positive = left turn)
fn turn(a: GeoPoint, b: GeoPoint, c: GeoPoint) -> f64 {
    (b.lon - a.lon) * (c.lat - b.lat) - (b.lat - a.lat) * (c.lon - b.lon)
}

/// An ordered polygon boundary made of search points
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPointVector(Vec<SearchPoint>);

impl SearchPointVector {
    pub fn new(points: Vec<SearchPoint>) -> Self {
        Self(points)
    }

    /// Build a vector from plain locations, numbering them in input order
    pub fn from_locations<I: IntoIterator<Item = GeoPoint>>(locations: I) -> Self {
        locations
            .into_iter()
            .zip(0u32..)
            .map(|(location, id)| SearchPoint::new(location, id))
            .collect()
    }

    pub fn as_slice(&self) -> &[SearchPoint] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<SearchPoint> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchPoint> {
        self.0.iter()
    }

    pub fn locations(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.0.iter().map(|p| p.location)
    }

    /// Replace the points by their convex hull
    ///
    /// Returns whether the reduction reported a change. Vectors with fewer
    /// than three points are left as they are but still report `true`.
    pub fn prune_interior(&mut self) -> bool {
        let reduced = GrahamScan::new(&self.0).reduce();
        if reduced.changed {
            self.0 = reduced.points;
        }
        reduced.changed
    }

    /// Check that every consecutive (cyclic) triple turns the same way
    ///
    /// Collinear triples count as not convex. Fewer than three points are
    /// trivially convex.
    pub fn is_convex(&self) -> bool {
        let n = self.0.len();
        if n < 3 {
            return true;
        }

        let mut left = false;
        let mut right = false;
        for i in 0..n {
            let a = self.0[i].location;
            let b = self.0[(i + 1) % n].location;
            let c = self.0[(i + 2) % n].location;

            let t = turn(a, b, c);
            if t > 0.0 {
                left = true;
            } else if t < 0.0 {
                right = true;
            } else {
                return false;
            }
        }
        left != right
    }

    /// Check whether a location lies inside or on the boundary
    ///
    /// Only meaningful for convex boundaries such as the output of
    /// [`prune_interior`](Self::prune_interior). Both windings are accepted.
    pub fn contains(&self, location: GeoPoint) -> bool {
        match self.0.as_slice() {
            [] => false,
            [only] => only.location == location,
            [a, b] => {
                let on_line = turn(a.location, b.location, location) == 0.0;
                on_line
                    && BoundingBox::from_points(&[a.location, b.location])
                        .is_some_and(|bbox| bbox.contains(location))
            }
            points => {
                let n = points.len();
                let mut left = false;
                let mut right = false;
                for i in 0..n {
                    let a = points[i].location;
                    let b = points[(i + 1) % n].location;

                    let t = turn(a, b, location);
                    if t > 0.0 {
                        left = true;
                    } else if t < 0.0 {
                        right = true;
                    }
                    if left && right {
                        return false;
                    }
                }
                true
            }
        }
    }

    /// Bounding box of all points, `None` when empty
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let locations: Vec<_> = self.locations().collect();
        BoundingBox::from_points(&locations)
    }
}

impl From<Vec<SearchPoint>> for SearchPointVector {
    fn from(points: Vec<SearchPoint>) -> Self {
        Self(points)
    }
}

impl FromIterator<SearchPoint> for SearchPointVector {
    fn from_iter<I: IntoIterator<Item = SearchPoint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SearchPointVector {
    type Item = &'a SearchPoint;
    type IntoIter = std::slice::Iter<'a, SearchPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
