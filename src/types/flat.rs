use std::ops::{Add, Mul, Sub};

use crate::types::{EARTH_RADIUS, GeoPoint};

/// Point on a local tangent plane (meters east / north of a reference)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlatPoint {
    pub x: f64,
    pub y: f64,
}

impl FlatPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from the reference (m)
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Add for FlatPoint {
    type Output = FlatPoint;

    fn add(self, rhs: FlatPoint) -> FlatPoint {
        FlatPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for FlatPoint {
    type Output = FlatPoint;

    fn sub(self, rhs: FlatPoint) -> FlatPoint {
        FlatPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for FlatPoint {
    type Output = FlatPoint;

    fn mul(self, rhs: f64) -> FlatPoint {
        FlatPoint::new(self.x * rhs, self.y * rhs)
    }
}

/// Equirectangular projection around a reference location
///
/// Accurate enough for the few kilometers a thermal spans.
#[derive(Debug, Clone, Copy)]
pub struct FlatProjection {
    center: GeoPoint,
    meters_per_degree: f64,
    cos_lat: f64,
}

impl FlatProjection {
    pub fn new(center: GeoPoint) -> Self {
        Self {
            center,
            meters_per_degree: EARTH_RADIUS.to_radians(),
            cos_lat: center.lat.to_radians().cos(),
        }
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn project(&self, point: GeoPoint) -> FlatPoint {
        FlatPoint::new(
            (point.lon - self.center.lon) * self.cos_lat * self.meters_per_degree,
            (point.lat - self.center.lat) * self.meters_per_degree,
        )
    }

    pub fn unproject(&self, point: FlatPoint) -> GeoPoint {
        GeoPoint::new(
            self.center.lon + point.x / (self.cos_lat * self.meters_per_degree),
            self.center.lat + point.y / self.meters_per_degree,
        )
    }
}
