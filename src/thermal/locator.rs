use std::collections::VecDeque;

use tracing::trace;

use crate::types::{FlatPoint, FlatProjection, GeoPoint, SpeedVector};

/// Number of circling samples kept
pub const THERMAL_LOCATOR_SAMPLES: usize = 60;

/// Samples needed before an estimate is made
pub const THERMAL_LOCATOR_MIN_SAMPLES: usize = 5;

/// Age at which a sample's weight has dropped to `1/e` (s)
pub const THERMAL_LOCATOR_DECAY: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    time: f64,
    location: GeoPoint,
    lift: f64,
}

/// Thermal centre, strength and size at the time of an estimate
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThermalEstimate {
    pub location: GeoPoint,
    /// Recency weighted mean of the measured lift (m/s)
    pub lift: f64,
    /// Weighted spread of the drifted samples around `location` (m)
    pub radius: f64,
}

/// Estimates the thermal core from lift measured while circling
///
/// Every sample is drifted with the wind to the time of the estimate, then
/// the positions are averaged with positive lift as weight. Older samples
/// lose weight exponentially.
#[derive(Debug, Clone, Default)]
pub struct ThermalLocator {
    samples: VecDeque<Sample>,
}

impl ThermalLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all samples, e.g. when leaving a thermal
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Add a lift measurement (netto vario, m/s) taken at `time` (s)
    pub fn add_point(&mut self, time: f64, location: GeoPoint, lift: f64) {
        if self.samples.len() == THERMAL_LOCATOR_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample {
            time,
            location,
            lift,
        });
    }

    /// Estimated thermal at `time`
    ///
    /// `location` is the current aircraft position and only anchors the local
    /// projection. Returns `None` until enough samples were collected or when
    /// none of them measured lift.
    pub fn update(
        &self,
        time: f64,
        location: GeoPoint,
        wind: SpeedVector,
    ) -> Option<ThermalEstimate> {
        if self.samples.len() < THERMAL_LOCATOR_MIN_SAMPLES {
            return None;
        }

        let projection = FlatProjection::new(location);
        let downwind = wind.downwind();

        // (drifted position, recency, lift) of every sample in lift
        let lifting: Vec<(FlatPoint, f64, f64)> = self
            .samples
            .iter()
            .filter(|sample| sample.lift > 0.0)
            .map(|sample| {
                let age = (time - sample.time).max(0.0);
                let recency = (-age / THERMAL_LOCATOR_DECAY).exp();
                let drifted = sample.location.project(downwind, wind.norm * age);
                (projection.project(drifted), recency, sample.lift)
            })
            .collect();

        let mut total = 0.0;
        let mut total_recency = 0.0;
        let mut weighted_lift = 0.0;
        let mut centre = FlatPoint::default();
        for &(point, recency, lift) in &lifting {
            let weight = lift * recency;
            centre = centre + point * weight;
            total += weight;
            total_recency += recency;
            weighted_lift += lift * recency;
        }

        if total <= 0.0 || !total.is_finite() || total_recency <= 0.0 {
            return None;
        }
        let centre = centre * (1.0 / total);

        let spread: f64 = lifting
            .iter()
            .map(|&(point, recency, lift)| lift * recency * (point - centre).length().powi(2))
            .sum();

        let estimate = ThermalEstimate {
            location: projection.unproject(centre),
            lift: weighted_lift / total_recency,
            radius: (spread / total).sqrt(),
        };
        trace!(samples = self.samples.len(), ?estimate, "thermal estimate");
        Some(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_none, assert_some};

    const CENTRE: GeoPoint = GeoPoint::new(11.0, 47.0);

    /// One full circle of 12 samples, 2 s apart, radius 150 m
    ///
    /// Lift is strongest on the east side.
    fn circle(locator: &mut ThermalLocator, start: f64) {
        for i in 0..12 {
            let bearing = 30.0 * i as f64;
            let location = CENTRE.project(bearing, 150.0);
            let lift = 2.0 + 1.5 * bearing.to_radians().sin();
            locator.add_point(start + 2.0 * i as f64, location, lift);
        }
    }

    #[test]
    fn needs_enough_samples() {
        let mut locator = ThermalLocator::new();
        for i in 0..4 {
            locator.add_point(i as f64, CENTRE, 2.0);
        }
        assert_none!(locator.update(4.0, CENTRE, SpeedVector::zero()));

        locator.add_point(4.0, CENTRE, 2.0);
        assert_some!(locator.update(4.0, CENTRE, SpeedVector::zero()));
    }

    #[test]
    fn sink_only_gives_no_estimate() {
        let mut locator = ThermalLocator::new();
        for i in 0..10 {
            locator.add_point(i as f64, CENTRE.project(36.0 * i as f64, 100.0), -1.0);
        }
        assert_none!(locator.update(10.0, CENTRE, SpeedVector::zero()));
    }

    #[test]
    fn estimate_moves_towards_strong_lift() {
        let mut locator = ThermalLocator::new();
        circle(&mut locator, 0.0);

        let estimate = locator.update(22.0, CENTRE, SpeedVector::zero()).unwrap();
        assert!(estimate.location.lon > CENTRE.lon);
        assert!(CENTRE.distance(&estimate.location) < 150.0);
    }

    #[test]
    fn lift_is_recency_weighted_mean() {
        let mut locator = ThermalLocator::new();
        for i in 0..5 {
            locator.add_point(i as f64, CENTRE.project(72.0 * i as f64, 100.0), 2.0);
        }
        let steady = assert_some!(locator.update(4.0, CENTRE, SpeedVector::zero()));
        assert!((steady.lift - 2.0).abs() < 1e-12);

        // a strong sample just now outweighs the older ones
        locator.add_point(5.0, CENTRE, 5.0);
        let stronger = assert_some!(locator.update(5.0, CENTRE, SpeedVector::zero()));
        assert!(stronger.lift > 2.5 && stronger.lift < 5.0, "{stronger:?}");
    }

    #[test]
    fn radius_follows_the_circle() {
        let mut locator = ThermalLocator::new();
        // equal lift all around, all at the same time
        for i in 0..12 {
            locator.add_point(10.0, CENTRE.project(30.0 * i as f64, 150.0), 2.0);
        }

        let estimate = assert_some!(locator.update(10.0, CENTRE, SpeedVector::zero()));
        assert!(CENTRE.distance(&estimate.location) < 1.0);
        assert!((estimate.radius - 150.0).abs() < 1.0, "{estimate:?}");

        let mut tight = ThermalLocator::new();
        for i in 0..12 {
            tight.add_point(10.0, CENTRE.project(30.0 * i as f64, 60.0), 2.0);
        }
        let narrow = assert_some!(tight.update(10.0, CENTRE, SpeedVector::zero()));
        assert!(narrow.radius < estimate.radius);
    }

    #[test]
    fn estimate_drifts_with_wind() {
        let mut locator = ThermalLocator::new();
        circle(&mut locator, 0.0);

        let calm = locator.update(22.0, CENTRE, SpeedVector::zero()).unwrap();
        // southerly wind pushes the thermal north
        let windy = locator.update(22.0, CENTRE, SpeedVector::new(180.0, 5.0)).unwrap();
        assert!(windy.location.lat > calm.location.lat);
    }

    #[test]
    fn ring_is_bounded() {
        let mut locator = ThermalLocator::new();
        for i in 0..100 {
            circle(&mut locator, 24.0 * i as f64);
        }
        assert_eq!(locator.len(), THERMAL_LOCATOR_SAMPLES);

        locator.reset();
        assert!(locator.is_empty());
    }
}
