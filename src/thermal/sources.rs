use tracing::debug;

use crate::terrain::TerrainHeight;
use crate::thermal::estimate_thermal_base;
use crate::types::{GeoPoint, SpeedVector};

/// Number of thermal sources remembered
pub const MAX_THERMAL_SOURCES: usize = 20;

/// Wind speed over lift rate above which a source estimate is discarded
pub const MAX_WIND_LIFT_RATIO: f64 = 10.0;

/// Estimated ground trigger point of a thermal
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThermalSource {
    pub location: GeoPoint,
    pub ground_height: f64,
    pub lift_rate: f64,
    /// Time the source was recorded (s)
    pub time: f64,
}

/// Fixed size store of recent thermal sources
#[derive(Debug, Clone, Default)]
pub struct ThermalSourceStore {
    slots: [Option<ThermalSource>; MAX_THERMAL_SOURCES],
}

impl ThermalSourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot for a new source: the first empty one, else the oldest at `time`
    pub fn allocate(&mut self, time: f64) -> &mut Option<ThermalSource> {
        let mut best = 0;
        let mut best_age = 0.0;
        for (i, slot) in self.slots.iter().enumerate() {
            let Some(source) = slot else {
                best = i;
                break;
            };

            let age = time - source.time;
            if age > best_age {
                best = i;
                best_age = age;
            }
        }

        &mut self.slots[best]
    }

    /// Estimate and remember where the thermal just left started
    ///
    /// `estimate` is the thermal centre at `altitude`. Nothing is recorded
    /// when the wind is too strong compared to the lift for the estimate to
    /// be useful, or when the source does not end on terrain above sea level.
    pub fn record<T: TerrainHeight + ?Sized>(
        &mut self,
        terrain: Option<&T>,
        time: f64,
        estimate: GeoPoint,
        altitude: f64,
        lift_rate: f64,
        wind: SpeedVector,
    ) -> Option<&ThermalSource> {
        if lift_rate.is_nan() || lift_rate <= 0.0 || wind.norm / lift_rate > MAX_WIND_LIFT_RATIO {
            debug!(lift_rate, wind = wind.norm, "thermal too weak for source estimate");
            return None;
        }

        let base = estimate_thermal_base(terrain, estimate, altitude, lift_rate, wind)?;
        if base.altitude <= 0.0 {
            return None;
        }

        let source = ThermalSource {
            location: base.location,
            ground_height: base.altitude,
            lift_rate,
            time,
        };
        let source = self.allocate(time).insert(source);
        Some(&*source)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThermalSource> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainGrid;
    use crate::types::BoundingBox;
    use claims::{assert_none, assert_some};

    const THERMAL: GeoPoint = GeoPoint::new(11.0, 47.0);

    fn plateau() -> TerrainGrid {
        let bounds = BoundingBox {
            left: 10.0,
            top: 48.0,
            right: 12.0,
            bottom: 46.0,
        };
        TerrainGrid::flat(bounds, 500.0)
    }

    fn source(time: f64) -> ThermalSource {
        ThermalSource {
            location: THERMAL,
            ground_height: 500.0,
            lift_rate: 2.0,
            time,
        }
    }

    #[test]
    fn allocate_prefers_empty_slots() {
        let mut store = ThermalSourceStore::new();
        for i in 0..5 {
            *store.allocate(i as f64) = Some(source(i as f64));
        }

        assert_eq!(store.len(), 5);
        assert!(store.allocate(10.0).is_none());
    }

    #[test]
    fn allocate_replaces_oldest_when_full() {
        let mut store = ThermalSourceStore::new();
        for i in 0..MAX_THERMAL_SOURCES {
            // oldest entry in the middle
            let time = if i == 7 { 1.0 } else { 100.0 + i as f64 };
            *store.allocate(time) = Some(source(time));
        }
        assert_eq!(store.len(), MAX_THERMAL_SOURCES);

        let slot = store.allocate(200.0);
        assert_eq!(slot.map(|s| s.time), Some(1.0));
    }

    #[test]
    fn record_on_terrain() {
        let terrain = plateau();
        let mut store = ThermalSourceStore::new();

        let recorded = store.record(
            Some(&terrain),
            3_600.0,
            THERMAL,
            1_500.0,
            2.0,
            SpeedVector::new(270.0, 5.0),
        );
        let recorded = *assert_some!(recorded);

        assert_eq!(recorded.ground_height, 500.0);
        assert_eq!(recorded.lift_rate, 2.0);
        assert_eq!(recorded.time, 3_600.0);
        assert_eq!(store.iter().copied().collect::<Vec<_>>(), vec![recorded]);
    }

    #[test]
    fn weak_thermals_in_strong_wind_are_ignored() {
        let terrain = plateau();
        let mut store = ThermalSourceStore::new();

        let wind = SpeedVector::new(270.0, 12.0);
        assert_none!(store.record(Some(&terrain), 0.0, THERMAL, 1_500.0, 1.0, wind));
        assert_none!(store.record(Some(&terrain), 0.0, THERMAL, 1_500.0, 0.0, wind));
        assert!(store.is_empty());
    }

    #[test]
    fn sources_at_sea_level_are_not_kept() {
        let mut store = ThermalSourceStore::new();

        let calm = SpeedVector::zero();
        assert_none!(store.record::<TerrainGrid>(None, 0.0, THERMAL, 1_500.0, 2.0, calm));
        assert!(store.is_empty());
    }

    #[test]
    fn clear_empties_store() {
        let mut store = ThermalSourceStore::new();
        *store.allocate(0.0) = Some(source(0.0));

        store.clear();
        assert!(store.is_empty());
    }
}
