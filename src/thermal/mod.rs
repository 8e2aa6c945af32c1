//! Thermal centre and thermal source estimation

mod base;
mod locator;
mod sources;

pub use base::{ThermalBase, estimate_thermal_base};
pub use locator::{
    THERMAL_LOCATOR_DECAY, THERMAL_LOCATOR_MIN_SAMPLES, THERMAL_LOCATOR_SAMPLES, ThermalEstimate,
    ThermalLocator,
};
pub use sources::{MAX_THERMAL_SOURCES, MAX_WIND_LIFT_RATIO, ThermalSource, ThermalSourceStore};
