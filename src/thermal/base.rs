use tracing::debug;

use crate::terrain::{Rounding, TerrainHeight, ground_height};
use crate::types::{GeoPoint, SpeedVector};

/// Number of steps the rise of a thermal is traced back in
const BASE_STEPS: usize = 10;

/// Where a thermal left the ground
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThermalBase {
    pub location: GeoPoint,
    /// Ground elevation at `location` (m)
    pub altitude: f64,
}

/// Trace a thermal back down to the ground
///
/// The air at `location` and `altitude` is assumed to have risen at
/// `lift_rate` while drifting with `wind`. Going back in time moves it
/// up-wind and down until it meets the terrain; without terrain it ends at
/// sea level. Returns `None` for non-positive lift or altitude.
pub fn estimate_thermal_base<T: TerrainHeight + ?Sized>(
    terrain: Option<&T>,
    location: GeoPoint,
    altitude: f64,
    lift_rate: f64,
    wind: SpeedVector,
) -> Option<ThermalBase> {
    if !(lift_rate > 0.0 && altitude > 0.0) || !altitude.is_finite() {
        return None;
    }

    // rise time from sea level
    let t_max = altitude / lift_rate;
    // going back in time is moving towards where the wind comes from
    let upwind = |t: f64| location.project(wind.bearing, wind.norm * t);

    let step = t_max / BASE_STEPS as f64;
    let rounding = Rounding::between(location, upwind(step));

    for i in 1..=BASE_STEPS {
        let t = step * i as f64;
        let here = upwind(t);
        let ground = terrain.map_or(0.0, |terrain| ground_height(terrain, here, rounding));
        let dh = altitude - lift_rate * t - ground;

        if dh < 0.0 {
            // back off to where the thermal was level with this ground
            let t = t + dh / lift_rate;
            let base = ThermalBase {
                location: upwind(t),
                altitude: ground,
            };
            debug!(?base, t, "thermal base on terrain");
            return Some(base);
        }
    }

    let base = ThermalBase {
        location: upwind(t_max),
        altitude: 0.0,
    };
    debug!(?base, t = t_max, "thermal base at sea level");
    Some(base)
}
