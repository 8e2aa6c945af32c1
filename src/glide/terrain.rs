use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::glide::{GlidePolar, GlideSolution};
use crate::terrain::{Rounding, TerrainHeight, ground_height};
use crate::types::{AircraftState, GeoPoint};

/// Search range used when the caller gives none (m)
pub const DEFAULT_MAX_RANGE: f64 = 20_000.0;

/// Number of equal subdivisions of the searched distance
pub const DEFAULT_STEPS: usize = 10;

/// Tuning of the terrain intersection search
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GlideTerrainSettings {
    /// Clearance that has to be kept above the ground (m)
    pub safety_height: f64,
    /// Search range when a search is not given one (m)
    pub default_max_range: f64,
    /// Number of terrain samples along the searched distance
    pub steps: usize,
}

impl Default for GlideTerrainSettings {
    fn default() -> Self {
        Self {
            safety_height: 0.0,
            default_max_range: DEFAULT_MAX_RANGE,
            steps: DEFAULT_STEPS,
        }
    }
}

impl GlideTerrainSettings {
    /// Settings for a map showing `range` meters, never searching less than
    /// [`DEFAULT_MAX_RANGE`] by default
    pub fn for_screen_range(range: f64) -> Self {
        Self {
            default_max_range: range.max(DEFAULT_MAX_RANGE),
            ..Self::default()
        }
    }

    pub fn with_safety_height(mut self, safety_height: f64) -> Self {
        self.safety_height = safety_height;
        self
    }
}

/// Outcome of a terrain intersection search
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainIntersection {
    /// The glide path meets the ground
    Hit {
        location: GeoPoint,
        /// Distance from the origin (m)
        range: f64,
        /// Ground elevation at `location` (m)
        altitude: f64,
    },
    /// No ground contact within `range`, or no terrain to search
    OutOfRange { range: f64 },
}

impl TerrainIntersection {
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    /// Distance to the hit, or the distance that was searched
    pub fn range(&self) -> f64 {
        match *self {
            Self::Hit { range, .. } | Self::OutOfRange { range } => range,
        }
    }

    pub fn location(&self) -> Option<GeoPoint> {
        match *self {
            Self::Hit { location, .. } => Some(location),
            Self::OutOfRange { .. } => None,
        }
    }

    pub fn altitude(&self) -> Option<f64> {
        match *self {
            Self::Hit { altitude, .. } => Some(altitude),
            Self::OutOfRange { .. } => None,
        }
    }
}

/// Reach of a glide in every direction around the aircraft
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    /// Ground contact or search edge per swept track, starting north,
    /// clockwise, first point repeated at the end
    pub points: Vec<GeoPoint>,
    /// Lowest terrain that was cleared on any of the tracks
    pub terrain_base: Option<f64>,
}

/// Glide path versus terrain
///
/// The terrain reference is borrowed for the lifetime of the search object.
/// When the terrain lives in a [`SharedTerrain`](crate::SharedTerrain), the
/// read guard has to outlive this object, so all searches see one snapshot.
#[derive(Debug)]
pub struct GlideTerrain<'a, T: ?Sized> {
    terrain: Option<&'a T>,
    settings: GlideTerrainSettings,
}

impl<'a, T: TerrainHeight + ?Sized> GlideTerrain<'a, T> {
    pub fn new(terrain: Option<&'a T>, settings: GlideTerrainSettings) -> Self {
        Self { terrain, settings }
    }

    pub fn settings(&self) -> &GlideTerrainSettings {
        &self.settings
    }

    pub fn has_terrain(&self) -> bool {
        self.terrain.is_some()
    }

    /// Glide along the track at the polar's speed to fly
    pub fn find_intersection(
        &self,
        origin: &AircraftState,
        polar: &GlidePolar,
        max_range: Option<f64>,
    ) -> Result<TerrainIntersection> {
        let loss = polar.altitude_per_distance(origin.track, origin.wind);
        self.search(origin, loss, max_range, &mut None)
    }

    /// Glide along the track at the slope of a precomputed solution
    ///
    /// A solution without distance left is searched in level flight.
    pub fn find_intersection_with_solution(
        &self,
        origin: &AircraftState,
        solution: &GlideSolution,
        max_range: Option<f64>,
    ) -> Result<TerrainIntersection> {
        let loss = solution
            .altitude_per_distance()
            .ok_or(Error::InvalidSolution {
                distance: solution.distance,
                altitude_loss: solution.altitude_loss,
            })?;
        self.search(origin, Some(loss), max_range, &mut None)
    }

    /// Level flight along the track
    pub fn find_intersection_cruise(
        &self,
        origin: &AircraftState,
        max_range: Option<f64>,
    ) -> Result<TerrainIntersection> {
        self.search(origin, Some(0.0), max_range, &mut None)
    }

    /// Sweep `sweeps` equally spaced tracks around the aircraft
    pub fn footprint(
        &self,
        state: &AircraftState,
        polar: &GlidePolar,
        sweeps: usize,
    ) -> Result<Footprint> {
        let sweeps = sweeps.max(1);
        let mut terrain_base = None;
        let mut points = Vec::with_capacity(sweeps + 1);

        for i in 0..=sweeps {
            let track = 360.0 * i as f64 / sweeps as f64;
            let origin = state.with_track(track);
            let loss = polar.altitude_per_distance(track, state.wind);

            let point = match self.search(&origin, loss, None, &mut terrain_base)? {
                TerrainIntersection::Hit { location, .. } => location,
                TerrainIntersection::OutOfRange { range } => state.location.project(track, range),
            };
            points.push(point);
        }

        debug!(sweeps, ?terrain_base, "computed glide footprint");
        Ok(Footprint {
            points,
            terrain_base,
        })
    }

    fn search(
        &self,
        origin: &AircraftState,
        loss: Option<f64>,
        max_range: Option<f64>,
        terrain_base: &mut Option<f64>,
    ) -> Result<TerrainIntersection> {
        if !origin.location.is_valid() {
            return Err(Error::InvalidOrigin {
                location: origin.location,
            });
        }
        if !origin.altitude.is_finite() {
            return Err(Error::InvalidAltitude(origin.altitude));
        }
        let max_range = max_range.unwrap_or(self.settings.default_max_range);
        if !max_range.is_finite() || max_range < 0.0 {
            return Err(Error::NegativeRange(max_range));
        }

        let Some(terrain) = self.terrain else {
            debug!(max_range, "no terrain, skipping intersection search");
            return Ok(TerrainIntersection::OutOfRange { range: max_range });
        };

        let altitude = origin.altitude;
        let loss = match loss {
            Some(loss) if loss > 0.0 && altitude <= 0.0 => None,
            loss => loss,
        };
        let Some(loss) = loss else {
            debug!(track = origin.track, altitude, "no progress possible along track");
            let ground = ground_height(terrain, origin.location, Rounding::none());
            return Ok(TerrainIntersection::Hit {
                location: origin.location,
                range: 0.0,
                altitude: ground,
            });
        };

        let glide_range = if loss > 0.0 {
            altitude / loss
        } else {
            f64::INFINITY
        };
        let glide_limited = glide_range <= max_range;
        let range = max_range.min(glide_range);
        if range == 0.0 {
            return Ok(TerrainIntersection::OutOfRange { range });
        }

        let steps = self.settings.steps.max(1);
        let safety = self.settings.safety_height;
        let track = origin.track;
        let rounding = Rounding::between(
            origin.location,
            origin.location.project(track, range / steps as f64),
        );

        debug!(
            track,
            altitude, loss, range, glide_limited, steps, "searching glide path for terrain"
        );

        let mut last_t = 0.0;
        let mut last_ground = ground_height(terrain, origin.location, rounding);
        let mut last_dh = altitude - last_ground - safety;
        let mut start_under = last_dh < 0.0;

        for i in 1..=steps {
            let t = range * i as f64 / steps as f64;
            // the last step of a glide limited search lands exactly on zero
            let remaining = if glide_limited {
                altitude * (steps - i) as f64 / steps as f64
            } else {
                altitude - loss * t
            };

            let location = origin.location.project(track, t);
            let ground = ground_height(terrain, location, rounding);
            let dh = remaining - ground - safety;
            trace!(step = i, t, remaining, ground, dh, "glide path sample");

            if dh > 0.0 && ground > 0.0 {
                *terrain_base = Some(terrain_base.map_or(ground, |base: f64| base.min(ground)));
            }

            let fraction = if start_under {
                if dh > last_dh {
                    // clearance is improving, once it is positive search normally
                    start_under = dh <= 0.0;
                    None
                } else {
                    Some(0.0)
                }
            } else if dh <= 0.0 {
                if last_dh > 0.0 && dh < last_dh {
                    Some((last_dh / (last_dh - dh)).clamp(0.0, 1.0))
                } else {
                    Some(0.0)
                }
            } else {
                None
            };

            if let Some(f) = fraction {
                let range = last_t + f * (t - last_t);
                let result = TerrainIntersection::Hit {
                    location: origin.location.project(track, range),
                    range,
                    altitude: last_ground + f * (ground - last_ground),
                };
                debug!(?result, "glide path meets terrain");
                return Ok(result);
            }

            last_t = t;
            last_ground = ground;
            last_dh = dh;
        }

        debug!(range, "glide path clear of terrain");
        Ok(TerrainIntersection::OutOfRange { range })
    }
}
