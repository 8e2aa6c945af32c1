use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Terrain shared between a loader and any number of searches
///
/// A search holds the read guard for its whole duration, so every step of it
/// sees the same terrain snapshot:
///
/// ```
/// use glide_geometry::{
///     AircraftState, BoundingBox, GeoPoint, GlideTerrain, GlideTerrainSettings, SharedTerrain,
///     TerrainGrid,
/// };
///
/// let bounds = BoundingBox { left: 6.0, top: 48.0, right: 8.0, bottom: 46.0 };
/// let terrain = SharedTerrain::new(TerrainGrid::flat(bounds, 400.0));
///
/// let state = AircraftState::new(GeoPoint::new(7.0, 47.0), 1000.0, 90.0);
/// let guard = terrain.read();
/// let search = GlideTerrain::new(Some(&*guard), GlideTerrainSettings::default());
/// let result = search.find_intersection_cruise(&state, Some(5_000.0)).unwrap();
/// assert!(result.is_out_of_range());
/// ```
#[derive(Debug, Default)]
pub struct SharedTerrain<T> {
    inner: RwLock<T>,
}

impl<T> SharedTerrain<T> {
    pub fn new(terrain: T) -> Self {
        Self {
            inner: RwLock::new(terrain),
        }
    }

    /// Acquire shared access for the duration of one search
    ///
    /// A writer that panicked leaves the terrain as it was; the data is handed
    /// out anyway.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquire exclusive access, e.g. to swap in a newly loaded map
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
