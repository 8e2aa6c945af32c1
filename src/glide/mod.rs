//! Glide performance and glide path versus terrain

mod polar;
mod solution;
mod terrain;

pub use polar::{DEFAULT_V_MAX, GlidePolar};
pub use solution::GlideSolution;
pub use terrain::{
    DEFAULT_MAX_RANGE, DEFAULT_STEPS, Footprint, GlideTerrain, GlideTerrainSettings,
    TerrainIntersection,
};
