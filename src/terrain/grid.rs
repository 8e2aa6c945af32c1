use crate::error::{Error, Result};
use crate::terrain::{Rounding, TerrainHeight};
use crate::types::{BoundingBox, GeoPoint};

/// Regular lon/lat elevation grid held in memory
///
/// Heights are stored row-major starting at the south-west corner: row `0` is
/// the southern edge, column `0` the western edge. Cells without data are
/// `None`. Queries outside the bounds have no data either.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainGrid {
    bounds: BoundingBox,
    cols: usize,
    rows: usize,
    lon_step: f64,
    lat_step: f64,
    heights: Vec<Option<f64>>,
}

impl TerrainGrid {
    pub fn new(
        bounds: BoundingBox,
        cols: usize,
        rows: usize,
        heights: Vec<Option<f64>>,
    ) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(Error::EmptyGrid);
        }

        let expected = cols * rows;
        if heights.len() != expected {
            return Err(Error::InvalidGrid {
                expected,
                actual: heights.len(),
            });
        }

        Ok(Self {
            bounds,
            cols,
            rows,
            lon_step: step(bounds.width(), cols),
            lat_step: step(bounds.height(), rows),
            heights,
        })
    }

    /// Sample `f` at every grid node
    pub fn from_fn<F>(bounds: BoundingBox, cols: usize, rows: usize, f: F) -> Result<Self>
    where
        F: Fn(GeoPoint) -> Option<f64>,
    {
        if cols == 0 || rows == 0 {
            return Err(Error::EmptyGrid);
        }

        let lon_step = step(bounds.width(), cols);
        let lat_step = step(bounds.height(), rows);

        let mut heights = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                heights.push(f(GeoPoint::new(
                    bounds.left + col as f64 * lon_step,
                    bounds.bottom + row as f64 * lat_step,
                )));
            }
        }

        Self::new(bounds, cols, rows, heights)
    }

    /// A grid of constant height
    pub fn flat(bounds: BoundingBox, height: f64) -> Self {
        Self {
            bounds,
            cols: 2,
            rows: 2,
            lon_step: bounds.width(),
            lat_step: bounds.height(),
            heights: vec![Some(height); 4],
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn at(&self, col: usize, row: usize) -> Option<f64> {
        self.heights
            .get(row * self.cols + col)
            .copied()
            .flatten()
    }

    /// Fractional grid coordinates of a location inside the bounds
    fn position(&self, location: GeoPoint) -> (f64, f64) {
        let x = if self.lon_step > 0.0 {
            (location.lon - self.bounds.left) / self.lon_step
        } else {
            0.0
        };
        let y = if self.lat_step > 0.0 {
            (location.lat - self.bounds.bottom) / self.lat_step
        } else {
            0.0
        };

        (
            x.clamp(0.0, (self.cols - 1) as f64),
            y.clamp(0.0, (self.rows - 1) as f64),
        )
    }

    fn nearest(&self, x: f64, y: f64) -> Option<f64> {
        self.at(x.round() as usize, y.round() as usize)
    }
}

impl TerrainHeight for TerrainGrid {
    fn height(&self, location: GeoPoint, rounding: Rounding) -> Option<f64> {
        if !location.is_valid() || !self.bounds.contains(location) {
            return None;
        }

        let (x, y) = self.position(location);

        // a rounding radius spanning a cell allows skipping the interpolation
        let coarse = rounding.lon >= self.lon_step && rounding.lat >= self.lat_step;
        if coarse {
            return self.nearest(x, y);
        }

        let x0 = x.floor() as usize;
        let y0 = y.floor() as usize;
        let x1 = (x0 + 1).min(self.cols - 1);
        let y1 = (y0 + 1).min(self.rows - 1);
        let dx = x - x0 as f64;
        let dy = y - y0 as f64;

        match (
            self.at(x0, y0),
            self.at(x1, y0),
            self.at(x0, y1),
            self.at(x1, y1),
        ) {
            (Some(v00), Some(v10), Some(v01), Some(v11)) => {
                let v0 = v00 + (v10 - v00) * dx;
                let v1 = v01 + (v11 - v01) * dx;
                Some(v0 + (v1 - v0) * dy)
            }
            _ => self.nearest(x, y),
        }
    }
}

fn step(extent: f64, nodes: usize) -> f64 {
    if nodes > 1 {
        extent / (nodes - 1) as f64
    } else {
        0.0
    }
}
