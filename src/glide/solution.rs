/// Precomputed glide over a known distance, e.g. the remainder of a task
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlideSolution {
    /// Horizontal distance (m)
    pub distance: f64,
    /// Height lost over `distance` (m)
    pub altitude_loss: f64,
}

impl GlideSolution {
    pub const fn new(distance: f64, altitude_loss: f64) -> Self {
        Self {
            distance,
            altitude_loss,
        }
    }

    /// Height lost per meter, `None` for a negative or non-finite solution
    ///
    /// A solution that gains height, or one with nothing left to fly, is
    /// flown level.
    pub fn altitude_per_distance(&self) -> Option<f64> {
        if !self.distance.is_finite() || self.distance < 0.0 || !self.altitude_loss.is_finite() {
            return None;
        }
        if self.distance == 0.0 {
            return Some(0.0);
        }
        Some(self.altitude_loss.max(0.0) / self.distance)
    }
}
