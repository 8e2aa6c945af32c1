use crate::types::GeoPoint;

/// Caller contract violations
///
/// Degenerate hulls, missing terrain and searches without an intersection are
/// regular results, not errors. These variants only cover input that the
/// algorithms cannot give a meaningful answer for.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Aircraft location is not a valid fix: {location:?}")]
    InvalidOrigin { location: GeoPoint },

    #[error("Altitude must be finite, got {0}")]
    InvalidAltitude(f64),

    #[error("Search range must be finite and non-negative, got {0} m")]
    NegativeRange(f64),

    #[error("Coefficients do not describe a glide polar (a={a}, b={b}, c={c})")]
    InvalidPolar { a: f64, b: f64, c: f64 },

    #[error("Maximum speed must be finite and positive, got {0} m/s")]
    InvalidSpeed(f64),

    #[error("Glide solution is not usable (distance={distance} m, altitude loss={altitude_loss} m)")]
    InvalidSolution { distance: f64, altitude_loss: f64 },

    #[error("Terrain grid needs {expected} heights, got {actual}")]
    InvalidGrid { expected: usize, actual: usize },

    #[error("Terrain grid must have at least one row and one column")]
    EmptyGrid,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn error_messages() {
        assert_snapshot!(
            Error::NegativeRange(-5.0),
            @"Search range must be finite and non-negative, got -5 m"
        );
        assert_snapshot!(
            Error::InvalidGrid { expected: 12, actual: 11 },
            @"Terrain grid needs 12 heights, got 11"
        );
        assert_snapshot!(
            Error::InvalidOrigin { location: GeoPoint::new(f64::NAN, 0.0) },
            @"Aircraft location is not a valid fix: GeoPoint { lon: NaN, lat: 0.0 }"
        );
        assert_snapshot!(
            Error::InvalidSolution { distance: -1.0, altitude_loss: 200.0 },
            @"Glide solution is not usable (distance=-1 m, altitude loss=200 m)"
        );
    }
}
