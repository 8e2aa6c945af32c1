use crate::error::{Error, Result};
use crate::types::SpeedVector;

/// Default maximum manoeuvring speed (m/s)
pub const DEFAULT_V_MAX: f64 = 70.0;

/// Ratio between the width of the final speed interval and `v_max`
const SPEED_TOLERANCE: f64 = 1e-6;

/// 1 / golden ratio
const INV_PHI: f64 = 0.618_033_988_749_894_8;

/// Quadratic sink polar `sink(v) = a·v² + b·v + c`
///
/// Speeds are true airspeeds in m/s, sink rates are positive downwards in m/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlidePolar {
    a: f64,
    b: f64,
    c: f64,
    mac_cready: f64,
    v_max: f64,
}

impl GlidePolar {
    /// Create a polar from its coefficients
    ///
    /// The parabola must open upwards with its minimum (the minimum sink)
    /// at a positive speed and a positive sink rate.
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self> {
        let valid = a.is_finite()
            && b.is_finite()
            && c.is_finite()
            && a > 0.0
            && b < 0.0
            && c - b * b / (4.0 * a) > 0.0;
        if !valid {
            return Err(Error::InvalidPolar { a, b, c });
        }

        Ok(Self {
            a,
            b,
            c,
            mac_cready: 0.0,
            v_max: DEFAULT_V_MAX,
        })
    }

    /// Fit a polar through three measured `(speed, sink)` pairs
    pub fn from_three_points(points: [(f64, f64); 3]) -> Result<Self> {
        let [(v1, s1), (v2, s2), (v3, s3)] = points;

        let d = v1 * v1 * (v2 - v3) + v2 * v2 * (v3 - v1) + v3 * v3 * (v1 - v2);
        let a = (s1 * (v2 - v3) + s2 * (v3 - v1) + s3 * (v1 - v2)) / d;
        let b = -(s1 * (v2 * v2 - v3 * v3) + s2 * (v3 * v3 - v1 * v1) + s3 * (v1 * v1 - v2 * v2))
            / d;
        let c = s1 - a * v1 * v1 - b * v1;

        Self::new(a, b, c)
    }

    pub fn coefficients(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    pub fn mac_cready(&self) -> f64 {
        self.mac_cready
    }

    /// Expected climb rate in the next thermal (m/s), clamped to `>= 0`
    pub fn with_mac_cready(mut self, mac_cready: f64) -> Self {
        self.mac_cready = mac_cready.max(0.0);
        self
    }

    /// Degrade the polar by bugs or rain
    ///
    /// `clean_ratio` is `1` for a clean wing and shrinks as performance
    /// drops. Every coefficient is divided by it.
    pub fn with_bugs(self, clean_ratio: f64) -> Result<Self> {
        self.rescaled(
            self.a / clean_ratio,
            self.b / clean_ratio,
            self.c / clean_ratio,
        )
    }

    /// Adjust the polar for ballast
    ///
    /// `ratio` is the all-up mass divided by the mass the polar was measured
    /// at. The curve shifts along the line through the origin by `√ratio`.
    pub fn with_mass_ratio(self, ratio: f64) -> Result<Self> {
        let root = ratio.sqrt();
        self.rescaled(self.a / root, self.b, self.c * root)
    }

    /// Highest speed the speed to fly search may pick (m/s)
    pub fn with_v_max(mut self, v_max: f64) -> Result<Self> {
        if !v_max.is_finite() || v_max <= 0.0 {
            return Err(Error::InvalidSpeed(v_max));
        }
        self.v_max = v_max;
        Ok(self)
    }

    fn rescaled(&self, a: f64, b: f64, c: f64) -> Result<Self> {
        Ok(Self {
            mac_cready: self.mac_cready,
            v_max: self.v_max,
            ..Self::new(a, b, c)?
        })
    }

    pub fn sink_rate(&self, v: f64) -> f64 {
        (self.a * v + self.b) * v + self.c
    }

    /// Speed of minimum sink
    pub fn v_min(&self) -> f64 {
        -self.b / (2.0 * self.a)
    }

    /// Minimum sink rate
    pub fn s_min(&self) -> f64 {
        self.sink_rate(self.v_min())
    }

    /// Upper end of the speed range, never below [`v_min`](Self::v_min)
    pub fn v_max(&self) -> f64 {
        self.v_max.max(self.v_min())
    }

    /// Speed to fly in still air for the current MacCready setting
    pub fn v_best_ld(&self) -> f64 {
        ((self.c + self.mac_cready) / self.a)
            .sqrt()
            .clamp(self.v_min(), self.v_max())
    }

    pub fn s_best_ld(&self) -> f64 {
        self.sink_rate(self.v_best_ld())
    }

    /// Glide ratio at [`v_best_ld`](Self::v_best_ld)
    pub fn best_ld(&self) -> f64 {
        self.v_best_ld() / self.s_best_ld()
    }

    /// Height lost per meter flown over ground along `track` in `wind`
    ///
    /// Searches the speed between [`v_min`](Self::v_min) and
    /// [`v_max`](Self::v_max) that minimises `(sink + mc) / ground speed`
    /// and returns `sink / ground speed` at that speed. Returns `None` when no
    /// speed makes progress along the track.
    pub fn altitude_per_distance(&self, track: f64, wind: SpeedVector) -> Option<f64> {
        let (tailwind, crosswind) = wind.components(track);
        let ground_speed = |v: f64| {
            let along = v * v - crosswind * crosswind;
            if along < 0.0 {
                return None;
            }
            Some(tailwind + along.sqrt()).filter(|&gs| gs > 0.0)
        };
        let cost = |v: f64| {
            ground_speed(v).map_or(f64::INFINITY, |gs| (self.sink_rate(v) + self.mac_cready) / gs)
        };

        let mut lo = self.v_min();
        let mut hi = self.v_max();
        let tolerance = SPEED_TOLERANCE * hi;

        let mut x1 = hi - INV_PHI * (hi - lo);
        let mut x2 = lo + INV_PHI * (hi - lo);
        let mut f1 = cost(x1);
        let mut f2 = cost(x2);
        while hi - lo > tolerance {
            if f1 < f2 {
                hi = x2;
                x2 = x1;
                f2 = f1;
                x1 = hi - INV_PHI * (hi - lo);
                f1 = cost(x1);
            } else {
                lo = x1;
                x1 = x2;
                f1 = f2;
                x2 = lo + INV_PHI * (hi - lo);
                f2 = cost(x2);
            }
        }

        let v = (lo + hi) / 2.0;
        let gs = ground_speed(v)?;
        Some(self.sink_rate(v) / gs)
    }
}
