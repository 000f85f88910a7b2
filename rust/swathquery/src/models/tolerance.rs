use serde::{
    Deserialize,
    Serialize,
};

/// m/z tolerance for chromatogram extraction.
///
/// Convention: tolerances are defined in terms of positive values, so an
/// absolute tolerance of (0.05, 0.05) on m/z 500 means the range
/// (499.95, 500.05).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum MzTolerance {
    #[serde(rename = "da")]
    Absolute((f64, f64)),
    #[serde(rename = "ppm")]
    Ppm((f64, f64)),
}

impl Default for MzTolerance {
    fn default() -> Self {
        MzTolerance::Absolute((0.05, 0.05))
    }
}

impl MzTolerance {
    /// The closed m/z interval `[mz - low, mz + high]` for a target mass.
    pub fn mz_range(&self, mz: f64) -> (f64, f64) {
        match self {
            MzTolerance::Absolute((low, high)) => (mz - low, mz + high),
            MzTolerance::Ppm((low, high)) => {
                let low = mz * low / 1e6;
                let high = mz * high / 1e6;
                (mz - low, mz + high)
            }
        }
    }
}

/// A retention-time query range in seconds, optionally unbounded above.
///
/// Before a calibration model exists, peptide queries use the unbounded
/// range (full run). Once `corrected_rt` is known, queries narrow to a
/// window around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RtRange {
    pub lo: f32,
    pub hi: f32,
}

impl RtRange {
    pub fn new(lo: f32, hi: f32) -> Self {
        Self { lo, hi }
    }

    /// The full-run range `[0, +inf)`.
    pub fn unbounded() -> Self {
        Self {
            lo: 0.0,
            hi: f32::INFINITY,
        }
    }

    /// A symmetric window around `center`, clamped below at zero.
    pub fn around(center: f32, half_width: f32) -> Self {
        Self {
            lo: (center - half_width).max(0.0),
            hi: center + half_width,
        }
    }

    pub fn is_unbounded_above(&self) -> bool {
        self.hi.is_infinite()
    }

    pub fn contains(&self, rt_seconds: f32) -> bool {
        rt_seconds >= self.lo && rt_seconds <= self.hi
    }
}

impl Default for RtRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_mz_range() {
        let tol = MzTolerance::default();
        let (lo, hi) = tol.mz_range(500.0);
        assert!((lo - 499.95).abs() < 1e-9);
        assert!((hi - 500.05).abs() < 1e-9);
    }

    #[test]
    fn test_ppm_mz_range() {
        let tol = MzTolerance::Ppm((20.0, 20.0));
        let (lo, hi) = tol.mz_range(500.0);
        assert!((lo - 499.99).abs() < 1e-6);
        assert!((hi - 500.01).abs() < 1e-6);
    }

    #[test]
    fn test_rt_range_around_clamps_at_zero() {
        let range = RtRange::around(2.0, 5.0);
        assert_eq!(range.lo, 0.0);
        assert_eq!(range.hi, 7.0);
        assert!(RtRange::unbounded().contains(1e9));
        assert!(!range.contains(7.5));
    }
}
