use crate::errors::{
    Result,
    SwathQueryError,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Sentinel window index carried by MS1 scans.
pub const MS1_WINDOW_INDEX: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MsLevel {
    Ms1,
    Ms2,
}

/// A centroided peak list stored mz-major, sorted ascending by m/z.
///
/// Keeping the two arrays separate (instead of a vec of pairs) lets the
/// extraction hot loop binary-search the m/z slice directly and sum a
/// contiguous intensity slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CentroidPeaks {
    pub mzs: Vec<f64>,
    pub intensities: Vec<f32>,
}

impl CentroidPeaks {
    /// Builds a peak list, validating length agreement and m/z ordering.
    ///
    /// The upstream loader guarantees sorted centroids; this guards against
    /// hand-built inputs.
    pub fn new(mzs: Vec<f64>, intensities: Vec<f32>) -> Result<Self> {
        if mzs.len() != intensities.len() {
            return Err(SwathQueryError::MismatchedPeakArrays {
                mzs: mzs.len(),
                intensities: intensities.len(),
            });
        }
        if mzs.windows(2).any(|w| w[0] > w[1]) {
            return Err(SwathQueryError::UnsortedPeaks {
                context: "centroid list construction",
            });
        }
        Ok(Self { mzs, intensities })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.mzs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mzs.is_empty()
    }

    /// Sums the intensity of every peak whose m/z lies in the closed
    /// interval `[lo, hi]`.
    ///
    /// Bounds are located with `partition_point` on the sorted m/z slice,
    /// so the cost is O(log n + k) for k peaks in range.
    pub fn sum_in_range(&self, lo: f64, hi: f64) -> f32 {
        let start = self.mzs.partition_point(|&mz| mz < lo);
        let end = self.mzs.partition_point(|&mz| mz <= hi);
        self.intensities[start..end].iter().sum()
    }
}

/// A single spectrum of the raw run.
///
/// Immutable once parsed; the cycle index owns the scans and every
/// downstream component works on references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scan {
    pub rt_seconds: f32,
    pub ms_level: MsLevel,
    /// 0 for MS1, 1..=W for MS2 scans of window w.
    pub window_index: usize,
    pub peaks: CentroidPeaks,
}

impl Scan {
    pub fn ms1(rt_seconds: f32, peaks: CentroidPeaks) -> Self {
        Self {
            rt_seconds,
            ms_level: MsLevel::Ms1,
            window_index: MS1_WINDOW_INDEX,
            peaks,
        }
    }

    pub fn ms2(rt_seconds: f32, window_index: usize, peaks: CentroidPeaks) -> Self {
        Self {
            rt_seconds,
            ms_level: MsLevel::Ms2,
            window_index,
            peaks,
        }
    }
}

/// One precursor isolation window of the DIA scheme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwathWindow {
    pub start_mz: f64,
    pub end_mz: f64,
    pub center_mz: f64,
}

impl SwathWindow {
    /// Strict containment, matching how the acquisition scheme assigns
    /// precursors to windows (boundary masses belong to neither side).
    pub fn contains(&self, mz: f64) -> bool {
        self.start_mz < mz && mz < self.end_mz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid_peaks_validation() {
        assert!(CentroidPeaks::new(vec![100.0, 200.0], vec![1.0, 2.0]).is_ok());
        assert!(matches!(
            CentroidPeaks::new(vec![100.0], vec![1.0, 2.0]),
            Err(SwathQueryError::MismatchedPeakArrays { .. })
        ));
        assert!(matches!(
            CentroidPeaks::new(vec![200.0, 100.0], vec![1.0, 2.0]),
            Err(SwathQueryError::UnsortedPeaks { .. })
        ));
    }

    #[test]
    fn test_sum_in_range_closed_interval() {
        let peaks =
            CentroidPeaks::new(vec![99.95, 100.0, 100.05, 100.2], vec![1.0, 2.0, 4.0, 8.0])
                .unwrap();
        // Both boundary masses are included.
        assert_eq!(peaks.sum_in_range(99.95, 100.05), 7.0);
        // Boundary exactly at tolerance edge stays in.
        assert_eq!(peaks.sum_in_range(100.05, 100.05), 4.0);
        // Empty range between peaks.
        assert_eq!(peaks.sum_in_range(100.06, 100.19), 0.0);
        // Range past the end.
        assert_eq!(peaks.sum_in_range(300.0, 400.0), 0.0);
    }

    #[test]
    fn test_window_containment_is_strict() {
        let w = SwathWindow {
            start_mz: 400.0,
            end_mz: 425.0,
            center_mz: 412.5,
        };
        assert!(w.contains(412.5));
        assert!(!w.contains(400.0));
        assert!(!w.contains(425.0));
    }
}
