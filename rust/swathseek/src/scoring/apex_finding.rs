//! Candidate-apex picking on extracted ion chromatograms.
//!
//! An apex is a local intensity maximum that is both tall enough (above a
//! percentile of the chromatogram) and wide enough (supported by at least
//! `min_width` samples at half height). Each surviving apex is a candidate
//! elution time for the peptide whose chromatogram it came from.

use crate::utils::math::percentile;
use serde::{
    Deserialize,
    Serialize,
};
use swathquery::Chromatogram;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ApexParams {
    /// Minimum supporting width at half height, in samples.
    pub min_width: usize,
    /// Percentile of the chromatogram's intensities used as the height
    /// threshold.
    pub height_percentile: f64,
}

impl Default for ApexParams {
    fn default() -> Self {
        Self {
            min_width: 2,
            height_percentile: 90.0,
        }
    }
}

/// Finds candidate apex sample indices, in time order.
///
/// Returns nothing for an empty chromatogram or one shorter than
/// `min_width`. Plateau maxima resolve to the plateau midpoint. The first
/// and last samples are never apexes; a maximum must fall off on both
/// sides.
pub fn find_apexes(chrom: &Chromatogram, params: &ApexParams) -> Vec<usize> {
    let ints = &chrom.intensities;
    let n = ints.len();
    if n == 0 || n < params.min_width {
        return Vec::new();
    }
    let threshold = percentile(ints, params.height_percentile);

    let mut apexes = Vec::new();
    let mut i = 1;
    while i < n - 1 {
        if ints[i] <= ints[i - 1] {
            i += 1;
            continue;
        }
        // Rising edge; walk any plateau at this height.
        let mut j = i;
        while j + 1 < n && ints[j + 1] == ints[i] {
            j += 1;
        }
        if j + 1 < n && ints[j + 1] < ints[i] {
            let apex = i + (j - i) / 2;
            if ints[apex] >= threshold && half_height_width(ints, apex) >= params.min_width {
                apexes.push(apex);
            }
        }
        i = j + 1;
    }
    apexes
}

/// Number of contiguous samples around `apex` at or above half the apex
/// intensity.
fn half_height_width(ints: &[f32], apex: usize) -> usize {
    let half = ints[apex] * 0.5;
    let mut lo = apex;
    while lo > 0 && ints[lo - 1] >= half {
        lo -= 1;
    }
    let mut hi = apex;
    while hi + 1 < ints.len() && ints[hi + 1] >= half {
        hi += 1;
    }
    hi - lo + 1
}
