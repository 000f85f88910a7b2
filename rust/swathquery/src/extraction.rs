//! Extracted-ion-chromatogram generation over a scan subsequence.

use crate::models::cycle_index::ScanSeries;
use crate::models::eic::Chromatogram;
use crate::models::tolerance::{
    MzTolerance,
    RtRange,
};

/// Extracts the ion chromatogram of `mz_target` over `series`.
///
/// Every scan whose time lies in `rt_range` contributes one sample: the
/// summed intensity of its peaks inside the closed m/z interval derived
/// from `tolerance`. Scans with no matching peaks still contribute a zero
/// sample, so the chromatogram's time axis is exactly the in-range subset
/// of the series' times.
///
/// Iteration stops at the first scan past `rt_range.hi`; the series is
/// time-ordered, so nothing later can match.
pub fn extract_eic(
    series: ScanSeries<'_>,
    mz_target: f64,
    tolerance: &MzTolerance,
    rt_range: RtRange,
) -> Chromatogram {
    let (mz_lo, mz_hi) = tolerance.mz_range(mz_target);
    let mut chrom = Chromatogram::with_capacity(series.len());
    for scan in series.iter() {
        if scan.rt_seconds > rt_range.hi {
            break;
        }
        if scan.rt_seconds < rt_range.lo {
            continue;
        }
        chrom.push(scan.rt_seconds, scan.peaks.sum_in_range(mz_lo, mz_hi));
    }
    chrom
}
