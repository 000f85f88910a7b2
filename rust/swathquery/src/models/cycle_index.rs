//! Cycle-structured view over the flat scan sequence of a DIA run.
//!
//! A run cycles through one MS1 scan followed by one MS2 scan per SWATH
//! window, so scan `i` belongs to cycle `i / (W + 1)` and its position
//! within the cycle is `i % (W + 1)`. Cycle boundaries are derived from
//! this fixed stride and never from timestamps; acquisition timing jitter
//! makes time-gap heuristics unreliable.

use crate::errors::{
    Result,
    SwathQueryError,
};
use crate::models::scan::{
    MsLevel,
    Scan,
    SwathWindow,
};
use tracing::warn;

/// Organizes the raw scan sequence by precursor-window cycle.
///
/// The index owns the scans; every downstream component (extraction,
/// spectral matching) borrows them. All query methods take `&self`, so one
/// index can back any number of concurrent per-peptide pipelines.
#[derive(Debug, Clone)]
pub struct CycleIndex {
    scans: Vec<Scan>,
    windows: Vec<SwathWindow>,
    ms1_positions: Vec<usize>,
    /// `ms2_positions[w - 1]` holds the scan positions of window `w`.
    ms2_positions: Vec<Vec<usize>>,
}

impl CycleIndex {
    pub fn new(scans: Vec<Scan>, windows: Vec<SwathWindow>) -> Result<Self> {
        if windows.is_empty() {
            return Err(SwathQueryError::EmptyWindowTable);
        }
        let stride = windows.len() + 1;

        let trailing = scans.len() % stride;
        if trailing != 0 {
            warn!(
                "Run length {} is not a multiple of the cycle stride {}; \
                 ignoring {} trailing scans",
                scans.len(),
                stride,
                trailing
            );
        }
        let usable = scans.len() - trailing;

        let ms1_positions: Vec<usize> = (0..usable).step_by(stride).collect();
        let ms2_positions: Vec<Vec<usize>> = (1..stride)
            .map(|w| (w..usable).step_by(stride).collect())
            .collect();

        let mislabeled = ms1_positions
            .iter()
            .filter(|&&p| scans[p].ms_level != MsLevel::Ms1)
            .count();
        if mislabeled > 0 {
            warn!(
                "{} scans at MS1 stride positions are not labeled MS1; \
                 the stride-derived cycle structure takes precedence",
                mislabeled
            );
        }

        Ok(Self {
            scans,
            windows,
            ms1_positions,
            ms2_positions,
        })
    }

    pub fn num_windows(&self) -> usize {
        self.windows.len()
    }

    pub fn num_cycles(&self) -> usize {
        self.ms1_positions.len()
    }

    pub fn windows(&self) -> &[SwathWindow] {
        &self.windows
    }

    /// The MS1 subsequence, in run order. Restartable: each call returns a
    /// fresh view over the same positions.
    pub fn ms1_scans(&self) -> ScanSeries<'_> {
        ScanSeries {
            scans: &self.scans,
            positions: &self.ms1_positions,
        }
    }

    /// The MS2 subsequence of window `w` (1-based), in run order.
    pub fn ms2_scans_for_window(&self, window: usize) -> Result<ScanSeries<'_>> {
        if window == 0 || window > self.windows.len() {
            return Err(SwathQueryError::WindowIndexOutOfRange {
                window,
                num_windows: self.windows.len(),
            });
        }
        Ok(ScanSeries {
            scans: &self.scans,
            positions: &self.ms2_positions[window - 1],
        })
    }

    /// Resolves the 1-based window index whose mass range contains `mz`.
    ///
    /// Windows are non-overlapping, so the first strict containment is the
    /// only one.
    pub fn window_for_mz(&self, mz: f64) -> Result<usize> {
        self.windows
            .iter()
            .position(|w| w.contains(mz))
            .map(|i| i + 1)
            .ok_or(SwathQueryError::NoMatchingWindow { mz })
    }
}

/// A lazy, restartable view over one stride-derived scan subsequence.
///
/// Times along a series are ascending because scan order is run order.
#[derive(Debug, Clone, Copy)]
pub struct ScanSeries<'a> {
    scans: &'a [Scan],
    positions: &'a [usize],
}

impl<'a> ScanSeries<'a> {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Scan> + 'a {
        let scans = self.scans;
        self.positions.iter().map(move |&p| &scans[p])
    }

    pub fn get(&self, i: usize) -> &'a Scan {
        &self.scans[self.positions[i]]
    }

    /// The scan whose time is closest to `rt_seconds`.
    ///
    /// Equidistant neighbors resolve to the earlier scan. Located with a
    /// `partition_point` over the ascending times, then comparing the two
    /// bracketing scans.
    pub fn nearest(&self, rt_seconds: f32) -> Result<&'a Scan> {
        if self.positions.is_empty() {
            return Err(SwathQueryError::EmptyIndex {
                context: "nearest-scan lookup on empty series",
            });
        }
        let i = self
            .positions
            .partition_point(|&p| self.scans[p].rt_seconds < rt_seconds);
        if i == 0 {
            return Ok(self.get(0));
        }
        if i == self.positions.len() {
            return Ok(self.get(self.positions.len() - 1));
        }
        let before = self.get(i - 1);
        let after = self.get(i);
        if rt_seconds - before.rt_seconds <= after.rt_seconds - rt_seconds {
            Ok(before)
        } else {
            Ok(after)
        }
    }
}
