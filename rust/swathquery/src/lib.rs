//! Scan organization and chromatogram extraction for targeted DIA analysis.
//!
//! A DIA run is a flat, time-ordered sequence of scans cycling through one
//! MS1 scan plus one MS2 scan per SWATH window. This crate reconstructs
//! that cycle structure ([`CycleIndex`]), exposes the MS1 / per-window MS2
//! subsequences with time-nearest lookup, and extracts ion chromatograms
//! over them ([`extract_eic`]).
//!
//! Raw-file parsing is out of scope: the upstream loader hands over scans
//! with centroided, m/z-sorted peak lists.

// Declare modules
pub mod errors;
pub mod extraction;
pub mod models;

// Re-export main structures
pub use crate::extraction::extract_eic;
pub use crate::models::{
    CentroidPeaks,
    Chromatogram,
    CycleIndex,
    MsLevel,
    MzTolerance,
    RtRange,
    Scan,
    ScanSeries,
    SwathWindow,
};

// Re-export errors
pub use crate::errors::SwathQueryError;
