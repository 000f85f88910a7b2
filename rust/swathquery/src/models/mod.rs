pub mod cycle_index;
pub mod eic;
pub mod scan;
pub mod tolerance;

pub use cycle_index::{
    CycleIndex,
    ScanSeries,
};
pub use eic::Chromatogram;
pub use scan::{
    CentroidPeaks,
    MsLevel,
    Scan,
    SwathWindow,
    MS1_WINDOW_INDEX,
};
pub use tolerance::{
    MzTolerance,
    RtRange,
};
