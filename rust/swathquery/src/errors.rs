use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum SwathQueryError {
    /// A required scan subsequence has no scans.
    EmptyIndex { context: &'static str },
    /// A precursor m/z falls outside every configured SWATH window.
    NoMatchingWindow { mz: f64 },
    /// An MS2 window index outside 1..=W was requested.
    WindowIndexOutOfRange { window: usize, num_windows: usize },
    /// A centroid list was not sorted by m/z.
    UnsortedPeaks { context: &'static str },
    /// The m/z and intensity arrays of a centroid list differ in length.
    MismatchedPeakArrays { mzs: usize, intensities: usize },
    /// The SWATH window table is empty, so no cycle stride can be derived.
    EmptyWindowTable,
}

impl Display for SwathQueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyIndex { context } => {
                write!(f, "Empty scan subsequence: {}", context)
            }
            Self::NoMatchingWindow { mz } => {
                write!(f, "No SWATH window contains m/z {}", mz)
            }
            Self::WindowIndexOutOfRange {
                window,
                num_windows,
            } => {
                write!(
                    f,
                    "MS2 window index {} out of range 1..={}",
                    window, num_windows
                )
            }
            Self::UnsortedPeaks { context } => {
                write!(f, "Centroid list is not m/z-sorted: {}", context)
            }
            Self::MismatchedPeakArrays { mzs, intensities } => {
                write!(
                    f,
                    "Centroid arrays differ in length: {} mzs vs {} intensities",
                    mzs, intensities
                )
            }
            Self::EmptyWindowTable => {
                write!(f, "SWATH window table is empty")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SwathQueryError>;
