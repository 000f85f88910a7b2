use std::path::PathBuf;
use swathquery::SwathQueryError;

#[derive(Debug)]
pub enum LibraryReadingError {
    FileReadingError {
        source: std::io::Error,
        path: PathBuf,
    },
    SpeclibParsingError {
        source: serde_json::Error,
        context: &'static str,
    },
    WindowTableParsingError {
        source: csv::Error,
        context: &'static str,
    },
}

#[derive(Debug)]
pub enum SwathSeekError {
    /// An error bubbled up from the scan index / extraction layer.
    Query(SwathQueryError),
    /// An observed spectrum vectorized to all zeros after masking; the
    /// candidate carries no comparable signal and scores 0.
    ZeroObservedSignal { context: &'static str },
    /// Fewer usable anchor peptides than a regression pass needs.
    InsufficientAnchors { passing: usize, required: usize },
    /// The regression design is degenerate (e.g. all anchors share one
    /// retention index), so no line can be determined.
    DegenerateFit { context: String },
    /// A library entry's index-aligned vectors disagree in length.
    MismatchedLibraryVectors {
        id: String,
        context: &'static str,
    },
    LibraryReadingError(LibraryReadingError),
}

impl std::fmt::Display for SwathSeekError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub type Result<T> = std::result::Result<T, SwathSeekError>;

impl From<SwathQueryError> for SwathSeekError {
    fn from(x: SwathQueryError) -> Self {
        Self::Query(x)
    }
}

impl From<LibraryReadingError> for SwathSeekError {
    fn from(x: LibraryReadingError) -> Self {
        Self::LibraryReadingError(x)
    }
}

impl From<serde_json::Error> for SwathSeekError {
    fn from(x: serde_json::Error) -> Self {
        Self::LibraryReadingError(LibraryReadingError::SpeclibParsingError {
            source: x,
            context: "",
        })
    }
}

impl From<csv::Error> for SwathSeekError {
    fn from(x: csv::Error) -> Self {
        Self::LibraryReadingError(LibraryReadingError::WindowTableParsingError {
            source: x,
            context: "",
        })
    }
}
