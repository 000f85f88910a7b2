//! Targeted analysis of DIA runs against a predicted spectral library:
//! candidate-apex scoring and two-pass retention-time calibration.
//!
//! The flow mirrors how the engine is used on a real run:
//!
//! 1. organize the run's scans with [`swathquery::CycleIndex`];
//! 2. [`RtCalibrator::calibrate`] fits the library-iRT -> observed-RT
//!    model from anchor peptides (wide search, apex picking, spectral
//!    similarity, two regression passes);
//! 3. [`build_features`] applies the model to every library peptide and
//!    re-extracts its chromatogram inside the now-narrow RT window.
//!
//! Fragment/iRT/isotope prediction, raw-file parsing, and downstream
//! classification live outside this crate.

pub mod calibration;
pub mod data_sources;
pub mod errors;
pub mod features;
pub mod models;
pub mod scoring;
pub mod utils;
pub mod vectorize;

pub use calibration::{
    CalibrationModel,
    CalibrationParams,
    RtCalibrator,
};
pub use errors::SwathSeekError;
pub use features::{
    build_features,
    correct_rt,
    FeatureParams,
    PeptideFeature,
};
pub use models::{
    LibraryEntry,
    Speclib,
};
pub use scoring::{
    find_apexes,
    ApexParams,
    SpectralMatcher,
};
pub use vectorize::{
    DenseGrid,
    SpectrumVectorizer,
};
