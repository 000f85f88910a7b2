//! Applies a fitted calibration model back onto the library and packages
//! per-peptide features for the downstream classifier.

use crate::calibration::CalibrationModel;
use crate::models::Speclib;
use rayon::prelude::*;
use serde::Serialize;
use swathquery::{
    extract_eic,
    Chromatogram,
    CycleIndex,
    MzTolerance,
    RtRange,
};
use tracing::info;

/// Writes `corrected_rt = slope * irt + intercept` into every entry.
///
/// Total: every entry gets a value, and an existing one is overwritten.
pub fn correct_rt(library: &mut Speclib, model: &CalibrationModel) {
    for entry in library.entries.iter_mut() {
        entry.corrected_rt = Some(model.predict_rt(entry.irt));
    }
}

/// The per-peptide output of a calibrated run: where the peptide is now
/// expected to elute and its chromatogram around that point.
#[derive(Debug, Clone, Serialize)]
pub struct PeptideFeature {
    pub id: String,
    pub corrected_rt: f32,
    pub eic: Chromatogram,
}

#[derive(Debug, Clone)]
pub struct FeatureParams {
    /// Half-width of the RT window searched around the corrected RT, in
    /// seconds.
    pub rt_tolerance: f32,
    pub mz_tolerance: MzTolerance,
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self {
            rt_tolerance: 5.0,
            mz_tolerance: MzTolerance::default(),
        }
    }
}

/// Corrects the library's RTs and re-extracts every peptide's EIC inside
/// the calibrated window.
///
/// This is the payoff of calibration: the pre-calibration search had to
/// cover the whole run, while this one is confined to
/// `corrected_rt ± rt_tolerance`. A peptide whose window contains no
/// scans simply yields an empty chromatogram.
pub fn build_features(
    index: &CycleIndex,
    library: &mut Speclib,
    model: &CalibrationModel,
    params: &FeatureParams,
) -> Vec<PeptideFeature> {
    correct_rt(library, model);
    info!(
        "Building features for {} peptides within ±{}s of corrected RT",
        library.len(),
        params.rt_tolerance
    );
    library
        .entries
        .par_iter()
        .map(|entry| {
            let corrected_rt = entry
                .corrected_rt
                .expect("corrected_rt set for every entry by correct_rt");
            let eic = extract_eic(
                index.ms1_scans(),
                entry.precursor_mz,
                &params.mz_tolerance,
                RtRange::around(corrected_rt, params.rt_tolerance),
            );
            PeptideFeature {
                id: entry.id.clone(),
                corrected_rt,
                eic,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LibraryEntry;

    fn library() -> Speclib {
        let entries = (0..3)
            .map(|i| LibraryEntry {
                id: format!("PEP{}_2+", i),
                irt: 10.0 * i as f32,
                precursor_mz: 500.0 + 50.0 * i as f64,
                fragment_mzs: vec![300.0],
                fragment_intensities: vec![1.0],
                isotope_mzs: vec![500.0 + 50.0 * i as f64],
                isotope_abundances: vec![1.0],
                corrected_rt: None,
            })
            .collect();
        Speclib { entries }
    }

    #[test]
    fn test_correct_rt_writes_every_entry() {
        let mut lib = library();
        let model = CalibrationModel {
            slope: 2.0,
            intercept: 10.0,
            r_squared: 1.0,
        };
        correct_rt(&mut lib, &model);
        let expected = [10.0, 30.0, 50.0];
        for (entry, want) in lib.entries.iter().zip(expected) {
            assert_eq!(entry.corrected_rt, Some(want));
        }

        // A second model overwrites, never clears.
        let other = CalibrationModel {
            slope: 1.0,
            intercept: 0.0,
            r_squared: 1.0,
        };
        correct_rt(&mut lib, &other);
        assert_eq!(lib.entries[1].corrected_rt, Some(10.0));
    }
}
