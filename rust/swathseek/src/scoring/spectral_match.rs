//! Spectral similarity scoring of candidate elution times.
//!
//! For a candidate time, the nearest real MS1 and in-window MS2 scans are
//! compared against the library's predicted isotope pattern and fragment
//! spectrum on a shared dense mass grid. Observed bins where the library
//! predicts nothing are masked out first, restricting the comparison to
//! expected peaks and suppressing matches driven by co-eluting noise.

use crate::errors::{
    Result,
    SwathSeekError,
};
use crate::models::LibraryEntry;
use crate::vectorize::{
    DenseGrid,
    SpectrumVectorizer,
};
use swathquery::CycleIndex;

/// Scores candidate apexes for library peptides against one run.
///
/// Holds only shared read-only state, so a single matcher can serve
/// concurrent per-peptide pipelines.
#[derive(Debug)]
pub struct SpectralMatcher<'a, V = DenseGrid> {
    index: &'a CycleIndex,
    vectorizer: V,
}

impl<'a, V: SpectrumVectorizer> SpectralMatcher<'a, V> {
    pub fn new(index: &'a CycleIndex, vectorizer: V) -> Self {
        Self { index, vectorizer }
    }

    pub fn index(&self) -> &'a CycleIndex {
        self.index
    }

    /// Combined isotope + fragment similarity of `entry` at
    /// `candidate_rt`, in [0, 1].
    ///
    /// Fails with `NoMatchingWindow` when the precursor mass is outside
    /// the acquisition scheme, `EmptyIndex` when the run has no scans to
    /// compare against, and `ZeroObservedSignal` when an observed
    /// spectrum carries nothing in the expected bins. Callers treat all
    /// three as a zero score for that candidate; none of them aborts a
    /// run.
    pub fn score_candidate(&self, entry: &LibraryEntry, candidate_rt: f32) -> Result<f32> {
        let window = self.index.window_for_mz(entry.precursor_mz)?;
        let ms1 = self.index.ms1_scans().nearest(candidate_rt)?;
        let ms2 = self
            .index
            .ms2_scans_for_window(window)?
            .nearest(candidate_rt)?;

        let predicted_isotopes = self
            .vectorizer
            .vectorize(&entry.isotope_mzs, &entry.isotope_abundances);
        let predicted_fragments = self
            .vectorizer
            .vectorize(&entry.fragment_mzs, &entry.fragment_intensities);
        let observed_ms1 = self.vectorizer.vectorize(&ms1.peaks.mzs, &ms1.peaks.intensities);
        let observed_ms2 = self.vectorizer.vectorize(&ms2.peaks.mzs, &ms2.peaks.intensities);

        let isotope_sim = masked_cosine(&predicted_isotopes, observed_ms1, "precursor spectrum")?;
        let fragment_sim = masked_cosine(&predicted_fragments, observed_ms2, "fragment spectrum")?;

        Ok(((isotope_sim + fragment_sim) / 2.0).clamp(0.0, 1.0))
    }
}

/// Masks `observed` to the predicted bins, max-normalizes it, and returns
/// the cosine similarity against `predicted`.
fn masked_cosine(predicted: &[f32], mut observed: Vec<f32>, context: &'static str) -> Result<f32> {
    for (obs, pred) in observed.iter_mut().zip(predicted.iter()) {
        if *pred == 0.0 {
            *obs = 0.0;
        }
    }
    let max = observed.iter().fold(0.0f32, |acc, &x| acc.max(x));
    if max <= 0.0 {
        return Err(SwathSeekError::ZeroObservedSignal { context });
    }
    for obs in observed.iter_mut() {
        *obs /= max;
    }
    Ok(crate::utils::math::cosine_similarity(predicted, &observed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use swathquery::{
        CentroidPeaks,
        Scan,
        SwathWindow,
    };

    fn entry() -> LibraryEntry {
        LibraryEntry {
            id: "TESTPEP_2+".to_string(),
            irt: 10.0,
            precursor_mz: 450.0,
            fragment_mzs: vec![300.0, 600.0, 900.0],
            fragment_intensities: vec![1.0, 0.6, 0.3],
            isotope_mzs: vec![450.0, 450.5, 451.0],
            isotope_abundances: vec![1.0, 0.5, 0.2],
            corrected_rt: None,
        }
    }

    /// One-window run with a single cycle whose spectra match `entry`
    /// exactly.
    fn matching_index() -> CycleIndex {
        let scans = vec![
            Scan::ms1(
                1.0,
                CentroidPeaks::new(vec![450.0, 450.5, 451.0], vec![100.0, 50.0, 20.0]).unwrap(),
            ),
            Scan::ms2(
                1.1,
                1,
                CentroidPeaks::new(vec![300.0, 600.0, 900.0], vec![80.0, 48.0, 24.0]).unwrap(),
            ),
        ];
        let windows = vec![SwathWindow {
            start_mz: 425.0,
            end_mz: 475.0,
            center_mz: 450.0,
        }];
        CycleIndex::new(scans, windows).unwrap()
    }

    #[test]
    fn test_perfect_match_scores_near_one() {
        let index = matching_index();
        let matcher = SpectralMatcher::new(&index, DenseGrid::default());
        let score = matcher.score_candidate(&entry(), 1.0).unwrap();
        assert!(score > 0.99 && score <= 1.0);
    }

    #[test]
    fn test_noise_outside_predicted_bins_is_masked() {
        // Same spectra plus heavy noise peaks away from every predicted
        // mass; masking must keep the score unchanged.
        let scans = vec![
            Scan::ms1(
                1.0,
                CentroidPeaks::new(
                    vec![440.0, 450.0, 450.5, 451.0, 460.0],
                    vec![500.0, 100.0, 50.0, 20.0, 900.0],
                )
                .unwrap(),
            ),
            Scan::ms2(
                1.1,
                1,
                CentroidPeaks::new(
                    vec![300.0, 500.0, 600.0, 900.0, 1200.0],
                    vec![80.0, 700.0, 48.0, 24.0, 600.0],
                )
                .unwrap(),
            ),
        ];
        let windows = vec![SwathWindow {
            start_mz: 425.0,
            end_mz: 475.0,
            center_mz: 450.0,
        }];
        let index = CycleIndex::new(scans, windows).unwrap();
        let matcher = SpectralMatcher::new(&index, DenseGrid::default());
        let score = matcher.score_candidate(&entry(), 1.0).unwrap();
        assert!(score > 0.99 && score <= 1.0);
    }

    #[test]
    fn test_zero_observed_signal_is_an_error() {
        let scans = vec![
            Scan::ms1(
                1.0,
                // Observed MS1 has signal nowhere near the isotope
                // pattern.
                CentroidPeaks::new(vec![600.0], vec![100.0]).unwrap(),
            ),
            Scan::ms2(
                1.1,
                1,
                CentroidPeaks::new(vec![300.0, 600.0, 900.0], vec![80.0, 48.0, 24.0]).unwrap(),
            ),
        ];
        let windows = vec![SwathWindow {
            start_mz: 425.0,
            end_mz: 475.0,
            center_mz: 450.0,
        }];
        let index = CycleIndex::new(scans, windows).unwrap();
        let matcher = SpectralMatcher::new(&index, DenseGrid::default());
        assert!(matches!(
            matcher.score_candidate(&entry(), 1.0),
            Err(SwathSeekError::ZeroObservedSignal { .. })
        ));
    }

    #[test]
    fn test_precursor_outside_all_windows() {
        let index = matching_index();
        let matcher = SpectralMatcher::new(&index, DenseGrid::default());
        let mut e = entry();
        e.precursor_mz = 1234.0;
        assert!(matches!(
            matcher.score_candidate(&e, 1.0),
            Err(SwathSeekError::Query(_))
        ));
    }

    #[test]
    fn test_mismatched_shape_scores_below_one() {
        // Fragment intensities permuted relative to the prediction: the
        // fragment cosine drops while the isotope cosine stays at 1.
        let scans = vec![
            Scan::ms1(
                1.0,
                CentroidPeaks::new(vec![450.0, 450.5, 451.0], vec![100.0, 50.0, 20.0]).unwrap(),
            ),
            Scan::ms2(
                1.1,
                1,
                CentroidPeaks::new(vec![300.0, 600.0, 900.0], vec![24.0, 80.0, 48.0]).unwrap(),
            ),
        ];
        let windows = vec![SwathWindow {
            start_mz: 425.0,
            end_mz: 475.0,
            center_mz: 450.0,
        }];
        let index = CycleIndex::new(scans, windows).unwrap();
        let matcher = SpectralMatcher::new(&index, DenseGrid::default());
        let score = matcher.score_candidate(&entry(), 1.0).unwrap();
        assert!(score > 0.0 && score < 0.95);
    }
}
