//! Two-pass retention-time calibration against iRT anchor peptides.
//!
//! Pass 1 bootstraps a rough library-to-run trend from only the most
//! unambiguous spectral matches. Pass 2 replays every anchor's surviving
//! candidates with a time-plausibility bonus derived from that draft
//! trend, which flips selections where the best spectral match was a
//! coincidental hit at an implausible elution time (co-eluting isobaric
//! interference), then refits. Only the final model leaves this module;
//! the draft is an intermediate training label and is dropped after use.
//!
//! Anchor evaluations are independent given the read-only scan index, so
//! each pass fans out over a thread pool; the pass boundary itself is a
//! hard fork-join barrier because the draft must exist before any pass-2
//! re-selection starts.

use crate::errors::{
    Result,
    SwathSeekError,
};
use crate::models::{
    LibraryEntry,
    Speclib,
};
use crate::scoring::apex_finding::{
    find_apexes,
    ApexParams,
};
use crate::scoring::spectral_match::SpectralMatcher;
use crate::vectorize::SpectrumVectorizer;
use crate::utils::math::{
    linear_fit,
    r_squared,
};
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use serde::Serialize;
use swathquery::{
    extract_eic,
    CycleIndex,
    MzTolerance,
    RtRange,
};
use tracing::{
    debug,
    info,
    warn,
};

/// The fitted library-retention-index -> observed-RT mapping.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CalibrationModel {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination of the final fit on its own sample.
    pub r_squared: f64,
}

impl CalibrationModel {
    pub fn predict_rt(&self, irt: f32) -> f32 {
        (self.slope * irt as f64 + self.intercept) as f32
    }
}

/// The pass-1 trend. Immutable snapshot handed into pass 2; never exposed
/// downstream.
#[derive(Debug, Clone, Copy)]
struct DraftModel {
    slope: f64,
    intercept: f64,
}

impl DraftModel {
    fn predict_rt(&self, irt: f32) -> f32 {
        (self.slope * irt as f64 + self.intercept) as f32
    }
}

#[derive(Debug, Clone)]
pub struct CalibrationParams {
    /// Minimum combined spectral score for a pass-1 candidate to survive.
    pub score_threshold: f32,
    pub mz_tolerance: MzTolerance,
    pub apex: ApexParams,
    /// Weight of the pass-2 time-plausibility bonus.
    pub rt_bonus_weight: f32,
    /// Anchors needed to fit a line.
    pub min_anchors: usize,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            score_threshold: 0.85,
            mz_tolerance: MzTolerance::default(),
            apex: ApexParams::default(),
            rt_bonus_weight: 0.5,
            min_anchors: 2,
        }
    }
}

/// One scored candidate apex of one anchor peptide.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    rt_seconds: f32,
    score: f32,
}

/// Everything a regression pass needs to know about one anchor: its
/// retention index and the pass-1 surviving candidates.
#[derive(Debug, Clone)]
struct AnchorCandidates {
    irt: f32,
    candidates: Vec<Candidate>,
}

/// Drives the UNFITTED -> DRAFT -> FINAL calibration pipeline for one run.
pub struct RtCalibrator<'a, V> {
    matcher: SpectralMatcher<'a, V>,
    params: CalibrationParams,
}

impl<'a, V: SpectrumVectorizer + Sync> RtCalibrator<'a, V> {
    pub fn new(index: &'a CycleIndex, vectorizer: V, params: CalibrationParams) -> Self {
        Self {
            matcher: SpectralMatcher::new(index, vectorizer),
            params,
        }
    }

    /// Runs both passes over the anchor library and returns the final
    /// model.
    ///
    /// Fails with `InsufficientAnchors` when fewer than
    /// `params.min_anchors` peptides have any threshold-passing
    /// candidate, and with `DegenerateFit` when the surviving anchors
    /// cannot determine a line.
    pub fn calibrate(&self, anchors: &Speclib) -> Result<CalibrationModel> {
        let candidates = self.collect_candidates(anchors);
        let usable = candidates
            .iter()
            .filter(|a| !a.candidates.is_empty())
            .count();
        info!(
            "Pass 1: {}/{} anchor peptides have candidates above score {}",
            usable,
            candidates.len(),
            self.params.score_threshold
        );

        let draft = self.fit_draft(&candidates)?;
        info!(
            "Draft model: slope {:.4}, intercept {:.4}",
            draft.slope, draft.intercept
        );

        let model = self.fit_final(&candidates, draft)?;
        info!(
            "Final model: slope {:.4}, intercept {:.4}, r2 {:.4}",
            model.slope, model.intercept, model.r_squared
        );
        if model.r_squared < 0.9 {
            warn!(
                "Calibration r2 {:.3} is low; the run may have few usable anchors \
                 or a nonlinear RT trend",
                model.r_squared
            );
        }
        Ok(model)
    }

    /// Pass-1 candidate collection: one EIC over the full run, apex
    /// picking, spectral scoring, threshold filter. Anchors are
    /// independent, so this fans out across the thread pool.
    fn collect_candidates(&self, anchors: &Speclib) -> Vec<AnchorCandidates> {
        anchors
            .entries
            .par_iter()
            .progress_count(anchors.len() as u64)
            .map(|entry| self.candidates_for(entry))
            .collect()
    }

    fn candidates_for(&self, entry: &LibraryEntry) -> AnchorCandidates {
        // No model exists yet, so the search is deliberately wide: the
        // whole run.
        let eic = extract_eic(
            self.matcher.index().ms1_scans(),
            entry.precursor_mz,
            &self.params.mz_tolerance,
            RtRange::unbounded(),
        );
        let apexes = find_apexes(&eic, &self.params.apex);

        let mut candidates = Vec::with_capacity(apexes.len());
        for apex in apexes {
            let rt_seconds = eic.rts[apex];
            match self.matcher.score_candidate(entry, rt_seconds) {
                Ok(score) if score >= self.params.score_threshold => {
                    candidates.push(Candidate { rt_seconds, score });
                }
                Ok(_) => {}
                Err(e) => {
                    // Per-peptide failure: this candidate scores zero and
                    // drops out; the run goes on.
                    debug!("Candidate for {} at {}s degraded: {}", entry.id, rt_seconds, e);
                }
            }
        }
        AnchorCandidates {
            irt: entry.irt,
            candidates,
        }
    }

    /// Pass 1 fit: highest-scoring candidate per anchor, OLS of observed
    /// RT on retention index.
    fn fit_draft(&self, anchors: &[AnchorCandidates]) -> Result<DraftModel> {
        let mut irts = Vec::new();
        let mut rts = Vec::new();
        for anchor in anchors {
            let best = argmax_first(&anchor.candidates, |c| c.score);
            if let Some(best) = best {
                irts.push(anchor.irt as f64);
                rts.push(best.rt_seconds as f64);
            }
        }
        if irts.len() < self.params.min_anchors {
            return Err(SwathSeekError::InsufficientAnchors {
                passing: irts.len(),
                required: self.params.min_anchors,
            });
        }
        let fit = linear_fit(&irts, &rts)?;
        Ok(DraftModel {
            slope: fit.slope,
            intercept: fit.intercept,
        })
    }

    /// Pass 2 fit: re-select each anchor's candidate with the
    /// time-plausibility bonus against the draft trend, then refit and
    /// compute the final goodness of fit.
    fn fit_final(&self, anchors: &[AnchorCandidates], draft: DraftModel) -> Result<CalibrationModel> {
        let mut irts = Vec::new();
        let mut rts = Vec::new();
        for anchor in anchors {
            if anchor.candidates.is_empty() {
                continue;
            }
            let predicted_rt = draft.predict_rt(anchor.irt);
            let best = argmax_first(&anchor.candidates, |c| self.bonused_score(c, predicted_rt))
                .expect("non-empty candidate list");
            irts.push(anchor.irt as f64);
            rts.push(best.rt_seconds as f64);
        }
        if irts.len() < self.params.min_anchors {
            return Err(SwathSeekError::InsufficientAnchors {
                passing: irts.len(),
                required: self.params.min_anchors,
            });
        }
        let fit = linear_fit(&irts, &rts)?;
        Ok(CalibrationModel {
            slope: fit.slope,
            intercept: fit.intercept,
            r_squared: r_squared(&irts, &rts, &fit),
        })
    }

    /// Pass-1 score plus the draft-trend bonus
    /// `w * (1 - |rt - predicted| / predicted)`.
    ///
    /// The bonus goes negative as a candidate drifts further than the
    /// predicted RT itself, which is what demotes far-off decoys. A
    /// non-positive predicted RT (possible for very early library
    /// indices under a poor draft) would flip the bonus's sign logic, so
    /// the raw score is used there instead.
    fn bonused_score(&self, candidate: &Candidate, predicted_rt: f32) -> f32 {
        if predicted_rt <= 0.0 {
            warn!(
                "Draft-predicted RT {}s is not positive; comparing raw scores",
                predicted_rt
            );
            return candidate.score;
        }
        let relative_miss = (candidate.rt_seconds - predicted_rt).abs() / predicted_rt;
        candidate.score + self.params.rt_bonus_weight * (1.0 - relative_miss)
    }
}

/// First maximum under `key`, matching argmax-of-first semantics for tied
/// scores (earlier candidates are earlier in time).
fn argmax_first<T>(items: &[T], key: impl Fn(&T) -> f32) -> Option<&T> {
    let mut best: Option<(&T, f32)> = None;
    for item in items {
        let val = key(item);
        match best {
            Some((_, best_val)) if val <= best_val => {}
            _ => best = Some((item, val)),
        }
    }
    best.map(|(item, _)| item)
}
