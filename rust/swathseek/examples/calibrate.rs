//! Calibrates a synthetic DIA run end to end and prints the fitted model
//! and the per-peptide features.

use swathquery::{
    CentroidPeaks,
    CycleIndex,
    Scan,
    SwathWindow,
};
use swathseek::{
    build_features,
    CalibrationParams,
    DenseGrid,
    FeatureParams,
    LibraryEntry,
    RtCalibrator,
    Speclib,
};

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

/// Anchor peptides eluting on the line rt = 2 * irt + 10.
fn anchors() -> Vec<LibraryEntry> {
    (1..=5)
        .map(|i| {
            let precursor_mz = 400.0 + 30.0 * i as f64;
            LibraryEntry {
                id: format!("ANCHOR{}_2+", i),
                irt: i as f32,
                precursor_mz,
                fragment_mzs: vec![
                    precursor_mz + 600.0,
                    precursor_mz + 720.0,
                    precursor_mz + 840.0,
                ],
                fragment_intensities: vec![1.0, 0.6, 0.3],
                isotope_mzs: vec![precursor_mz, precursor_mz + 0.5, precursor_mz + 1.0],
                isotope_abundances: vec![1.0, 0.5, 0.2],
                corrected_rt: None,
            }
        })
        .collect()
}

/// One SWATH window per anchor keeps the demo run easy to eyeball.
fn windows() -> Vec<SwathWindow> {
    (1..=5)
        .map(|i| {
            let center_mz = 400.0 + 30.0 * i as f64;
            SwathWindow {
                start_mz: center_mz - 15.0,
                end_mz: center_mz + 15.0,
                center_mz,
            }
        })
        .collect()
}

fn synthetic_run(entries: &[LibraryEntry], windows: Vec<SwathWindow>, n_cycles: usize) -> CycleIndex {
    let gaussian = |t: f32, apex: f32| -> f32 {
        let z = (t - apex) / 1.5;
        100.0 * (-0.5 * z * z).exp()
    };
    let true_rt = |entry: &LibraryEntry| 2.0 * entry.irt + 10.0;

    let mut scans = Vec::new();
    for cycle in 0..n_cycles {
        let t = cycle as f32;
        let mut ms1: Vec<(f64, f32)> = Vec::new();
        for entry in entries {
            let scale = gaussian(t, true_rt(entry));
            for (&mz, &ab) in entry.isotope_mzs.iter().zip(&entry.isotope_abundances) {
                ms1.push((mz, scale * ab));
            }
        }
        ms1.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (mzs, ints) = ms1.into_iter().unzip();
        scans.push(Scan::ms1(t, CentroidPeaks::new(mzs, ints).unwrap()));

        for (w, entry) in entries.iter().enumerate() {
            let t_ms2 = t + 0.1 * (w + 1) as f32;
            let scale = gaussian(t_ms2, true_rt(entry));
            let ints = entry
                .fragment_intensities
                .iter()
                .map(|&x| scale * x)
                .collect();
            scans.push(Scan::ms2(
                t_ms2,
                w + 1,
                CentroidPeaks::new(entry.fragment_mzs.clone(), ints).unwrap(),
            ));
        }
    }
    CycleIndex::new(scans, windows).unwrap()
}

fn main() {
    setup_tracing();

    let entries = anchors();
    let index = synthetic_run(&entries, windows(), 40);
    let mut speclib = Speclib::from_entries(entries).unwrap();
    println!(
        "Synthetic run: {} cycles, {} windows, {} anchor peptides",
        index.num_cycles(),
        index.num_windows(),
        speclib.len()
    );

    let calibrator = RtCalibrator::new(&index, DenseGrid::default(), CalibrationParams::default());
    match calibrator.calibrate(&speclib) {
        Ok(model) => {
            println!(
                "Fitted calibration: rt = {:.3} * irt + {:.3} (r2 {:.4})",
                model.slope, model.intercept, model.r_squared
            );
            let features = build_features(&index, &mut speclib, &model, &FeatureParams::default());
            for feature in features {
                println!(
                    "- {}: corrected RT {:.2}s, {} chromatogram points",
                    feature.id,
                    feature.corrected_rt,
                    feature.eic.len()
                );
            }
        }
        Err(e) => eprintln!("Calibration failed: {}", e),
    }
}
