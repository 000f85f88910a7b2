use crate::errors::{
    Result,
    SwathSeekError,
};
use serde::{
    Deserialize,
    Serialize,
};

/// One predicted library peptide.
///
/// All predicted fields come from the external prediction service and are
/// read-only here; `corrected_rt` is the single field this engine writes.
/// Once set by a calibration run it is only ever overwritten, never
/// cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub id: String,
    /// Library-native retention index (iRT).
    pub irt: f32,
    pub precursor_mz: f64,
    /// Predicted fragment masses, index-aligned with
    /// `fragment_intensities`.
    pub fragment_mzs: Vec<f64>,
    pub fragment_intensities: Vec<f32>,
    /// Predicted precursor isotope pattern, index-aligned pairs.
    pub isotope_mzs: Vec<f64>,
    pub isotope_abundances: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_rt: Option<f32>,
}

impl LibraryEntry {
    /// Checks the index-aligned vector pairs. Run at load time so scoring
    /// never has to re-check.
    pub fn validate(&self) -> Result<()> {
        if self.fragment_mzs.len() != self.fragment_intensities.len() {
            return Err(SwathSeekError::MismatchedLibraryVectors {
                id: self.id.clone(),
                context: "fragment mzs vs intensities",
            });
        }
        if self.isotope_mzs.len() != self.isotope_abundances.len() {
            return Err(SwathSeekError::MismatchedLibraryVectors {
                id: self.id.clone(),
                context: "isotope mzs vs abundances",
            });
        }
        Ok(())
    }
}

/// An owning collection of library peptides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Speclib {
    pub entries: Vec<LibraryEntry>,
}

impl Speclib {
    /// Builds a library, validating every entry.
    pub fn from_entries(entries: Vec<LibraryEntry>) -> Result<Self> {
        for entry in &entries {
            entry.validate()?;
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LibraryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry(id: &str) -> LibraryEntry {
        LibraryEntry {
            id: id.to_string(),
            irt: 25.0,
            precursor_mz: 500.0,
            fragment_mzs: vec![300.0, 400.0, 700.0],
            fragment_intensities: vec![1.0, 0.6, 0.3],
            isotope_mzs: vec![500.0, 500.5, 501.0],
            isotope_abundances: vec![1.0, 0.5, 0.2],
            corrected_rt: None,
        }
    }

    #[test]
    fn test_validation_catches_misaligned_vectors() {
        let mut entry = sample_entry("PEPTIDEK_2+");
        assert!(entry.validate().is_ok());
        entry.fragment_intensities.pop();
        assert!(matches!(
            entry.validate(),
            Err(SwathSeekError::MismatchedLibraryVectors { .. })
        ));
        assert!(Speclib::from_entries(vec![entry]).is_err());
    }
}
