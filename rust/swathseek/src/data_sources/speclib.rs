use crate::errors::LibraryReadingError;
use crate::models::Speclib;
use std::fs::File;
use std::io::{
    BufReader,
    Read,
};
use std::path::Path;

impl Speclib {
    /// Reads a predicted spectral library from JSON.
    ///
    /// The document is an array of entries as produced by the external
    /// prediction service; entries are validated on load.
    pub fn from_json_reader<R: Read>(reader: R) -> crate::errors::Result<Self> {
        let entries = serde_json::from_reader(BufReader::new(reader)).map_err(|source| {
            LibraryReadingError::SpeclibParsingError {
                source,
                context: "speclib json",
            }
        })?;
        Self::from_entries(entries)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> crate::errors::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LibraryReadingError::FileReadingError {
            source,
            path: path.to_path_buf(),
        })?;
        Self::from_json_reader(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_speclib_json() {
        let json = r#"[
            {
                "id": "LGGNEQVTR_2+",
                "irt": -24.92,
                "precursor_mz": 487.2567,
                "fragment_mzs": [604.3201, 503.2724, 389.2143],
                "fragment_intensities": [1.0, 0.61, 0.27],
                "isotope_mzs": [487.2567, 487.7584, 488.26],
                "isotope_abundances": [1.0, 0.53, 0.17]
            }
        ]"#;
        let speclib = Speclib::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(speclib.len(), 1);
        let entry = &speclib.entries[0];
        assert_eq!(entry.id, "LGGNEQVTR_2+");
        assert!(entry.corrected_rt.is_none());
    }

    #[test]
    fn test_misaligned_entry_rejected_at_load() {
        let json = r#"[
            {
                "id": "BAD_2+",
                "irt": 0.0,
                "precursor_mz": 500.0,
                "fragment_mzs": [300.0, 400.0],
                "fragment_intensities": [1.0],
                "isotope_mzs": [500.0],
                "isotope_abundances": [1.0]
            }
        ]"#;
        assert!(Speclib::from_json_reader(json.as_bytes()).is_err());
    }
}
