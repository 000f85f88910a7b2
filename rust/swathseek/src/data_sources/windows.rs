use crate::errors::LibraryReadingError;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use swathquery::SwathWindow;

/// One row of the acquisition-scheme CSV, `start_mz,end_mz,center`.
#[derive(Debug, Deserialize)]
struct WindowRecord {
    start_mz: f64,
    end_mz: f64,
    center: f64,
}

impl From<WindowRecord> for SwathWindow {
    fn from(x: WindowRecord) -> Self {
        SwathWindow {
            start_mz: x.start_mz,
            end_mz: x.end_mz,
            center_mz: x.center,
        }
    }
}

/// Reads the SWATH window table from CSV, in acquisition order.
pub fn read_window_table<R: Read>(reader: R) -> crate::errors::Result<Vec<SwathWindow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut windows = Vec::new();
    for record in csv_reader.deserialize() {
        let record: WindowRecord =
            record.map_err(|source| LibraryReadingError::WindowTableParsingError {
                source,
                context: "window table csv",
            })?;
        windows.push(record.into());
    }
    Ok(windows)
}

pub fn read_window_table_path(path: impl AsRef<Path>) -> crate::errors::Result<Vec<SwathWindow>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LibraryReadingError::FileReadingError {
        source,
        path: path.to_path_buf(),
    })?;
    read_window_table(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_window_table() {
        let csv = "start_mz,end_mz,center\n400.0,425.0,412.5\n425.0,450.0,437.5\n";
        let windows = read_window_table(csv.as_bytes()).unwrap();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].start_mz, 400.0);
        assert_eq!(windows[1].center_mz, 437.5);
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let csv = "start_mz,end_mz,center\n400.0,not_a_number,412.5\n";
        assert!(read_window_table(csv.as_bytes()).is_err());
    }
}
