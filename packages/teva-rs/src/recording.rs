use std::path::Path;

use crate::error::{Result, TevaError};

const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "txt", "ext"];
const INDEX_COLUMN_NAMES: &[&str] = &["time", "timestamp"];

/// One decoded telemetry capture: an ordered, time-indexed table of named
/// channel values.
///
/// Storage is column-major `f64`, with `NaN` encoding a missing value. The
/// index comes from the first column when it is named `time` or `timestamp`
/// (case-insensitive); otherwise every column is a channel and the row
/// ordinal serves as the index.
#[derive(Debug, Clone)]
pub struct Recording {
    index: Vec<f64>,
    channels: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl Recording {
    /// Decode a capture from a CSV file (extensions: csv, txt, ext).
    ///
    /// Cells must be numeric; an empty cell (or literal `nan`) is a missing
    /// value. Anything else fails the decode, which is what the validity
    /// gate relies on to partition candidate files.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TevaError::FileNotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(TevaError::UnsupportedFileType(path.display().to_string()));
        }

        let decode_err = |reason: String| TevaError::DecodeError {
            path: path.display().to_string(),
            reason,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| decode_err(e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| decode_err(e.to_string()))?
            .clone();
        if headers.is_empty() {
            return Err(decode_err("missing header row".to_string()));
        }

        let first = headers.get(0).unwrap_or("").to_ascii_lowercase();
        let has_index_column = INDEX_COLUMN_NAMES.contains(&first.as_str());
        let channel_offset = usize::from(has_index_column);

        let channels: Vec<String> = headers
            .iter()
            .skip(channel_offset)
            .map(str::to_string)
            .collect();

        let mut index = Vec::new();
        let mut columns = vec![Vec::new(); channels.len()];

        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| decode_err(e.to_string()))?;
            if record.len() != headers.len() {
                return Err(decode_err(format!(
                    "row {}: expected {} cells, got {}",
                    row,
                    headers.len(),
                    record.len()
                )));
            }

            if has_index_column {
                let cell = record.get(0).unwrap_or("");
                let value = parse_cell(cell)
                    .ok_or_else(|| decode_err(format!("row {}: bad index value '{}'", row, cell)))?;
                if value.is_nan() {
                    return Err(decode_err(format!("row {}: missing index value", row)));
                }
                index.push(value);
            } else {
                index.push(row as f64);
            }

            for (column, cell) in columns.iter_mut().zip(record.iter().skip(channel_offset)) {
                let value = parse_cell(cell)
                    .ok_or_else(|| decode_err(format!("row {}: '{}' is not numeric", row, cell)))?;
                column.push(value);
            }
        }

        log::debug!(
            "Decoded {}: {} channel(s), {} row(s)",
            path.display(),
            channels.len(),
            index.len()
        );

        Ok(Self {
            index,
            channels,
            columns,
        })
    }

    /// Build a recording directly from columns. Lengths must agree.
    pub fn from_columns(
        index: Vec<f64>,
        channels: Vec<(String, Vec<f64>)>,
    ) -> Result<Self> {
        for (name, values) in &channels {
            if values.len() != index.len() {
                return Err(TevaError::InvalidParameter(format!(
                    "channel '{}' has {} values for {} index entries",
                    name,
                    values.len(),
                    index.len()
                )));
            }
        }
        let (channels, columns) = channels.into_iter().unzip();
        Ok(Self {
            index,
            channels,
            columns,
        })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[f64] {
        &self.index
    }

    pub fn channel_names(&self) -> &[String] {
        &self.channels
    }

    pub fn has_channel(&self, name: &str) -> bool {
        self.channels.iter().any(|c| c == name)
    }

    /// Column values for one channel, in row order (`NaN` = missing).
    pub fn channel(&self, name: &str) -> Option<&[f64]> {
        self.channels
            .iter()
            .position(|c| c == name)
            .map(|i| self.columns[i].as_slice())
    }
}

fn parse_cell(cell: &str) -> Option<f64> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_capture(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_decode_with_time_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_capture(
            &dir,
            "cap.csv",
            "time,SPEED,RPM\n0.5,45,1000\n1.0,55,1100\n",
        );

        let rec = Recording::from_csv_path(&path).unwrap();
        assert_eq!(rec.len(), 2);
        assert_eq!(rec.index(), &[0.5, 1.0]);
        assert_eq!(rec.channel_names(), &["SPEED", "RPM"]);
        assert_eq!(rec.channel("SPEED").unwrap(), &[45.0, 55.0]);
    }

    #[test]
    fn test_decode_ordinal_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_capture(&dir, "cap.csv", "SPEED,RPM\n45,1000\n55,1100\n65,1200\n");

        let rec = Recording::from_csv_path(&path).unwrap();
        assert_eq!(rec.index(), &[0.0, 1.0, 2.0]);
        assert_eq!(rec.channel_names(), &["SPEED", "RPM"]);
    }

    #[test]
    fn test_empty_cell_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_capture(&dir, "cap.csv", "SPEED,RPM\n45,\n,1100\n");

        let rec = Recording::from_csv_path(&path).unwrap();
        assert!(rec.channel("RPM").unwrap()[0].is_nan());
        assert!(rec.channel("SPEED").unwrap()[1].is_nan());
    }

    #[test]
    fn test_non_numeric_cell_fails_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_capture(&dir, "cap.csv", "SPEED\n45\nfast\n");

        let err = Recording::from_csv_path(&path).unwrap_err();
        assert!(matches!(err, TevaError::DecodeError { .. }));
    }

    #[test]
    fn test_missing_index_value_fails_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_capture(&dir, "cap.csv", "time,SPEED\n0.5,45\n,55\n");

        assert!(Recording::from_csv_path(&path).is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_capture(&dir, "cap.mp3", "SPEED\n45\n");

        let err = Recording::from_csv_path(&path).unwrap_err();
        assert!(matches!(err, TevaError::UnsupportedFileType(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Recording::from_csv_path("/nonexistent/cap.csv").unwrap_err();
        assert!(matches!(err, TevaError::FileNotFound(_)));
    }

    #[test]
    fn test_from_columns_length_mismatch() {
        let result = Recording::from_columns(
            vec![0.0, 1.0],
            vec![("SPEED".to_string(), vec![45.0])],
        );
        assert!(result.is_err());
    }
}
