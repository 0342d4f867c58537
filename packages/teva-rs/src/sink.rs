use std::path::{Path, PathBuf};

use crate::error::{Result, TevaError};
use crate::types::{ResultsBundle, BUNDLE_SCHEMA_VERSION};

/// Target artifact path for one capture: `<output_dir>/<file_name>.result`.
pub fn bundle_output_path(output_dir: &Path, source_path: &str) -> PathBuf {
    let name = Path::new(source_path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("capture");
    output_dir.join(format!("{}.result", name))
}

/// Durably store a bundle as pretty JSON.
///
/// The document goes to a temporary sibling first and is renamed into
/// place, so a failure part way through never leaves a truncated bundle at
/// the target path.
pub fn write_bundle(bundle: &ResultsBundle, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(bundle)?;

    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    std::fs::write(&tmp, json.as_bytes())?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }

    log::debug!("Wrote bundle for {} to {}", bundle.file, path.display());
    Ok(())
}

/// Read a bundle back, rejecting unknown schema versions.
pub fn read_bundle(path: &Path) -> Result<ResultsBundle> {
    let json = std::fs::read_to_string(path)?;
    let bundle: ResultsBundle = serde_json::from_str(&json)?;
    if bundle.schema_version != BUNDLE_SCHEMA_VERSION {
        return Err(TevaError::DecodeError {
            path: path.display().to_string(),
            reason: format!(
                "unsupported bundle schema version {} (expected {})",
                bundle.schema_version, BUNDLE_SCHEMA_VERSION
            ),
        });
    }
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::EventId;
    use crate::types::{CalculationResult, ChannelStats, Event};
    use std::collections::BTreeMap;

    fn sample_bundle() -> ResultsBundle {
        let events = vec![
            Event::new(0.0, 2.0, "car1.ext").unwrap(),
            Event::new(3.0, 4.0, "car1.ext").unwrap(),
        ];
        let mut result = CalculationResult::new();
        result.insert(
            "RPM".to_string(),
            ChannelStats {
                min: 1100.0,
                max: 1100.0,
                mean: 1100.0,
                std: f64::NAN,
            },
        );
        let mut calculations = BTreeMap::new();
        calculations.insert(EventId::of(&events[0]), result);
        ResultsBundle::new("car1.ext", events, calculations)
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("car1.ext.result");
        let bundle = sample_bundle();

        write_bundle(&bundle, &path).unwrap();
        let back = read_bundle(&path).unwrap();

        assert_eq!(back.schema_version, bundle.schema_version);
        assert_eq!(back.id, bundle.id);
        assert_eq!(back.file, bundle.file);
        assert_eq!(back.events, bundle.events);
        assert_eq!(back.calculations.len(), 1);

        let key = EventId::of(&bundle.events[0]);
        let stats = &back.calculations[&key]["RPM"];
        assert_eq!(stats.mean, 1100.0);
        assert!(stats.std.is_nan());
    }

    #[test]
    fn test_no_leftover_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("car1.ext.result");

        write_bundle(&sample_bundle(), &path).unwrap();
        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["car1.ext.result"]);
    }

    #[test]
    fn test_write_into_missing_dir_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("car1.ext.result");

        assert!(write_bundle(&sample_bundle(), &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_unknown_schema_version_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("car1.ext.result");

        let mut bundle = sample_bundle();
        bundle.schema_version = 99;
        write_bundle(&bundle, &path).unwrap();

        let err = read_bundle(&path).unwrap_err();
        assert!(matches!(err, TevaError::DecodeError { .. }));
    }

    #[test]
    fn test_output_path_uses_original_file_name() {
        let path = bundle_output_path(Path::new("out"), "data/raw/car1.ext");
        assert_eq!(path, Path::new("out").join("car1.ext.result"));
    }
}
