use std::path::Path;

use crate::recording::Recording;

const MAX_DEPTH: usize = 16;

/// Recursively collect candidate file paths under each root directory.
///
/// Hidden entries are skipped; a root that is not a directory is logged and
/// contributes nothing. No filtering by content happens here; the validity
/// gate decides what is actually processable. Output is sorted and
/// deduplicated for deterministic batches.
pub fn discover_files(roots: &[String]) -> Vec<String> {
    let mut files = Vec::new();
    for root in roots {
        let path = Path::new(root);
        if !path.is_dir() {
            log::warn!("Skipping source '{}': not a valid directory", root);
            continue;
        }
        walk_dir(path, 0, &mut files);
    }
    files.sort();
    files.dedup();
    files
}

fn walk_dir(dir: &Path, depth: usize, files: &mut Vec<String>) {
    if depth > MAX_DEPTH {
        return;
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }

        if path.is_dir() {
            walk_dir(&path, depth + 1, files);
        } else if path.is_file() {
            if let Some(s) = path.to_str() {
                files.push(s.to_string());
            }
        }
    }
}

/// Validity gate: partition candidates into decodable and non-decodable.
///
/// A candidate is valid exactly when a full decode succeeds; the path
/// string travels on unchanged and later becomes `Event.file` and the
/// output artifact name.
pub fn check_quality(paths: &[String]) -> (Vec<String>, Vec<String>) {
    let mut valid = Vec::new();
    let mut invalid = Vec::new();

    for path in paths {
        match Recording::from_csv_path(path) {
            Ok(_) => valid.push(path.clone()),
            Err(e) => {
                log::warn!("Invalid capture file {}: {}", path, e);
                invalid.push(path.clone());
            }
        }
    }

    (valid, invalid)
}
