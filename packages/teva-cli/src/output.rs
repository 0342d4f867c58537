use std::io::Write;
use std::path::Path;

/// Serialize a value to JSON, pretty unless compact is requested.
pub fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<String, String> {
    let result = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    result.map_err(|e| format!("JSON serialization failed: {}", e))
}

/// Emit a JSON document to stdout, or to a file when a target is given.
pub fn emit(json: &str, target: Option<&str>) -> Result<(), String> {
    match target {
        Some(path) => std::fs::write(Path::new(path), json)
            .map_err(|e| format!("Failed to write output file '{}': {}", path, e)),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(json.as_bytes())
                .and_then(|_| handle.write_all(b"\n"))
                .map_err(|e| format!("Failed to write to stdout: {}", e))
        }
    }
}
