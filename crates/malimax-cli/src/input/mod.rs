pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;
use std::path::Path;

/// Load a command's JSON input from `--input` or, failing that, piped stdin.
///
/// Returns `Ok(None)` when neither is available so the caller can fall back
/// to flags or sample data.
pub fn load<T: DeserializeOwned>(path: Option<&Path>) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    stdin::read_stdin()
}
