//! JSON input files

use dogfinder_core::error::{Error, Result, ResultExt};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

/// Read and decode a JSON file, or stdin when `path` is "-".
pub fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(Error::from)
            .context(format!("While reading {} from stdin", what))?;
        text
    } else {
        if !path.exists() {
            return Err(Error::file_not_found(path).with_context(format!("While reading {}", what)));
        }
        std::fs::read_to_string(path)
            .map_err(Error::from)
            .context(format!("While reading {}", what))?
    };

    serde_json::from_str(&text)
        .map_err(Error::from)
        .context(format!("While decoding {} from {}", what, path.display()))
        .with_suggestion(format!("Check that {} is valid JSON of the expected shape", what))
}

/// Like [`read_json`], but a missing file decodes as the default value.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path, what: &str) -> Result<T> {
    if path != Path::new("-") && !path.exists() {
        tracing::debug!(path = %path.display(), "No {} file yet, starting empty", what);
        return Ok(T::default());
    }
    read_json(path, what)
}

/// Write `value` as pretty JSON to `path`.
pub fn write_json<T: serde::Serialize>(path: &Path, value: &T, what: &str) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(path, text + "\n")
        .map_err(Error::from)
        .context(format!("While writing {} to {}", what, path.display()))
}
