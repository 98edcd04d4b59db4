//! TOML configuration loading

use crate::{Error, Result, io};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Load a TOML file into `T`.
///
/// Returns `Ok(None)` when the file does not exist, so callers can layer
/// an optional config file over their defaults.
pub fn load_toml_if_exists<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no config file");
        return Ok(None);
    }

    let content = io::read_text(path)?;
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            format: "TOML".into(),
            message: e.to_string(),
        })
}
