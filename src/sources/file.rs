//! Extension-driven config file decoding.
//!
//! Each decoder is a pure function from path to [`Value`]. Before any decode
//! runs, the target must be a regular file no larger than [`MAX_FILE_SIZE`];
//! the check fails fast instead of reading unbounded input. Parser failures
//! propagate unchanged through the transparent error variants.

use crate::error::ConfigError;
use crate::value::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Config files should be small; anything over 2 MiB is rejected outright.
pub const MAX_FILE_SIZE: u64 = 2 * 1024 * 1024;

/// Select a decoder by extension and run it.
pub fn decode(path: &Path) -> Result<Value, ConfigError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    debug!(path = %path.display(), ext, "selecting config file decoder");
    match ext {
        "yml" | "yaml" => decode_yaml(path),
        "json" => decode_json(path),
        "toml" => decode_toml(path),
        _ => {
            warn!(path = %path.display(), "not one of the supported config file types");
            Err(ConfigError::UnsupportedFileType(path.to_path_buf()))
        }
    }
}

/// Decode a YAML config file.
pub fn decode_yaml(path: &Path) -> Result<Value, ConfigError> {
    debug!(path = %path.display(), "loading YAML config file");
    let text = read_checked(path)?;
    let parsed: serde_yaml::Value = serde_yaml::from_str(&text)?;
    Ok(parsed.into())
}

/// Decode a JSON config file.
pub fn decode_json(path: &Path) -> Result<Value, ConfigError> {
    debug!(path = %path.display(), "loading JSON config file");
    let text = read_checked(path)?;
    let parsed: serde_json::Value = serde_json::from_str(&text)?;
    Ok(parsed.into())
}

/// Decode a TOML config file.
pub fn decode_toml(path: &Path) -> Result<Value, ConfigError> {
    debug!(path = %path.display(), "loading TOML config file");
    let text = read_checked(path)?;
    let parsed: toml::Value = toml::from_str(&text)?;
    Ok(parsed.into())
}

/// File-safety precheck plus read: regular file, bounded size.
fn read_checked(path: &Path) -> Result<String, ConfigError> {
    let metadata = fs::metadata(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.is_file() {
        warn!(path = %path.display(), "not a regular file; refusing to decode");
        return Err(ConfigError::UnsupportedFileType(path.to_path_buf()));
    }
    if metadata.len() > MAX_FILE_SIZE {
        warn!(
            path = %path.display(),
            size = metadata.len(),
            limit = MAX_FILE_SIZE,
            "config file exceeds maximum supported size"
        );
        return Err(ConfigError::FileTooLarge(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
