//! Error types for the strata configuration system.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration.
///
/// Every kind carries a numeric code and a stable symbolic name, exposed via
/// [`ConfigError::code`] and [`ConfigError::name`]. Decoder failures are
/// transparent: they propagate the underlying parser error unchanged.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file too large (limit is 2 MiB): {0}")]
    FileTooLarge(PathBuf),

    #[error("Unsupported config file type: {0}")]
    UnsupportedFileType(PathBuf),

    #[error("The configuration store is read-only")]
    ReadOnly,

    #[error("Convention loading requires an explicit base directory")]
    MissingDirectory,

    #[error("Failed to read config file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl ConfigError {
    /// Numeric code for this error kind.
    pub fn code(&self) -> u16 {
        match self {
            ConfigError::FileTooLarge(_) => 413,
            ConfigError::UnsupportedFileType(_) => 415,
            ConfigError::ReadOnly => 500,
            ConfigError::MissingDirectory => 400,
            ConfigError::Io { .. } => 500,
            ConfigError::Yaml(_) | ConfigError::Json(_) | ConfigError::Toml(_) => 422,
        }
    }

    /// Stable symbolic name for this error kind.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigError::FileTooLarge(_) => "CONFIG:FILE_TOO_LARGE",
            ConfigError::UnsupportedFileType(_) => "CONFIG:FILE_NOT_SUPPORTED",
            ConfigError::ReadOnly => "CONFIG:READ_ONLY",
            ConfigError::MissingDirectory => "CONFIG:MISSING_DIRNAME",
            ConfigError::Io { .. } => "CONFIG:IO",
            ConfigError::Yaml(_) => "CONFIG:DECODE_YAML",
            ConfigError::Json(_) => "CONFIG:DECODE_JSON",
            ConfigError::Toml(_) => "CONFIG:DECODE_TOML",
        }
    }
}
