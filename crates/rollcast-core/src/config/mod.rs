//! Engine configuration loading for rollcast-core.
//!
//! This module handles:
//! - Resolving engine.json (CLI > env > XDG > defaults)
//! - Shape checking via serde and the schema version check
//! - Semantic validation (weight sum, band shares, thresholds)
//! - Config snapshots for `config show` and forecast provenance

pub use rollcast_config::engine;
pub use rollcast_config::{
    resolve_config, validate_engine, ConfigPaths, ConfigSnapshot, ConfigSource, EngineConfig,
    ValidationError, CONFIG_SCHEMA_VERSION,
};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid JSON in config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Semantic validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl From<ConfigError> for rollcast_common::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError(_) | ConfigError::VersionMismatch { .. } => {
                rollcast_common::Error::InvalidConfig(err.to_string())
            }
            _ => rollcast_common::Error::Config(err.to_string()),
        }
    }
}

/// Resolved configuration with provenance information.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The effective engine configuration.
    pub engine: EngineConfig,
    /// Where it came from.
    pub paths: ConfigPaths,
    /// File content as read (None when using defaults).
    pub raw: Option<String>,
}

impl ResolvedConfig {
    /// Built-in calibration, no file involved.
    pub fn defaults() -> Self {
        ResolvedConfig {
            engine: EngineConfig::default(),
            paths: ConfigPaths::default(),
            raw: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.paths.engine.as_deref()
    }

    pub fn source(&self) -> &ConfigSource {
        &self.paths.source
    }

    /// Create a config snapshot for output and diagnostics.
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot::new(&self.engine, &self.paths, self.raw.as_deref())
    }
}

/// Load the engine configuration with the standard resolution order.
///
/// Resolution order (highest to lowest priority):
/// 1. Explicit `--config` file (must exist)
/// 2. ROLLCAST_CONFIG, then ROLLCAST_CONFIG_DIR/engine.json
/// 3. XDG config home (~/.config/rollcast/engine.json)
/// 4. Built-in defaults
pub fn load_engine_config(cli_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
    let paths = resolve_config(cli_path);
    let Some(path) = paths.engine.clone() else {
        return Ok(ResolvedConfig::defaults());
    };

    let (engine, raw) = load_engine_from_file(&path)?;
    Ok(ResolvedConfig {
        engine,
        paths,
        raw: Some(raw),
    })
}

/// Load and validate a specific engine.json. Returns the config and the raw text.
pub fn load_engine_from_file(path: &Path) -> Result<(EngineConfig, String), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let engine: EngineConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

    // Check schema version
    if engine.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(ConfigError::VersionMismatch {
            expected: CONFIG_SCHEMA_VERSION.to_string(),
            actual: engine.schema_version.clone(),
        });
    }

    validate_engine(&engine)?;
    Ok((engine, content))
}
