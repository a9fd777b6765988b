//! Configuration snapshots for reproducible forecasts.
//!
//! A snapshot records which calibration produced a forecast, so two
//! forecasts can be compared by hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::engine::{EngineConfig, FactorWeights};
use crate::resolve::{ConfigPaths, ConfigSource};

/// A frozen snapshot of configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// When this snapshot was taken.
    pub timestamp: DateTime<Utc>,

    /// Schema version of the configuration.
    pub schema_version: String,

    /// SHA-256 hash of the engine JSON content.
    #[serde(default)]
    pub engine_hash: Option<String>,

    /// Path where the engine config was loaded from.
    #[serde(default)]
    pub engine_path: Option<String>,

    /// Source of the engine configuration.
    pub engine_source: String,

    /// Hash of the effective configuration (for quick comparison).
    pub combined_hash: String,

    /// Factor weights in effect.
    pub weights: FactorWeights,
}

impl ConfigSnapshot {
    /// Create a new snapshot from loaded configuration.
    ///
    /// `raw_json` is the file content as read, when one was loaded.
    pub fn new(config: &EngineConfig, paths: &ConfigPaths, raw_json: Option<&str>) -> Self {
        ConfigSnapshot {
            timestamp: Utc::now(),
            schema_version: config.schema_version.clone(),
            engine_hash: raw_json.map(hash_content),
            engine_path: paths.engine.as_ref().map(|p| p.display().to_string()),
            engine_source: paths.source.to_string(),
            combined_hash: effective_hash(config),
            weights: config.weights,
        }
    }

    /// Create a snapshot with only defaults (no config file loaded).
    pub fn defaults_only() -> Self {
        let config = EngineConfig::default();
        ConfigSnapshot {
            timestamp: Utc::now(),
            schema_version: config.schema_version.clone(),
            engine_hash: None,
            engine_path: None,
            engine_source: ConfigSource::BuiltinDefault.to_string(),
            combined_hash: effective_hash(&config),
            weights: config.weights,
        }
    }

    /// Serialize snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check if this snapshot matches another (same effective config).
    pub fn matches(&self, other: &ConfigSnapshot) -> bool {
        self.combined_hash == other.combined_hash
    }

    /// Get a short identifier for this snapshot (first 12 chars of hash).
    pub fn short_id(&self) -> &str {
        &self.combined_hash[..12.min(self.combined_hash.len())]
    }
}

/// Hash of the canonical serialization, so formatting differences in the
/// source file do not change the identity of a calibration.
fn effective_hash(config: &EngineConfig) -> String {
    let canonical = serde_json::to_string(config).unwrap_or_default();
    hash_content(&canonical)
}

/// Hash content with SHA-256 and return hex string.
fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
