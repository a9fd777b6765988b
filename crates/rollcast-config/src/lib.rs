//! Rollcast engine configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for engine.json (factor weights and thresholds)
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation
//! - Config snapshots for reproducible forecasts

pub mod engine;
pub mod resolve;
pub mod snapshot;
pub mod validate;

pub use engine::{
    ConfidenceParams, EngineConfig, FactorWeights, InsightParams, StateSplit, Thresholds,
};
pub use resolve::{resolve_config, ConfigPaths, ConfigSource};
pub use snapshot::ConfigSnapshot;
pub use validate::{validate_engine, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
