//! Configuration validation errors and semantic validation.

use thiserror::Error;

use crate::engine::{ConfidenceParams, EngineConfig, FactorWeights, InsightParams, StateSplit, Thresholds};

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Tolerance on the factor weight total.
const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 30,
            ValidationError::ParseError(_) => 31,
            ValidationError::SemanticError(_) => 32,
            ValidationError::InvalidValue { .. } => 33,
            ValidationError::VersionMismatch { .. } => 34,
        }
    }
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

/// Validate an engine configuration semantically.
pub fn validate_engine(config: &EngineConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    validate_weights(&config.weights)?;
    validate_split(&config.current_state_split)?;
    validate_thresholds(&config.thresholds)?;
    validate_confidence(&config.confidence)?;
    validate_insights(&config.insights)?;

    Ok(())
}

fn validate_weights(weights: &FactorWeights) -> ValidationResult<()> {
    for (name, value) in weights.named() {
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(
                format!("weights.{}", name),
                format!("must be a finite non-negative number, got {}", value),
            ));
        }
    }

    let total = weights.total();
    if (total - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ValidationError::SemanticError(format!(
            "Factor weights must sum to 100, got {}",
            total
        )));
    }

    Ok(())
}

fn validate_split(split: &StateSplit) -> ValidationResult<()> {
    for (name, value) in split.named() {
        if !(0.0..=1.0).contains(&value) {
            return Err(invalid(
                format!("current_state_split.{}", name),
                format!("must be in [0, 1], got {}", value),
            ));
        }
    }

    let shares = split.named();
    for pair in shares.windows(2) {
        let (prev_name, prev) = pair[0];
        let (name, value) = pair[1];
        if value > prev {
            return Err(ValidationError::SemanticError(format!(
                "current_state_split.{} ({}) must not exceed current_state_split.{} ({})",
                name, value, prev_name, prev
            )));
        }
    }

    Ok(())
}

fn validate_margin(field: &str, value: f64) -> ValidationResult<()> {
    if !(0.0..1.0).contains(&value) {
        return Err(invalid(field, format!("must be in [0, 1), got {}", value)));
    }
    Ok(())
}

fn validate_pct(field: &str, value: f64) -> ValidationResult<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(invalid(field, format!("must be in [0, 100], got {}", value)));
    }
    Ok(())
}

fn validate_thresholds(thresholds: &Thresholds) -> ValidationResult<()> {
    validate_margin("thresholds.trend_margin", thresholds.trend_margin)?;
    validate_margin("thresholds.recent_margin", thresholds.recent_margin)?;

    if thresholds.recent_window == 0 {
        return Err(invalid("thresholds.recent_window", "must be at least 1"));
    }
    if thresholds.recent_min_entries == 0 {
        return Err(invalid("thresholds.recent_min_entries", "must be at least 1"));
    }

    validate_pct("thresholds.alternation_high_pct", thresholds.alternation_high_pct)?;
    validate_pct("thresholds.alternation_low_pct", thresholds.alternation_low_pct)?;
    if thresholds.alternation_low_pct > thresholds.alternation_high_pct {
        return Err(ValidationError::SemanticError(format!(
            "thresholds.alternation_low_pct ({}) must not exceed alternation_high_pct ({})",
            thresholds.alternation_low_pct, thresholds.alternation_high_pct
        )));
    }

    if thresholds.trend_dead_zone < 0 {
        return Err(invalid(
            "thresholds.trend_dead_zone",
            format!("must be non-negative, got {}", thresholds.trend_dead_zone),
        ));
    }

    Ok(())
}

fn validate_confidence(confidence: &ConfidenceParams) -> ValidationResult<()> {
    if !confidence.full_sample_size.is_finite() || confidence.full_sample_size <= 0.0 {
        return Err(invalid(
            "confidence.full_sample_size",
            format!("must be positive, got {}", confidence.full_sample_size),
        ));
    }
    validate_pct("confidence.base_cap", confidence.base_cap)?;
    validate_pct("confidence.consistency_max", confidence.consistency_max)?;
    if confidence.base_cap + confidence.consistency_max > 100.0 {
        return Err(ValidationError::SemanticError(format!(
            "confidence.base_cap + confidence.consistency_max must not exceed 100, got {}",
            confidence.base_cap + confidence.consistency_max
        )));
    }
    if confidence.consistency_window == 0 {
        return Err(invalid("confidence.consistency_window", "must be at least 1"));
    }
    if !confidence.step_penalty.is_finite() || confidence.step_penalty < 0.0 {
        return Err(invalid(
            "confidence.step_penalty",
            format!("must be non-negative, got {}", confidence.step_penalty),
        ));
    }
    if confidence.min_entries == 0 {
        return Err(invalid("confidence.min_entries", "must be at least 1"));
    }

    Ok(())
}

fn validate_insights(insights: &InsightParams) -> ValidationResult<()> {
    if insights.min_entries == 0 {
        return Err(invalid("insights.min_entries", "must be at least 1"));
    }
    if insights.recent_window == 0 {
        return Err(invalid("insights.recent_window", "must be at least 1"));
    }
    if !insights.volatility_low_pct.is_finite() || insights.volatility_low_pct < 0.0 {
        return Err(invalid(
            "insights.volatility_low_pct",
            format!("must be non-negative, got {}", insights.volatility_low_pct),
        ));
    }
    if !insights.volatility_high_pct.is_finite()
        || insights.volatility_low_pct > insights.volatility_high_pct
    {
        return Err(ValidationError::SemanticError(format!(
            "insights.volatility_low_pct ({}) must not exceed volatility_high_pct ({})",
            insights.volatility_low_pct, insights.volatility_high_pct
        )));
    }

    Ok(())
}
