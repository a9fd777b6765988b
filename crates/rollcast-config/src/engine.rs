//! Engine configuration types.
//!
//! Every field carries a serde default equal to the reference calibration,
//! so an absent file, `{}`, or a partial file all describe a valid engine.

use serde::{Deserialize, Serialize};

/// Complete engine configuration (engine.json).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub weights: FactorWeights,

    #[serde(default)]
    pub current_state_split: StateSplit,

    #[serde(default)]
    pub thresholds: Thresholds,

    #[serde(default)]
    pub confidence: ConfidenceParams,

    #[serde(default)]
    pub insights: InsightParams,
}

fn default_schema_version() -> String {
    crate::CONFIG_SCHEMA_VERSION.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            schema_version: default_schema_version(),
            description: None,
            weights: FactorWeights::default(),
            current_state_split: StateSplit::default(),
            thresholds: Thresholds::default(),
            confidence: ConfidenceParams::default(),
            insights: InsightParams::default(),
        }
    }
}

impl EngineConfig {
    /// Load engine config from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, crate::validate::ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::validate::ValidationError::IoError(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    /// Parse engine config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, crate::validate::ValidationError> {
        serde_json::from_str(json).map_err(|e| {
            crate::validate::ValidationError::ParseError(format!("Invalid JSON: {}", e))
        })
    }
}

/// Maximum contribution of each heuristic factor. Must sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorWeights {
    pub numeric_trend: f64,
    pub current_state: f64,
    pub markov_transition: f64,
    pub distance_from_center: f64,
    pub recent_pattern: f64,
    pub alternation: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        FactorWeights {
            numeric_trend: 20.0,
            current_state: 25.0,
            markov_transition: 20.0,
            distance_from_center: 15.0,
            recent_pattern: 15.0,
            alternation: 5.0,
        }
    }
}

impl FactorWeights {
    /// Weights in factor order, paired with their config keys.
    pub fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("numeric_trend", self.numeric_trend),
            ("current_state", self.current_state),
            ("markov_transition", self.markov_transition),
            ("distance_from_center", self.distance_from_center),
            ("recent_pattern", self.recent_pattern),
            ("alternation", self.alternation),
        ]
    }

    pub fn total(&self) -> f64 {
        self.named().iter().map(|(_, w)| w).sum()
    }
}

/// Share of the current-state weight awarded to class A for each band.
///
/// Class B receives the complement. Shares must not increase with band order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSplit {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
    pub extreme: f64,
}

impl Default for StateSplit {
    fn default() -> Self {
        // 25/0, 12/13, 3/22 and 0/25 at the reference weight of 25.
        StateSplit {
            low: 1.0,
            mid: 0.48,
            high: 0.12,
            extreme: 0.0,
        }
    }
}

impl StateSplit {
    /// Shares in band order, paired with their config keys.
    pub fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("low", self.low),
            ("mid", self.mid),
            ("high", self.high),
            ("extreme", self.extreme),
        ]
    }
}

/// Decision thresholds of the heuristic factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Rate margin by which rising or falling must dominate (fraction).
    pub trend_margin: f64,
    /// Entries considered by the recent-pattern factor.
    pub recent_window: usize,
    /// Class-rate margin inside the recent window (fraction).
    pub recent_margin: f64,
    /// Minimum log length for the recent-pattern factor.
    pub recent_min_entries: usize,
    /// Alternation rate (percent) above which a repeat is "due".
    pub alternation_high_pct: f64,
    /// Alternation rate (percent) below which momentum is assumed.
    pub alternation_low_pct: f64,
    /// Differences within ±dead zone classify as flat. 0 means strict sign.
    pub trend_dead_zone: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            trend_margin: 0.10,
            recent_window: 10,
            recent_margin: 0.10,
            recent_min_entries: 3,
            alternation_high_pct: 60.0,
            alternation_low_pct: 30.0,
            trend_dead_zone: 2,
        }
    }
}

/// Confidence score calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceParams {
    /// Log length at which the sample-size term would reach 100.
    pub full_sample_size: f64,
    /// Cap on the sample-size term.
    pub base_cap: f64,
    /// Trailing entries inspected for state consistency.
    pub consistency_window: usize,
    /// Points awarded when every trailing entry shares one state.
    pub consistency_max: f64,
    /// Points deducted per forecast step beyond the first.
    pub step_penalty: f64,
    /// Minimum log length for any forecast.
    pub min_entries: usize,
}

impl Default for ConfidenceParams {
    fn default() -> Self {
        ConfidenceParams {
            full_sample_size: 30.0,
            base_cap: 70.0,
            consistency_window: 5,
            consistency_max: 30.0,
            step_penalty: 5.0,
            min_entries: 3,
        }
    }
}

/// Narrative insight thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightParams {
    pub min_entries: usize,
    pub volatility_high_pct: f64,
    pub volatility_low_pct: f64,
    pub recent_window: usize,
    /// Count margin by which one class must lead inside the recent window.
    pub recent_dominance_margin: usize,
}

impl Default for InsightParams {
    fn default() -> Self {
        InsightParams {
            min_entries: 5,
            volatility_high_pct: 30.0,
            volatility_low_pct: 15.0,
            recent_window: 10,
            recent_dominance_margin: 2,
        }
    }
}
