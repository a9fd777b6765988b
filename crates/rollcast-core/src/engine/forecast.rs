//! Hybrid forecast: factor aggregation, normalization, confidence.

use rollcast_config::EngineConfig;
use rollcast_math::{complementary_pct, round_half_up};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::classify::OutcomeClass;
use super::factors::{evaluate_all, FactorResult};
use super::metrics::{recent_entries, state_distribution};
use super::observation::Observation;

/// Forecast of the next observation's outcome class.
///
/// `small_pct + big_pct == 100` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Forecast {
    /// Horizon offset, 1 for the next observation.
    pub step: usize,
    /// Probability (percent) of class A, "K".
    pub small_pct: u8,
    /// Probability (percent) of class B, "B".
    pub big_pct: u8,
    pub confidence_pct: u8,
    /// Factor breakdown in evaluation order. Empty for the degenerate forecast.
    pub factors: Vec<FactorResult>,
}

impl Forecast {
    /// The 50/50 zero-confidence forecast returned when data is insufficient.
    pub fn degenerate(step: usize) -> Self {
        Forecast {
            step,
            small_pct: 50,
            big_pct: 50,
            confidence_pct: 0,
            factors: Vec::new(),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.factors.is_empty()
    }

    /// Class with the higher probability; `None` on an even split.
    pub fn favored(&self) -> Option<OutcomeClass> {
        match self.small_pct.cmp(&self.big_pct) {
            std::cmp::Ordering::Greater => Some(OutcomeClass::Small),
            std::cmp::Ordering::Less => Some(OutcomeClass::Big),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn pct(&self, class: OutcomeClass) -> u8 {
        match class {
            OutcomeClass::Small => self.small_pct,
            OutcomeClass::Big => self.big_pct,
        }
    }
}

/// Confidence in percent for a forecast `step` positions ahead.
///
/// The sample-size term grows linearly to `base_cap`; the consistency term
/// rewards a dominant state among the trailing window; every step past the
/// first costs `step_penalty` points. Floored at 0.
pub fn confidence(log: &[Observation], config: &EngineConfig, step: usize) -> u8 {
    let params = &config.confidence;
    let n = log.len() as f64;

    let base = if params.full_sample_size > 0.0 {
        (n / params.full_sample_size * 100.0).min(params.base_cap)
    } else {
        params.base_cap
    };

    let window = params.consistency_window;
    let consistency = if window > 0 && log.len() >= window {
        let (_, max_freq) = state_distribution(recent_entries(log, window)).dominant();
        max_freq as f64 / window as f64 * params.consistency_max
    } else {
        0.0
    };

    let penalty = step.saturating_sub(1) as f64 * params.step_penalty;
    let raw = (base + consistency - penalty).max(0.0);
    trace!(base, consistency, penalty, "confidence terms");
    round_half_up(raw).clamp(0.0, 100.0) as u8
}

/// Forecast the outcome class `step` positions ahead.
///
/// The probabilities do not depend on `step`; only confidence is discounted.
pub fn predict(log: &[Observation], config: &EngineConfig, step: usize) -> Forecast {
    let step = step.max(1);
    if log.len() < config.confidence.min_entries.max(1) {
        debug!(entries = log.len(), step, "insufficient data for forecast");
        return Forecast::degenerate(step);
    }

    let factors = evaluate_all(log, config);
    let (mut small_total, mut big_total) = (0.0, 0.0);
    for factor in &factors {
        trace!(
            factor = %factor.kind,
            small = factor.small_score,
            big = factor.big_score,
            "factor scored"
        );
        small_total += factor.small_score;
        big_total += factor.big_score;
    }

    let (small_pct, big_pct) = complementary_pct(small_total, big_total);
    let confidence_pct = confidence(log, config, step);
    debug!(
        entries = log.len(),
        step,
        small_total,
        big_total,
        small_pct,
        big_pct,
        confidence_pct,
        "forecast aggregated"
    );

    Forecast {
        step,
        small_pct,
        big_pct,
        confidence_pct,
        factors,
    }
}

/// One forecast per horizon `1..=steps`, each computed from the same log.
pub fn predict_multi_step(log: &[Observation], config: &EngineConfig, steps: usize) -> Vec<Forecast> {
    (1..=steps).map(|step| predict(log, config, step)).collect()
}
