//! The six weighted heuristic factors.
//!
//! Each factor scores both outcome classes on an unnormalized scale bounded
//! by its configured weight and explains itself in a one-line rationale.
//! A factor whose minimum-data precondition is unmet scores zero for both
//! classes instead of failing.

use rollcast_config::{EngineConfig, FactorWeights};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::classify::{OutcomeClass, StateBand, RANGE_MAX, RANGE_MIN};
use super::metrics::{alternation_rate, recent_window, trend_tally};
use super::observation::Observation;
use super::transition::{build_transition_matrix, transition_probabilities};

/// Factor identity. Variant order is evaluation and display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    NumericTrend,
    CurrentState,
    MarkovTransition,
    DistanceFromCenter,
    RecentPattern,
    Alternation,
}

impl FactorKind {
    pub const ALL: [FactorKind; 6] = [
        FactorKind::NumericTrend,
        FactorKind::CurrentState,
        FactorKind::MarkovTransition,
        FactorKind::DistanceFromCenter,
        FactorKind::RecentPattern,
        FactorKind::Alternation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FactorKind::NumericTrend => "Numeric trend",
            FactorKind::CurrentState => "Current state",
            FactorKind::MarkovTransition => "Markov transition",
            FactorKind::DistanceFromCenter => "Distance from center",
            FactorKind::RecentPattern => "Recent pattern",
            FactorKind::Alternation => "Alternation index",
        }
    }

    pub fn weight(self, weights: &FactorWeights) -> f64 {
        match self {
            FactorKind::NumericTrend => weights.numeric_trend,
            FactorKind::CurrentState => weights.current_state,
            FactorKind::MarkovTransition => weights.markov_transition,
            FactorKind::DistanceFromCenter => weights.distance_from_center,
            FactorKind::RecentPattern => weights.recent_pattern,
            FactorKind::Alternation => weights.alternation,
        }
    }

    /// Minimum log length below which the factor abstains.
    pub fn min_entries(self, config: &EngineConfig) -> usize {
        match self {
            FactorKind::NumericTrend
            | FactorKind::CurrentState
            | FactorKind::DistanceFromCenter => 1,
            FactorKind::MarkovTransition | FactorKind::Alternation => 2,
            FactorKind::RecentPattern => config.thresholds.recent_min_entries,
        }
    }
}

impl std::fmt::Display for FactorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Scores of one factor for both classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FactorResult {
    pub kind: FactorKind,
    /// Maximum combined score this factor can award.
    pub weight: f64,
    /// Score toward class A (small, "K").
    pub small_score: f64,
    /// Score toward class B (big, "B").
    pub big_score: f64,
    pub rationale: String,
}

impl FactorResult {
    fn scored(kind: FactorKind, weight: f64, small: f64, big: f64, rationale: String) -> Self {
        FactorResult {
            kind,
            weight,
            small_score: small,
            big_score: big,
            rationale,
        }
    }

    fn award(kind: FactorKind, weight: f64, to: OutcomeClass, rationale: String) -> Self {
        match to {
            OutcomeClass::Small => Self::scored(kind, weight, weight, 0.0, rationale),
            OutcomeClass::Big => Self::scored(kind, weight, 0.0, weight, rationale),
        }
    }

    fn even(kind: FactorKind, weight: f64, rationale: String) -> Self {
        Self::scored(kind, weight, weight / 2.0, weight / 2.0, rationale)
    }

    fn abstain(kind: FactorKind, weight: f64, needed: usize) -> Self {
        Self::scored(
            kind,
            weight,
            0.0,
            0.0,
            format!("Insufficient data (needs at least {} entries)", needed),
        )
    }

    /// Class this factor leans toward, if any.
    pub fn favored(&self) -> Option<OutcomeClass> {
        if self.small_score > self.big_score {
            Some(OutcomeClass::Small)
        } else if self.big_score > self.small_score {
            Some(OutcomeClass::Big)
        } else {
            None
        }
    }
}

/// Evaluate a single factor against the log.
pub fn evaluate(kind: FactorKind, log: &[Observation], config: &EngineConfig) -> FactorResult {
    let weight = kind.weight(&config.weights);
    let needed = kind.min_entries(config);
    let last = match log.last() {
        Some(last) if log.len() >= needed => last,
        _ => return FactorResult::abstain(kind, weight, needed.max(1)),
    };

    match kind {
        FactorKind::NumericTrend => numeric_trend(log, weight, config),
        FactorKind::CurrentState => current_state(last, weight, config),
        FactorKind::MarkovTransition => markov_transition(log, last, weight),
        FactorKind::DistanceFromCenter => distance_from_center(last, weight),
        FactorKind::RecentPattern => recent_pattern(log, weight, config),
        FactorKind::Alternation => alternation(log, last, weight, config),
    }
}

/// Evaluate all six factors in order.
pub fn evaluate_all(log: &[Observation], config: &EngineConfig) -> Vec<FactorResult> {
    FactorKind::ALL
        .iter()
        .map(|kind| evaluate(*kind, log, config))
        .collect()
}

fn pct(rate: f64) -> String {
    format!("{:.0}%", rate * 100.0)
}

/// Falling momentum favors small, rising momentum favors big.
fn numeric_trend(log: &[Observation], weight: f64, config: &EngineConfig) -> FactorResult {
    let kind = FactorKind::NumericTrend;
    let tally = trend_tally(log);
    let up = tally.rising_rate();
    let down = tally.falling_rate();
    let margin = config.thresholds.trend_margin;

    if down > up + margin {
        FactorResult::award(
            kind,
            weight,
            OutcomeClass::Small,
            format!("Falling trend dominates: {}x ({})", tally.falling, pct(down)),
        )
    } else if up > down + margin {
        FactorResult::award(
            kind,
            weight,
            OutcomeClass::Big,
            format!("Rising trend dominates: {}x ({})", tally.rising, pct(up)),
        )
    } else {
        FactorResult::even(
            kind,
            weight,
            format!("Balanced trend (up:down = {}:{})", tally.rising, tally.falling),
        )
    }
}

fn current_state(last: &Observation, weight: f64, config: &EngineConfig) -> FactorResult {
    let split = &config.current_state_split;
    let (share, note) = match last.second_state {
        StateBand::Low => (split.low, "small dominates"),
        StateBand::Mid => (split.mid, "transition zone"),
        StateBand::High => (split.high, "big dominates"),
        StateBand::Extreme => (split.extreme, "big zone"),
    };
    FactorResult::scored(
        FactorKind::CurrentState,
        weight,
        share * weight,
        (1.0 - share) * weight,
        format!("Last state {} → {}", last.second_state, note),
    )
}

fn markov_transition(log: &[Observation], last: &Observation, weight: f64) -> FactorResult {
    let matrix = build_transition_matrix(log);
    let probs = transition_probabilities(&matrix, last.second_state);
    let small = probs.mass(&[StateBand::Low, StateBand::Mid]);
    let big = probs.mass(&[StateBand::High, StateBand::Extreme]);
    FactorResult::scored(
        FactorKind::MarkovTransition,
        weight,
        small * weight,
        big * weight,
        format!(
            "Transitions from {}: K={}, B={}",
            last.second_state,
            pct(small),
            pct(big)
        ),
    )
}

/// Center and half-width of the value range (30 and 24).
const CENTER: i64 = (RANGE_MIN + RANGE_MAX) / 2;
const MAX_DISTANCE: i64 = (RANGE_MAX - RANGE_MIN) / 2;

fn distance_from_center(last: &Observation, weight: f64) -> FactorResult {
    let value = last.second_value;
    let distance = (value - CENTER).abs();
    let ratio = (distance as f64 / MAX_DISTANCE as f64).min(1.0);
    let (to, side) = if value < CENTER {
        (OutcomeClass::Small, "small")
    } else {
        (OutcomeClass::Big, "big")
    };
    let rationale = format!(
        "Value {} leans {} (distance {} from center {})",
        value, side, distance, CENTER
    );
    match to {
        OutcomeClass::Small => {
            FactorResult::scored(FactorKind::DistanceFromCenter, weight, ratio * weight, 0.0, rationale)
        }
        OutcomeClass::Big => {
            FactorResult::scored(FactorKind::DistanceFromCenter, weight, 0.0, ratio * weight, rationale)
        }
    }
}

/// Mean reversion: a class that dominated recently is expected to give way.
fn recent_pattern(log: &[Observation], weight: f64, config: &EngineConfig) -> FactorResult {
    let kind = FactorKind::RecentPattern;
    let size = config.thresholds.recent_window.min(log.len());
    let window = recent_window(log, size);
    let small_rate = rollcast_math::share(window.small_count, window.entries);
    let big_rate = rollcast_math::share(window.big_count, window.entries);
    let margin = config.thresholds.recent_margin;

    if small_rate > big_rate + margin {
        FactorResult::award(
            kind,
            weight,
            OutcomeClass::Big,
            format!(
                "Last {}: K dominates ({}/{}) → expect B (balancing)",
                size, window.small_count, window.entries
            ),
        )
    } else if big_rate > small_rate + margin {
        FactorResult::award(
            kind,
            weight,
            OutcomeClass::Small,
            format!(
                "Last {}: B dominates ({}/{}) → expect K (balancing)",
                size, window.big_count, window.entries
            ),
        )
    } else {
        FactorResult::even(
            kind,
            weight,
            format!(
                "Last {}: balanced (K:B = {}:{})",
                size, window.small_count, window.big_count
            ),
        )
    }
}

fn alternation(
    log: &[Observation],
    last: &Observation,
    weight: f64,
    config: &EngineConfig,
) -> FactorResult {
    let kind = FactorKind::Alternation;
    let rate = alternation_rate(log);
    let last_class = last.outcome_class;

    if rate > config.thresholds.alternation_high_pct {
        let expect = last_class.opposite();
        FactorResult::award(
            kind,
            weight,
            expect,
            format!(
                "High alternation ({:.0}%) after {} → expect {}",
                rate, last_class, expect
            ),
        )
    } else if rate < config.thresholds.alternation_low_pct {
        FactorResult::award(
            kind,
            weight,
            last_class,
            format!(
                "Low alternation ({:.0}%) with {} momentum → expect {} to continue",
                rate, last_class, last_class
            ),
        )
    } else {
        FactorResult::even(kind, weight, format!("Normal alternation ({:.0}%)", rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::log_of;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    fn eval(kind: FactorKind, pairs: &[(i64, i64)]) -> FactorResult {
        evaluate(kind, &log_of(pairs), &config())
    }

    #[test]
    fn every_factor_abstains_on_empty_log() {
        for result in evaluate_all(&[], &config()) {
            assert_eq!(result.small_score, 0.0);
            assert_eq!(result.big_score, 0.0);
            assert!(result.rationale.starts_with("Insufficient data"));
        }
    }

    #[test]
    fn numeric_trend_falling_favors_small() {
        let r = eval(FactorKind::NumericTrend, &[(40, 10), (30, 12), (20, 25)]);
        assert_eq!((r.small_score, r.big_score), (20.0, 0.0));
    }

    #[test]
    fn numeric_trend_rising_favors_big() {
        let r = eval(FactorKind::NumericTrend, &[(10, 40), (12, 30), (25, 20)]);
        assert_eq!((r.small_score, r.big_score), (0.0, 20.0));
    }

    #[test]
    fn numeric_trend_within_margin_splits() {
        let r = eval(FactorKind::NumericTrend, &[(10, 40), (40, 10), (10, 11)]);
        assert_eq!((r.small_score, r.big_score), (10.0, 10.0));
    }

    #[test]
    fn current_state_reference_splits() {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        let cases = [(10, 25.0, 0.0), (25, 12.0, 13.0), (40, 3.0, 22.0), (50, 0.0, 25.0)];
        for (value, small, big) in cases {
            let r = eval(FactorKind::CurrentState, &[(20, value)]);
            assert!(close(r.small_score, small), "{value}: {}", r.small_score);
            assert!(close(r.big_score, big), "{value}: {}", r.big_score);
        }
    }

    #[test]
    fn current_state_is_monotonic() {
        let small: Vec<f64> = [10, 25, 40, 50]
            .iter()
            .map(|v| eval(FactorKind::CurrentState, &[(20, *v)]).small_score)
            .collect();
        assert!(small.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn markov_needs_two_entries() {
        let r = eval(FactorKind::MarkovTransition, &[(10, 20)]);
        assert_eq!((r.small_score, r.big_score), (0.0, 0.0));
    }

    #[test]
    fn markov_uses_row_of_last_state() {
        // Last second state is MID; the MID row has one MID→EXTREME transition.
        let r = eval(FactorKind::MarkovTransition, &[(20, 50), (10, 20)]);
        assert_eq!((r.small_score, r.big_score), (0.0, 20.0));
    }

    #[test]
    fn markov_unobserved_row_scores_zero() {
        let r = eval(FactorKind::MarkovTransition, &[(10, 20), (10, 50)]);
        assert_eq!((r.small_score, r.big_score), (0.0, 0.0));
    }

    #[test]
    fn distance_from_center_scales() {
        let r = eval(FactorKind::DistanceFromCenter, &[(20, 6)]);
        assert_eq!((r.small_score, r.big_score), (15.0, 0.0));
        let r = eval(FactorKind::DistanceFromCenter, &[(20, 54)]);
        assert_eq!((r.small_score, r.big_score), (0.0, 15.0));
        let r = eval(FactorKind::DistanceFromCenter, &[(20, 42)]);
        assert_eq!((r.small_score, r.big_score), (0.0, 7.5));
        let r = eval(FactorKind::DistanceFromCenter, &[(20, 30)]);
        assert_eq!((r.small_score, r.big_score), (0.0, 0.0));
    }

    #[test]
    fn recent_pattern_needs_three_entries() {
        let r = eval(FactorKind::RecentPattern, &[(10, 20), (10, 20)]);
        assert_eq!((r.small_score, r.big_score), (0.0, 0.0));
        assert!(r.rationale.contains('3'));
    }

    #[test]
    fn recent_pattern_all_small_awards_big() {
        let pairs = [(10, 10), (12, 20), (14, 30), (16, 25), (18, 7)];
        let r = eval(FactorKind::RecentPattern, &pairs);
        assert_eq!((r.small_score, r.big_score), (0.0, 15.0));
    }

    #[test]
    fn recent_pattern_balanced_splits() {
        let r = eval(FactorKind::RecentPattern, &[(10, 10), (10, 40), (10, 10), (10, 40)]);
        assert_eq!((r.small_score, r.big_score), (7.5, 7.5));
    }

    #[test]
    fn recent_pattern_window_is_capped() {
        // Eleven big entries followed by ten small ones: the window sees only small.
        let mut pairs = vec![(10, 50); 11];
        pairs.extend(vec![(10, 10); 10]);
        let r = eval(FactorKind::RecentPattern, &pairs);
        assert_eq!((r.small_score, r.big_score), (0.0, 15.0));
    }

    #[test]
    fn alternation_high_expects_switch() {
        let r = eval(FactorKind::Alternation, &[(10, 10), (10, 40), (10, 10)]);
        assert_eq!((r.small_score, r.big_score), (0.0, 5.0));
    }

    #[test]
    fn alternation_low_expects_momentum() {
        let r = eval(FactorKind::Alternation, &[(10, 40), (10, 45), (10, 50)]);
        assert_eq!((r.small_score, r.big_score), (0.0, 5.0));
        let r = eval(FactorKind::Alternation, &[(10, 10), (10, 12), (10, 14)]);
        assert_eq!((r.small_score, r.big_score), (5.0, 0.0));
    }

    #[test]
    fn alternation_normal_splits() {
        // 1 change in 2 pairs = 50%.
        let r = eval(FactorKind::Alternation, &[(10, 10), (10, 12), (10, 40)]);
        assert_eq!((r.small_score, r.big_score), (2.5, 2.5));
    }

    #[test]
    fn scores_never_exceed_weight() {
        let pairs = [(10, 20), (15, 45), (50, 8), (30, 31), (44, 6), (6, 54)];
        for r in evaluate_all(&log_of(&pairs), &config()) {
            assert!(r.small_score + r.big_score <= r.weight + 1e-9, "{:?}", r);
            assert!(r.small_score >= 0.0 && r.big_score >= 0.0);
        }
    }

    #[test]
    fn favored_class() {
        let r = eval(FactorKind::DistanceFromCenter, &[(20, 6)]);
        assert_eq!(r.favored(), Some(OutcomeClass::Small));
        let r = eval(FactorKind::DistanceFromCenter, &[(20, 30)]);
        assert_eq!(r.favored(), None);
    }
}
