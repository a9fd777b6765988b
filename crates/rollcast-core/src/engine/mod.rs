//! Hybrid prediction engine.
//!
//! Data flows one way: the observation log feeds the classifier, the
//! transition model and the pattern metrics; those feed the factor bank,
//! whose scores are aggregated into a forecast. Every derived model is
//! recomputed from the log on each query and nothing here mutates it.

pub mod classify;
pub mod factors;
pub mod forecast;
pub mod insights;
pub mod metrics;
pub mod observation;
pub mod transition;

pub use classify::{
    classify_outcome, classify_state, classify_trend, in_range, OutcomeClass, StateBand, Trend,
    RANGE_MAX, RANGE_MIN, SMALL_MAX,
};
pub use factors::{evaluate, evaluate_all, FactorKind, FactorResult};
pub use forecast::{confidence, predict, predict_multi_step, Forecast};
pub use insights::insights;
pub use metrics::{
    alternation_rate, class_distribution, dispersion_stats, recent_entries, recent_window,
    state_distribution, trend_tally, ClassDistribution, DispersionStats, PatternMetrics,
    RecentWindow, StateDistribution, TrendTally,
};
pub use observation::{Observation, ObservationLog};
pub use transition::{
    build_transition_matrix, transition_probabilities, StateProbabilities, TransitionMatrix,
};
