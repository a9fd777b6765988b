//! Secondary pattern statistics derived from the log.
//!
//! Every function is total over its input: an empty log yields zero counts
//! and zero statistics, never NaN.

use rollcast_math::{mean, share_pct, summarize};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::classify::{OutcomeClass, StateBand, Trend};
use super::observation::Observation;

/// Partition of the log by trend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrendTally {
    pub rising: usize,
    pub falling: usize,
    pub flat: usize,
}

impl TrendTally {
    pub fn total(&self) -> usize {
        self.rising + self.falling + self.flat
    }

    /// Rising share of all entries (flat included), 0 when empty.
    pub fn rising_rate(&self) -> f64 {
        rollcast_math::share(self.rising, self.total())
    }

    /// Falling share of all entries (flat included), 0 when empty.
    pub fn falling_rate(&self) -> f64 {
        rollcast_math::share(self.falling, self.total())
    }
}

pub fn trend_tally(log: &[Observation]) -> TrendTally {
    let mut tally = TrendTally::default();
    for obs in log {
        match obs.trend {
            Trend::Rising => tally.rising += 1,
            Trend::Falling => tally.falling += 1,
            Trend::Flat => tally.flat += 1,
        }
    }
    tally
}

/// Count of entries per `second_state`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StateDistribution {
    pub low: usize,
    pub mid: usize,
    pub high: usize,
    pub extreme: usize,
}

impl StateDistribution {
    pub fn get(&self, band: StateBand) -> usize {
        match band {
            StateBand::Low => self.low,
            StateBand::Mid => self.mid,
            StateBand::High => self.high,
            StateBand::Extreme => self.extreme,
        }
    }

    fn bump(&mut self, band: StateBand) {
        match band {
            StateBand::Low => self.low += 1,
            StateBand::Mid => self.mid += 1,
            StateBand::High => self.high += 1,
            StateBand::Extreme => self.extreme += 1,
        }
    }

    /// Most frequent band. Ties go to the later band.
    pub fn dominant(&self) -> (StateBand, usize) {
        StateBand::ALL
            .into_iter()
            .map(|b| (b, self.get(b)))
            .fold((StateBand::Low, self.low), |best, cur| {
                if best.1 > cur.1 {
                    best
                } else {
                    cur
                }
            })
    }
}

pub fn state_distribution(log: &[Observation]) -> StateDistribution {
    let mut dist = StateDistribution::default();
    for obs in log {
        dist.bump(obs.second_state);
    }
    dist
}

/// Count of entries per outcome class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClassDistribution {
    pub small: usize,
    pub big: usize,
}

impl ClassDistribution {
    pub fn total(&self) -> usize {
        self.small + self.big
    }

    pub fn get(&self, class: OutcomeClass) -> usize {
        match class {
            OutcomeClass::Small => self.small,
            OutcomeClass::Big => self.big,
        }
    }
}

pub fn class_distribution(log: &[Observation]) -> ClassDistribution {
    let small = log
        .iter()
        .filter(|o| o.outcome_class == OutcomeClass::Small)
        .count();
    ClassDistribution {
        small,
        big: log.len() - small,
    }
}

/// Summary of the most recent entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RecentWindow {
    pub entries: usize,
    pub small_count: usize,
    pub big_count: usize,
    pub last_state: Option<StateBand>,
    pub last_class: Option<OutcomeClass>,
    pub average_second_value: f64,
}

/// The last `window_size` entries, or fewer when the log is shorter.
pub fn recent_entries(log: &[Observation], window_size: usize) -> &[Observation] {
    &log[log.len().saturating_sub(window_size)..]
}

pub fn recent_window(log: &[Observation], window_size: usize) -> RecentWindow {
    let recent = recent_entries(log, window_size);
    let classes = class_distribution(recent);
    let seconds: Vec<f64> = recent.iter().map(|o| o.second_value as f64).collect();
    RecentWindow {
        entries: recent.len(),
        small_count: classes.small,
        big_count: classes.big,
        last_state: recent.last().map(|o| o.second_state),
        last_class: recent.last().map(|o| o.outcome_class),
        average_second_value: mean(&seconds),
    }
}

/// Percentage of adjacent pairs whose outcome class differs. 0 below two entries.
pub fn alternation_rate(log: &[Observation]) -> f64 {
    if log.len() < 2 {
        return 0.0;
    }
    let alternations = log
        .windows(2)
        .filter(|pair| pair[0].outcome_class != pair[1].outcome_class)
        .count();
    share_pct(alternations, log.len() - 1)
}

/// Value dispersion over the pooled first and second values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DispersionStats {
    pub count: usize,
    pub mean_first: f64,
    pub mean_second: f64,
    pub mean_abs_delta: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    /// Population standard deviation of the pooled values.
    pub std_dev: f64,
    /// `std_dev / pooled mean * 100`.
    pub volatility_pct: f64,
}

pub fn dispersion_stats(log: &[Observation]) -> DispersionStats {
    if log.is_empty() {
        return DispersionStats::default();
    }

    let firsts: Vec<f64> = log.iter().map(|o| o.first_value as f64).collect();
    let seconds: Vec<f64> = log.iter().map(|o| o.second_value as f64).collect();
    let deltas: Vec<f64> = log.iter().map(|o| o.abs_delta() as f64).collect();
    let pooled: Vec<f64> = firsts.iter().chain(seconds.iter()).copied().collect();
    let summary = summarize(&pooled);

    DispersionStats {
        count: log.len(),
        mean_first: mean(&firsts),
        mean_second: mean(&seconds),
        mean_abs_delta: mean(&deltas),
        min: summary.min,
        max: summary.max,
        median: summary.median,
        std_dev: summary.std_dev,
        volatility_pct: summary.cv_pct,
    }
}

/// All pattern metrics for one log snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PatternMetrics {
    pub trend: TrendTally,
    pub states: StateDistribution,
    pub classes: ClassDistribution,
    pub recent: RecentWindow,
    pub alternation_pct: f64,
    pub dispersion: DispersionStats,
}

impl PatternMetrics {
    pub fn compute(log: &[Observation], recent_window_size: usize) -> Self {
        PatternMetrics {
            trend: trend_tally(log),
            states: state_distribution(log),
            classes: class_distribution(log),
            recent: recent_window(log, recent_window_size),
            alternation_pct: alternation_rate(log),
            dispersion: dispersion_stats(log),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::log_of;

    #[test]
    fn empty_log_metrics_are_zero() {
        let m = PatternMetrics::compute(&[], 10);
        assert_eq!(m.trend.total(), 0);
        assert_eq!(m.classes.total(), 0);
        assert_eq!(m.recent.entries, 0);
        assert_eq!(m.recent.last_state, None);
        assert_eq!(m.recent.average_second_value, 0.0);
        assert_eq!(m.alternation_pct, 0.0);
        assert_eq!(m.dispersion, DispersionStats::default());
        assert!(!m.dispersion.volatility_pct.is_nan());
    }

    #[test]
    fn trend_tally_partitions_log() {
        let log = log_of(&[(10, 20), (20, 10), (10, 11), (30, 40)]);
        let t = trend_tally(&log);
        assert_eq!(t, TrendTally { rising: 2, falling: 1, flat: 1 });
        assert_eq!(t.rising_rate(), 0.5);
    }

    #[test]
    fn state_distribution_uses_second_value() {
        let log = log_of(&[(10, 20), (50, 20), (10, 50)]);
        let d = state_distribution(&log);
        assert_eq!(d.mid, 2);
        assert_eq!(d.extreme, 1);
        assert_eq!(d.low, 0);
        assert_eq!(d.dominant(), (StateBand::Mid, 2));
    }

    #[test]
    fn dominant_ties_go_to_later_band() {
        let log = log_of(&[(10, 10), (10, 50)]);
        assert_eq!(state_distribution(&log).dominant(), (StateBand::Extreme, 1));
    }

    #[test]
    fn recent_window_shorter_log() {
        let log = log_of(&[(10, 20), (15, 45)]);
        let w = recent_window(&log, 10);
        assert_eq!(w.entries, 2);
        assert_eq!(w.small_count, 1);
        assert_eq!(w.big_count, 1);
        assert_eq!(w.last_state, Some(StateBand::Extreme));
        assert_eq!(w.last_class, Some(OutcomeClass::Big));
        assert_eq!(w.average_second_value, 32.5);
    }

    #[test]
    fn recent_window_zero_size_is_empty() {
        let log = log_of(&[(10, 20), (15, 45)]);
        let w = recent_window(&log, 0);
        assert_eq!(w, RecentWindow::default());
    }

    #[test]
    fn alternation_rate_counts_class_changes() {
        let log = log_of(&[(10, 10), (10, 40), (10, 10), (10, 12)]);
        let rate = alternation_rate(&log);
        assert!((rate - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(alternation_rate(&log[..1]), 0.0);
    }

    #[test]
    fn all_small_log_never_alternates() {
        let log = log_of(&[(10, 10), (12, 20), (14, 30), (16, 25), (18, 7)]);
        assert_eq!(alternation_rate(&log), 0.0);
    }

    #[test]
    fn dispersion_over_pooled_values() {
        let log = log_of(&[(10, 20), (15, 45), (50, 8)]);
        let d = dispersion_stats(&log);
        assert_eq!(d.count, 3);
        assert_eq!(d.mean_first, 25.0);
        assert!((d.mean_second - 73.0 / 3.0).abs() < 1e-12);
        assert!((d.mean_abs_delta - 82.0 / 3.0).abs() < 1e-12);
        assert_eq!(d.min, 8.0);
        assert_eq!(d.max, 50.0);
        assert_eq!(d.median, 17.5);
        let pooled_mean = 148.0 / 6.0;
        assert!((d.volatility_pct - d.std_dev / pooled_mean * 100.0).abs() < 1e-9);
    }
}
