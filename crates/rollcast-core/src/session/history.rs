//! Display-ready history listing and quick statistics.

use rollcast_math::{round_to, share_pct};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine::{trend_tally, Observation, OutcomeClass, StateBand, Trend};

/// Listing order for [`history`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Options for a history listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    pub order: HistoryOrder,
    /// Case-insensitive substring filter.
    pub search: Option<String>,
    /// Maximum number of rows returned after filtering.
    pub limit: Option<usize>,
}

impl HistoryQuery {
    pub fn oldest_first(mut self) -> Self {
        self.order = HistoryOrder::OldestFirst;
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }
}

/// One row of a history listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HistoryRow {
    /// 1 for the newest entry of the log, `len` for the oldest.
    pub rank: usize,
    pub observation: Observation,
}

/// Text the search filter is matched against.
pub fn search_text(obs: &Observation) -> String {
    format!(
        "{} {} {} {}",
        obs.first_value, obs.second_value, obs.outcome_class, obs.second_state
    )
    .to_lowercase()
}

/// List the log for display. Ranks are computed against the whole log, so
/// a filtered row keeps the rank it has in the unfiltered listing.
pub fn history(log: &[Observation], query: &HistoryQuery) -> Vec<HistoryRow> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let len = log.len();

    let mut rows: Vec<HistoryRow> = log
        .iter()
        .enumerate()
        .filter(|(_, obs)| match &needle {
            Some(n) => search_text(obs).contains(n.as_str()),
            None => true,
        })
        .map(|(index, obs)| HistoryRow {
            rank: len - index,
            observation: obs.clone(),
        })
        .collect();

    if query.order == HistoryOrder::NewestFirst {
        rows.reverse();
    }
    if let Some(limit) = query.limit {
        rows.truncate(limit);
    }
    rows
}

/// Headline numbers for a status line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuickStats {
    pub total: usize,
    /// Share of class A ("K") entries in percent, one decimal. None when empty.
    pub small_share_pct: Option<f64>,
    pub last_trend: Option<Trend>,
    pub last_state: Option<StateBand>,
    pub last_class: Option<OutcomeClass>,
    pub rising_pct: f64,
    pub falling_pct: f64,
    pub flat_pct: f64,
}

pub fn quick_stats(log: &[Observation]) -> QuickStats {
    let total = log.len();
    let small = log
        .iter()
        .filter(|o| o.outcome_class == OutcomeClass::Small)
        .count();
    let tally = trend_tally(log);
    let last = log.last();

    QuickStats {
        total,
        small_share_pct: (total > 0).then(|| round_to(share_pct(small, total), 1)),
        last_trend: last.map(|o| o.trend),
        last_state: last.map(|o| o.second_state),
        last_class: last.map(|o| o.outcome_class),
        rising_pct: round_to(share_pct(tally.rising, total), 1),
        falling_pct: round_to(share_pct(tally.falling, total), 1),
        flat_pct: round_to(share_pct(tally.flat, total), 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::log_of;

    fn sample() -> Vec<Observation> {
        log_of(&[(10, 20), (15, 45), (50, 8), (30, 31)])
    }

    #[test]
    fn newest_first_by_default() {
        let rows = history(&sample(), &HistoryQuery::default());
        let ranks: Vec<usize> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert_eq!(rows[0].observation.second_value, 31);
    }

    #[test]
    fn oldest_first_reverses() {
        let rows = history(&sample(), &HistoryQuery::default().oldest_first());
        let ranks: Vec<usize> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![4, 3, 2, 1]);
        assert_eq!(rows[0].observation.first_value, 10);
    }

    #[test]
    fn search_matches_state_and_class_case_insensitively() {
        let rows = history(&sample(), &HistoryQuery::default().search("extreme"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].observation.second_value, 45);
        assert_eq!(rows[0].rank, 3);

        let rows = history(&sample(), &HistoryQuery::default().search(" b "));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn search_matches_values() {
        let rows = history(&sample(), &HistoryQuery::default().search("50 8"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].observation.first_value, 50);
    }

    #[test]
    fn blank_search_is_ignored() {
        let rows = history(&sample(), &HistoryQuery::default().search("   "));
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn limit_applies_after_ordering() {
        let rows = history(&sample(), &HistoryQuery::default().limit(2));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].rank, 2);
    }

    #[test]
    fn quick_stats_empty() {
        let stats = quick_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.small_share_pct, None);
        assert_eq!(stats.last_state, None);
        assert_eq!(stats.rising_pct, 0.0);
    }

    #[test]
    fn quick_stats_sample() {
        let stats = quick_stats(&sample());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.small_share_pct, Some(75.0));
        assert_eq!(stats.last_trend, Some(Trend::Flat));
        assert_eq!(stats.last_state, Some(StateBand::Mid));
        assert_eq!(stats.rising_pct, 50.0);
        assert_eq!(stats.falling_pct, 25.0);
        assert_eq!(stats.flat_pct, 25.0);
    }
}
