//! The session: single owner of the observation log and engine config.
//!
//! Every analytical query is answered from a fresh pass over the current
//! log. Mutations either fully apply or leave the session untouched.

pub mod history;
pub mod transfer;

pub use history::{history, quick_stats, HistoryOrder, HistoryQuery, HistoryRow, QuickStats};
pub use transfer::{default_export_name, export_json, parse_import};

use chrono::{DateTime, Utc};
use rollcast_common::{ObservationId, Result};
use rollcast_config::EngineConfig;
use tracing::debug;

use crate::engine::{
    self, build_transition_matrix, Forecast, Observation, ObservationLog, PatternMetrics,
    TransitionMatrix,
};
use crate::store::LogStore;

#[derive(Debug, Clone, Default)]
pub struct Session {
    log: ObservationLog,
    config: EngineConfig,
}

impl Session {
    /// Empty session.
    pub fn new(config: EngineConfig) -> Self {
        Session {
            log: ObservationLog::new(),
            config,
        }
    }

    /// Adopt persisted entries. Trend and delta are recomputed under the
    /// configured dead zone; the other fields must already be consistent.
    pub fn from_entries(entries: Vec<Observation>, config: EngineConfig) -> Result<Self> {
        let dead_zone = config.thresholds.trend_dead_zone;
        let entries = entries
            .into_iter()
            .map(|o| o.with_trend_policy(dead_zone))
            .collect();
        Ok(Session {
            log: ObservationLog::from_entries(entries)?,
            config,
        })
    }

    /// Load the session from a store.
    pub fn open<S: LogStore + ?Sized>(store: &S, config: EngineConfig) -> Result<Self> {
        let entries = store.load()?;
        debug!(entries = entries.len(), "session opened");
        Self::from_entries(entries, config)
    }

    /// Persist the current log.
    pub fn save<S: LogStore + ?Sized>(&self, store: &S) -> Result<()> {
        store.save(self.log.entries())?;
        Ok(())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn log(&self) -> &ObservationLog {
        &self.log
    }

    /// Read-only view of the log in insertion order.
    pub fn snapshot(&self) -> &[Observation] {
        self.log.entries()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Validate and append a pair captured now.
    pub fn append(&mut self, first: i64, second: i64) -> Result<&Observation> {
        self.append_at(first, second, Utc::now())
    }

    pub fn append_at(&mut self, first: i64, second: i64, now: DateTime<Utc>) -> Result<&Observation> {
        let dead_zone = self.config.thresholds.trend_dead_zone;
        let obs = self.log.append(first, second, dead_zone, now)?;
        debug!(id = obs.id.0, first, second, "observation appended");
        Ok(obs)
    }

    /// Remove an entry. Returns whether anything was removed.
    pub fn remove(&mut self, id: ObservationId) -> bool {
        let removed = self.log.remove(id).is_some();
        debug!(id = id.0, removed, "remove requested");
        removed
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }

    /// Atomically replace the log with imported entries.
    pub fn replace(&mut self, entries: Vec<Observation>) -> Result<()> {
        let log = ObservationLog::from_entries(entries)?;
        self.log = log;
        Ok(())
    }

    /// Parse an exported document and replace the log with it.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let entries = parse_import(json, self.config.thresholds.trend_dead_zone)?;
        let count = entries.len();
        self.replace(entries)?;
        Ok(count)
    }

    pub fn export_json(&self) -> Result<String> {
        export_json(self.snapshot())
    }

    pub fn predict(&self, step: usize) -> Forecast {
        engine::predict(self.snapshot(), &self.config, step)
    }

    pub fn predict_multi_step(&self, steps: usize) -> Vec<Forecast> {
        engine::predict_multi_step(self.snapshot(), &self.config, steps)
    }

    pub fn transition_matrix(&self) -> TransitionMatrix {
        build_transition_matrix(self.snapshot())
    }

    pub fn metrics(&self) -> PatternMetrics {
        PatternMetrics::compute(self.snapshot(), self.config.insights.recent_window)
    }

    pub fn insights(&self) -> Vec<String> {
        engine::insights(self.snapshot(), &self.config)
    }

    pub fn history(&self, query: &HistoryQuery) -> Vec<HistoryRow> {
        history(self.snapshot(), query)
    }

    pub fn quick_stats(&self) -> QuickStats {
        quick_stats(self.snapshot())
    }

    /// Whether a forecast would fall back to the degenerate 50/50 answer.
    pub fn has_enough_data(&self) -> bool {
        self.len() >= self.config.confidence.min_entries.max(1)
    }
}
