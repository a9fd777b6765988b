//! Empirical state transition model.
//!
//! A transition is counted within a single observation, from the band of its
//! first value to the band of its second value.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::classify::StateBand;
use super::observation::Observation;

/// 4×4 count table indexed by (from, to) band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionMatrix {
    counts: [[u32; 4]; 4],
}

impl TransitionMatrix {
    pub fn count(&self, from: StateBand, to: StateBand) -> u32 {
        self.counts[from.index()][to.index()]
    }

    pub fn increment(&mut self, from: StateBand, to: StateBand) {
        let cell = &mut self.counts[from.index()][to.index()];
        *cell = cell.saturating_add(1);
    }

    pub fn row_total(&self, from: StateBand) -> u32 {
        self.counts[from.index()].iter().sum()
    }

    pub fn total(&self) -> u32 {
        StateBand::ALL.iter().map(|b| self.row_total(*b)).sum()
    }

    /// Nested map view, rows and columns in band order.
    pub fn to_map(&self) -> BTreeMap<StateBand, BTreeMap<StateBand, u32>> {
        StateBand::ALL
            .iter()
            .map(|from| {
                let row = StateBand::ALL
                    .iter()
                    .map(|to| (*to, self.count(*from, *to)))
                    .collect();
                (*from, row)
            })
            .collect()
    }
}

impl Serialize for TransitionMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map = self.to_map();
        let mut out = serializer.serialize_map(Some(map.len()))?;
        for (from, row) in &map {
            out.serialize_entry(from, row)?;
        }
        out.end()
    }
}

/// Conditional distribution over destination bands for one source band.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StateProbabilities {
    probs: [f64; 4],
}

impl StateProbabilities {
    pub fn get(&self, to: StateBand) -> f64 {
        self.probs[to.index()]
    }

    pub fn sum(&self) -> f64 {
        self.probs.iter().sum()
    }

    /// Probability of landing in any of `bands`.
    pub fn mass(&self, bands: &[StateBand]) -> f64 {
        bands.iter().map(|b| self.get(*b)).sum()
    }
}

impl Serialize for StateProbabilities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(4))?;
        for band in StateBand::ALL {
            out.serialize_entry(&band, &self.get(band))?;
        }
        out.end()
    }
}

/// Count every observation's (first_state, second_state) pair. O(n).
pub fn build_transition_matrix(log: &[Observation]) -> TransitionMatrix {
    let mut matrix = TransitionMatrix::default();
    for obs in log {
        matrix.increment(obs.first_state, obs.second_state);
    }
    matrix
}

/// Row-normalized probabilities for `from`. An unobserved row is all zeros.
pub fn transition_probabilities(matrix: &TransitionMatrix, from: StateBand) -> StateProbabilities {
    let total = matrix.row_total(from);
    let mut probs = [0.0; 4];
    if total > 0 {
        for to in StateBand::ALL {
            probs[to.index()] = f64::from(matrix.count(from, to)) / f64::from(total);
        }
    }
    StateProbabilities { probs }
}
