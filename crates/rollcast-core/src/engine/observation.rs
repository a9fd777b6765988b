//! Observations and the append-only observation log.

use chrono::{DateTime, Utc};
use rollcast_common::{Error, ObservationId, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::classify::{
    classify_outcome, classify_state, classify_trend, OutcomeClass, StateBand, Trend, RANGE_MAX,
    RANGE_MIN,
};

/// One recorded pair of rolls. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Observation {
    pub id: ObservationId,
    pub first_value: i64,
    pub second_value: i64,
    pub first_state: StateBand,
    pub second_state: StateBand,
    /// Derived from `second_value` only.
    pub outcome_class: OutcomeClass,
    pub trend: Trend,
    /// Signed difference `second_value - first_value`.
    pub delta: i64,
    /// Capture time. Display only.
    pub created_at: DateTime<Utc>,
}

fn check_value(field: &str, value: i64) -> Result<StateBand> {
    classify_state(value).ok_or_else(|| Error::ValueOutOfRange {
        field: field.to_string(),
        value,
        min: RANGE_MIN,
        max: RANGE_MAX,
    })
}

impl Observation {
    /// Build an observation, deriving states, class, trend and delta.
    pub fn new(
        id: ObservationId,
        first_value: i64,
        second_value: i64,
        trend_dead_zone: i64,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        let first_state = check_value("first", first_value)?;
        let second_state = check_value("second", second_value)?;
        let outcome_class = second_state.outcome_class();

        Ok(Observation {
            id,
            first_value,
            second_value,
            first_state,
            second_state,
            outcome_class,
            trend: classify_trend(first_value, second_value, trend_dead_zone),
            delta: second_value - first_value,
            created_at,
        })
    }

    pub fn abs_delta(&self) -> i64 {
        self.delta.abs()
    }

    /// Verify that the stored derived fields agree with the classifiers.
    ///
    /// Trend and delta are policy-dependent and are not checked here; see
    /// [`Observation::with_trend_policy`].
    pub fn check_consistency(&self) -> Result<()> {
        let inconsistent = |reason: String| Error::InconsistentRecord {
            id: self.id.0,
            reason,
        };

        let first_state = check_value("first", self.first_value)?;
        let second_state = check_value("second", self.second_value)?;

        if first_state != self.first_state {
            return Err(inconsistent(format!(
                "first_state is {} but {} classifies as {}",
                self.first_state, self.first_value, first_state
            )));
        }
        if second_state != self.second_state {
            return Err(inconsistent(format!(
                "second_state is {} but {} classifies as {}",
                self.second_state, self.second_value, second_state
            )));
        }
        if classify_outcome(self.second_value) != Some(self.outcome_class) {
            return Err(inconsistent(format!(
                "outcome_class is {} but {} classifies as {}",
                self.outcome_class,
                self.second_value,
                second_state.outcome_class()
            )));
        }
        Ok(())
    }

    /// Recompute trend and delta under the given dead zone.
    pub fn with_trend_policy(mut self, trend_dead_zone: i64) -> Self {
        self.trend = classify_trend(self.first_value, self.second_value, trend_dead_zone);
        self.delta = self.second_value - self.first_value;
        self
    }
}

/// Ordered, append-only sequence of observations.
///
/// Insertion order is chronological order. Removing an entry never changes
/// the ids of the survivors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationLog {
    entries: Vec<Observation>,
}

impl ObservationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a persisted sequence after checking id order and record
    /// consistency. Ids must strictly increase in insertion order. Nothing is
    /// adopted unless every record passes.
    pub fn from_entries(entries: Vec<Observation>) -> Result<Self> {
        let mut previous: Option<ObservationId> = None;
        for entry in &entries {
            match previous {
                Some(prev) if entry.id == prev => {
                    return Err(Error::DuplicateId { id: entry.id.0 });
                }
                Some(prev) if entry.id < prev => {
                    return Err(Error::IdOutOfOrder {
                        id: entry.id.0,
                        previous: prev.0,
                    });
                }
                _ => {}
            }
            entry.check_consistency()?;
            previous = Some(entry.id);
        }
        Ok(ObservationLog { entries })
    }

    pub fn entries(&self) -> &[Observation] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Observation> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.entries.last()
    }

    pub fn get(&self, id: ObservationId) -> Option<&Observation> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Append a validated pair captured at `now`.
    ///
    /// Fails with [`Error::IdSpaceExhausted`] once the newest id is
    /// `u64::MAX`.
    pub fn append(
        &mut self,
        first_value: i64,
        second_value: i64,
        trend_dead_zone: i64,
        now: DateTime<Utc>,
    ) -> Result<&Observation> {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let last = self.last().map(|e| e.id);
        let id = ObservationId::next_after(last, millis).ok_or(Error::IdSpaceExhausted {
            last: last.map_or(0, |id| id.0),
        })?;
        let observation = Observation::new(id, first_value, second_value, trend_dead_zone, now)?;
        self.entries.push(observation);
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Remove the entry with `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: ObservationId) -> Option<Observation> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
