//! Observation identity types.
//!
//! Every observation carries an id that is unique within its log and strictly
//! increasing in creation order. Ids survive deletion of other entries and
//! round-trip verbatim through export and import.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a single observation.
///
/// Ids are seeded from the capture clock (milliseconds since the Unix epoch)
/// and bumped past the previous id whenever the clock would not advance, so
/// two entries captured in the same millisecond still get distinct ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct ObservationId(pub u64);

impl ObservationId {
    /// Allocate the id following `last` for an entry captured at `now_millis`.
    ///
    /// Returns `None` when `last` is already `u64::MAX` and the clock cannot
    /// move past it.
    pub fn next_after(last: Option<ObservationId>, now_millis: u64) -> Option<Self> {
        match last {
            Some(prev) if now_millis <= prev.0 => prev.0.checked_add(1).map(ObservationId),
            _ => Some(ObservationId(now_millis)),
        }
    }

    /// Parse an id from its decimal representation.
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<u64>().ok().map(ObservationId)
    }
}

impl fmt::Display for ObservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ObservationId {
    fn from(id: u64) -> Self {
        ObservationId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_after_uses_clock_when_it_advances() {
        let id = ObservationId::next_after(Some(ObservationId(100)), 250);
        assert_eq!(id, Some(ObservationId(250)));
    }

    #[test]
    fn test_next_after_bumps_when_clock_stalls() {
        assert_eq!(
            ObservationId::next_after(Some(ObservationId(100)), 100),
            Some(ObservationId(101))
        );
        // Clock moved backwards.
        assert_eq!(
            ObservationId::next_after(Some(ObservationId(100)), 40),
            Some(ObservationId(101))
        );
    }

    #[test]
    fn test_next_after_empty_log() {
        assert_eq!(ObservationId::next_after(None, 7), Some(ObservationId(7)));
    }

    #[test]
    fn test_next_after_max_id_is_exhausted() {
        assert_eq!(ObservationId::next_after(Some(ObservationId(u64::MAX)), 5), None);
        assert_eq!(
            ObservationId::next_after(Some(ObservationId(u64::MAX)), u64::MAX),
            None
        );
        assert_eq!(
            ObservationId::next_after(Some(ObservationId(u64::MAX - 1)), 0),
            Some(ObservationId(u64::MAX))
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(ObservationId::parse("42"), Some(ObservationId(42)));
        assert_eq!(ObservationId::parse(" 42 "), Some(ObservationId(42)));
        assert_eq!(ObservationId::parse("-1"), None);
        assert_eq!(ObservationId::parse("abc"), None);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&ObservationId(1_700_000_000_000)).unwrap();
        assert_eq!(json, "1700000000000");
        let back: ObservationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ObservationId(1_700_000_000_000));
    }
}
