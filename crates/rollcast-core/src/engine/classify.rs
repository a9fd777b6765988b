//! State, class, and trend classification of raw roll values.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Smallest valid roll value.
pub const RANGE_MIN: i64 = 6;
/// Largest valid roll value.
pub const RANGE_MAX: i64 = 54;
/// Largest value of the small (K) class. Values above it are big (B).
pub const SMALL_MAX: i64 = 31;

/// Discrete value band. Variant order is the band order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum StateBand {
    Low,
    Mid,
    High,
    Extreme,
}

impl StateBand {
    pub const ALL: [StateBand; 4] = [
        StateBand::Low,
        StateBand::Mid,
        StateBand::High,
        StateBand::Extreme,
    ];

    /// Row/column position in a transition table.
    pub fn index(self) -> usize {
        match self {
            StateBand::Low => 0,
            StateBand::Mid => 1,
            StateBand::High => 2,
            StateBand::Extreme => 3,
        }
    }

    /// Inclusive value bounds of this band.
    pub fn bounds(self) -> (i64, i64) {
        match self {
            StateBand::Low => (6, 18),
            StateBand::Mid => (19, 31),
            StateBand::High => (32, 43),
            StateBand::Extreme => (44, 54),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StateBand::Low => "LOW",
            StateBand::Mid => "MID",
            StateBand::High => "HIGH",
            StateBand::Extreme => "EXTREME",
        }
    }

    /// The outcome class every value of this band falls into.
    pub fn outcome_class(self) -> OutcomeClass {
        match self {
            StateBand::Low | StateBand::Mid => OutcomeClass::Small,
            StateBand::High | StateBand::Extreme => OutcomeClass::Big,
        }
    }
}

impl std::fmt::Display for StateBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary outcome class being forecast.
///
/// `Small` is class A (values 6..=31, label "K"), `Big` is class B
/// (values 32..=54, label "B"). The halves are deliberately unequal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum OutcomeClass {
    #[serde(rename = "K")]
    Small,
    #[serde(rename = "B")]
    Big,
}

impl OutcomeClass {
    pub fn label(self) -> &'static str {
        match self {
            OutcomeClass::Small => "K",
            OutcomeClass::Big => "B",
        }
    }

    pub fn opposite(self) -> OutcomeClass {
        match self {
            OutcomeClass::Small => OutcomeClass::Big,
            OutcomeClass::Big => OutcomeClass::Small,
        }
    }
}

impl std::fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction of movement from the first to the second value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Flat,
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Rising => "rising",
            Trend::Falling => "falling",
            Trend::Flat => "flat",
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Rising => "↑",
            Trend::Falling => "↓",
            Trend::Flat => "→",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `value` lies in `[RANGE_MIN, RANGE_MAX]`.
pub fn in_range(value: i64) -> bool {
    (RANGE_MIN..=RANGE_MAX).contains(&value)
}

/// Band of `value`, or `None` outside the valid range.
pub fn classify_state(value: i64) -> Option<StateBand> {
    StateBand::ALL.into_iter().find(|band| {
        let (lo, hi) = band.bounds();
        (lo..=hi).contains(&value)
    })
}

/// Outcome class of `value`, or `None` outside the valid range.
pub fn classify_outcome(value: i64) -> Option<OutcomeClass> {
    if !in_range(value) {
        return None;
    }
    if value <= SMALL_MAX {
        Some(OutcomeClass::Small)
    } else {
        Some(OutcomeClass::Big)
    }
}

/// Trend of a pair. Differences within `±dead_zone` are flat, so a dead
/// zone of 0 classifies by strict sign.
pub fn classify_trend(first: i64, second: i64, dead_zone: i64) -> Trend {
    let diff = second - first;
    if diff > dead_zone {
        Trend::Rising
    } else if diff < -dead_zone {
        Trend::Falling
    } else {
        Trend::Flat
    }
}
