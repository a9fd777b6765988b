//! JSON Schema generation for rollcast's JSON output types.
//!
//! Consumers of `-f json` output and of exported logs can validate or
//! generate bindings from these schemas.
//!
//! ```bash
//! rollcast schema --list
//! rollcast schema Forecast
//! rollcast schema --all
//! ```

use schemars::schema_for;
use serde_json::Value;
use std::collections::BTreeMap;

pub use crate::engine::{
    ClassDistribution, DispersionStats, FactorKind, FactorResult, Forecast, Observation,
    OutcomeClass, PatternMetrics, RecentWindow, StateBand, StateDistribution, Trend, TrendTally,
};
pub use crate::session::{HistoryOrder, HistoryRow, QuickStats};
pub use rollcast_common::ObservationId;

/// Schema type names with a one-line description, in listing order.
pub const SCHEMA_TYPES: &[(&str, &str)] = &[
    ("ObservationId", "Unique, creation-ordered observation identifier"),
    ("StateBand", "Value band (LOW, MID, HIGH, EXTREME)"),
    ("OutcomeClass", "Outcome class (K = 6-31, B = 32-54)"),
    ("Trend", "Direction from first to second value"),
    ("Observation", "One recorded pair with derived fields; element of an export"),
    ("FactorKind", "Forecast factor identifier"),
    ("FactorResult", "Scores and rationale of one factor"),
    ("Forecast", "Class percentages, confidence and factor breakdown"),
    ("TrendTally", "Counts of rising, falling and flat entries"),
    ("StateDistribution", "Entries per second-value band"),
    ("ClassDistribution", "Entries per outcome class"),
    ("RecentWindow", "Class counts over the most recent entries"),
    ("DispersionStats", "Spread of recorded values"),
    ("PatternMetrics", "Full pattern metrics bundle"),
    ("HistoryOrder", "Listing order"),
    ("HistoryRow", "Ranked row of a history listing"),
    ("QuickStats", "Status summary"),
];

/// Schema type names accepted by [`generate_schema`].
pub fn schema_names() -> Vec<&'static str> {
    SCHEMA_TYPES.iter().map(|(name, _)| *name).collect()
}

/// Generate the JSON Schema for a type by name, or `None` if it is unknown.
pub fn generate_schema(type_name: &str) -> Option<Value> {
    let schema = match type_name {
        "ObservationId" => schema_for!(ObservationId),
        "StateBand" => schema_for!(StateBand),
        "OutcomeClass" => schema_for!(OutcomeClass),
        "Trend" => schema_for!(Trend),
        "Observation" => schema_for!(Observation),
        "FactorKind" => schema_for!(FactorKind),
        "FactorResult" => schema_for!(FactorResult),
        "Forecast" => schema_for!(Forecast),
        "TrendTally" => schema_for!(TrendTally),
        "StateDistribution" => schema_for!(StateDistribution),
        "ClassDistribution" => schema_for!(ClassDistribution),
        "RecentWindow" => schema_for!(RecentWindow),
        "DispersionStats" => schema_for!(DispersionStats),
        "PatternMetrics" => schema_for!(PatternMetrics),
        "HistoryOrder" => schema_for!(HistoryOrder),
        "HistoryRow" => schema_for!(HistoryRow),
        "QuickStats" => schema_for!(QuickStats),
        _ => return None,
    };
    Some(schema.to_value())
}

/// Every schema keyed by type name.
pub fn generate_all_schemas() -> BTreeMap<String, Value> {
    SCHEMA_TYPES
        .iter()
        .filter_map(|(name, _)| generate_schema(name).map(|s| (name.to_string(), s)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_schema_generates() {
        for (name, _) in SCHEMA_TYPES {
            assert!(generate_schema(name).is_some(), "{name}");
        }
        assert_eq!(generate_all_schemas().len(), SCHEMA_TYPES.len());
    }

    #[test]
    fn unknown_schema_is_none() {
        assert!(generate_schema("Plan").is_none());
        assert!(generate_schema("").is_none());
    }

    #[test]
    fn forecast_schema_lists_its_fields() {
        let schema = generate_schema("Forecast").unwrap();
        let props = schema["properties"].as_object().unwrap();
        for field in ["step", "small_pct", "big_pct", "confidence_pct", "factors"] {
            assert!(props.contains_key(field), "{field}");
        }
    }

    #[test]
    fn observation_id_is_an_integer() {
        let schema = generate_schema("ObservationId").unwrap();
        assert_eq!(schema["type"], "integer");
    }
}
