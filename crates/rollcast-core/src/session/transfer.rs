//! Import and export of the observation log as a JSON array.

use chrono::NaiveDate;
use rollcast_common::{Error, Result};

use crate::engine::{Observation, ObservationLog};

/// Parse an exported log.
///
/// The document must be a JSON array of complete observation records. Every
/// record is checked for range and classifier consistency, ids must strictly
/// increase in document order, and trend and delta are recomputed under `trend_dead_zone`.
/// Nothing is returned unless every record passes.
pub fn parse_import(json: &str, trend_dead_zone: i64) -> Result<Vec<Observation>> {
    let doc: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| Error::MalformedImport(format!("invalid JSON: {}", e)))?;

    let serde_json::Value::Array(items) = doc else {
        return Err(Error::MalformedImport(
            "expected a JSON array of observation records".to_string(),
        ));
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let record: Observation = serde_json::from_value(item)
            .map_err(|e| Error::MalformedImport(format!("record {}: {}", index, e)))?;
        records.push(record.with_trend_policy(trend_dead_zone));
    }

    Ok(ObservationLog::from_entries(records)?.into_entries())
}

/// Pretty-printed JSON array of the log, as accepted by [`parse_import`].
pub fn export_json(entries: &[Observation]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Default export file name for `date`, e.g. `rollcast-2026-10-18.json`.
pub fn default_export_name(date: NaiveDate) -> String {
    format!("rollcast-{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::log_of;
    use crate::engine::Trend;

    #[test]
    fn export_then_import_preserves_log() {
        let entries = log_of(&[(10, 20), (15, 45), (50, 8)]);
        let json = export_json(&entries).unwrap();
        assert_eq!(parse_import(&json, 2).unwrap(), entries);
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_import("[]", 2).unwrap().is_empty());
    }

    #[test]
    fn non_array_is_rejected() {
        let err = parse_import(r#"{"entries": []}"#, 2).unwrap_err();
        assert!(matches!(err, Error::MalformedImport(_)));
        let err = parse_import("not json", 2).unwrap_err();
        assert!(matches!(err, Error::MalformedImport(_)));
    }

    #[test]
    fn missing_field_is_rejected() {
        let err = parse_import(r#"[{"id": 1, "first_value": 10}]"#, 2).unwrap_err();
        match err {
            Error::MalformedImport(msg) => assert!(msg.starts_with("record 0")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn out_of_range_value_is_rejected() {
        let mut entries = log_of(&[(10, 20)]);
        entries[0].second_value = 99;
        let json = export_json(&entries).unwrap();
        assert!(matches!(
            parse_import(&json, 2).unwrap_err(),
            Error::ValueOutOfRange { value: 99, .. }
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut entries = log_of(&[(10, 20), (30, 40)]);
        entries[1].id = entries[0].id;
        let json = export_json(&entries).unwrap();
        assert!(matches!(
            parse_import(&json, 2).unwrap_err(),
            Error::DuplicateId { .. }
        ));
    }

    #[test]
    fn decreasing_ids_are_rejected() {
        let mut entries = log_of(&[(10, 20), (30, 40)]);
        entries.swap(0, 1);
        let (newer, older) = (entries[0].id.0, entries[1].id.0);
        let json = export_json(&entries).unwrap();
        assert!(matches!(
            parse_import(&json, 2).unwrap_err(),
            Error::IdOutOfOrder { id, previous } if id == older && previous == newer
        ));
    }

    #[test]
    fn trend_is_recomputed_under_active_policy() {
        let mut entries = log_of(&[(10, 11)]);
        entries[0].trend = Trend::Falling;
        entries[0].delta = 40;
        let json = export_json(&entries).unwrap();

        let imported = parse_import(&json, 2).unwrap();
        assert_eq!(imported[0].trend, Trend::Flat);
        assert_eq!(imported[0].delta, 1);

        let strict = parse_import(&json, 0).unwrap();
        assert_eq!(strict[0].trend, Trend::Rising);
    }

    #[test]
    fn export_name_uses_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(default_export_name(date), "rollcast-2026-03-07.json");
    }
}
