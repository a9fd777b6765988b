//! Validation of raw user input before it reaches the log.

use rollcast_common::{Error, Result};

use crate::engine::{RANGE_MAX, RANGE_MIN};

/// Parse one roll value typed by the user.
///
/// Surrounding whitespace is ignored. Empty input, anything that is not a
/// whole number, and values outside the valid range are rejected with the
/// offending field named.
pub fn parse_value(field: &str, raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::MissingValue {
            field: field.to_string(),
        });
    }
    let value: i64 = trimmed.parse().map_err(|_| Error::NonNumeric {
        field: field.to_string(),
        input: trimmed.to_string(),
    })?;
    check_range(field, value)?;
    Ok(value)
}

/// Check both values of a pair against the valid range.
pub fn validate_pair(first: i64, second: i64) -> Result<()> {
    check_range("first", first)?;
    check_range("second", second)
}

fn check_range(field: &str, value: i64) -> Result<()> {
    if (RANGE_MIN..=RANGE_MAX).contains(&value) {
        Ok(())
    } else {
        Err(Error::ValueOutOfRange {
            field: field.to_string(),
            value,
            min: RANGE_MIN,
            max: RANGE_MAX,
        })
    }
}
