//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and handle the dual
//! datetime format (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional `YYYY-MM-DD` column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string is not a date.
pub fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}"))),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all bp-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read a REAL column that may have been stored as INTEGER.
///
/// # Errors
///
/// Returns `DatabaseError::Query` for NULL or non-numeric values.
pub fn get_number(row: &libsql::Row, idx: i32) -> Result<f64, DatabaseError> {
    match row.get_value(idx)? {
        libsql::Value::Real(v) => Ok(v),
        #[allow(clippy::cast_precision_loss)]
        libsql::Value::Integer(v) => Ok(v as f64),
        other => Err(DatabaseError::Query(format!(
            "expected a number in column {idx}, found {other:?}"
        ))),
    }
}

/// Turn an optional value into a bindable parameter.
pub fn opt_value<T: Into<libsql::Value>>(value: Option<T>) -> libsql::Value {
    value.map_or(libsql::Value::Null, Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_rfc3339_and_sqlite_formats() {
        let a = parse_datetime("2025-01-15T08:30:00+00:00").unwrap();
        let b = parse_datetime("2025-01-15 08:30:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.hour(), 8);
    }

    #[test]
    fn rejects_garbage_datetime() {
        assert!(matches!(
            parse_datetime("yesterday"),
            Err(DatabaseError::Query(_))
        ));
    }

    #[test]
    fn optional_date() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("")).unwrap(), None);
        let d = parse_optional_date(Some("2014-06-02")).unwrap().unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2014, 6, 2));
        assert!(parse_optional_date(Some("02/06/2014")).is_err());
    }

    #[test]
    fn parses_role_enum() {
        let role: bp_core::enums::Role = parse_enum("teacher").unwrap();
        assert_eq!(role, bp_core::enums::Role::Teacher);
        assert!(parse_enum::<bp_core::enums::Role>("janitor").is_err());
    }
}
