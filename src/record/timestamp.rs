//! Timestamp parsing for match payloads and query rendering.

use crate::error::MappingError;
use crate::record::raw::RawRecord;
use chrono::NaiveDateTime;

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const WIRE_FORMAT_FRACTIONAL: &str = "%Y-%m-%dT%H:%M:%S%.f";
const QUERY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse `YYYY-MM-DDTHH:MM:SS`, falling back to the fractional-seconds form.
pub fn parse_timestamp(field: &str, value: &str) -> Result<NaiveDateTime, MappingError> {
    NaiveDateTime::parse_from_str(value, WIRE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, WIRE_FORMAT_FRACTIONAL))
        .map_err(|_| MappingError::InvalidTimestamp {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Parse an optional timestamp field; missing, null, and blank values are `None`.
pub fn timestamp_field(
    record: &RawRecord,
    field: &str,
) -> Result<Option<NaiveDateTime>, MappingError> {
    match record.text(field) {
        Some(value) if !value.trim().is_empty() => parse_timestamp(field, &value).map(Some),
        _ => Ok(None),
    }
}

/// Render a date the way the match list endpoints expect it.
pub fn format_query_date(value: &NaiveDateTime) -> String {
    value.format(QUERY_FORMAT).to_string()
}
