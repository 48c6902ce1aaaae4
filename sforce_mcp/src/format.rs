//! Text rendering for records and raw results.

use serde::Serialize;
use serde_json::Value;
use sforce_core::Record;

/// Separates record blocks in multi-record output.
pub const RECORD_SEPARATOR: &str = "\n---\n";

/// Pretty-prints a value as two-space indented JSON.
pub fn pretty_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unprintable result: {}>", e))
}

/// Display text for a scalar field value.
///
/// Returns `None` for nulls, objects and arrays, which are left out of record
/// output so relationship payloads and `attributes` aren't dumped.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Formats a record as `field: value` lines, scalar fields only.
pub fn format_record(record: &Record) -> String {
    record
        .iter()
        .filter_map(|(field, value)| scalar_text(value).map(|text| format!("{}: {}", field, text)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats at most `limit` records, separated by [`RECORD_SEPARATOR`].
pub fn format_records(records: &[Record], limit: usize) -> String {
    records
        .iter()
        .take(limit)
        .map(format_record)
        .collect::<Vec<_>>()
        .join(RECORD_SEPARATOR)
}
