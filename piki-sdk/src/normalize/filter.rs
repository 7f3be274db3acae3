//! Record filtering
//!
//! Workflows routinely pad their answers with `{}` rows and `"null"` or `""`
//! placeholders. These helpers remove that noise without touching real data.

use serde_json::Value;

use super::Record;

/// Drop records with no keys at all
pub fn drop_empty_records(records: Vec<Record>) -> Vec<Record> {
    records.into_iter().filter(|record| !record.is_empty()).collect()
}

/// Same as `drop_empty_records` for a raw display list; non-objects pass through
pub fn drop_empty_values(items: Vec<Value>) -> Vec<Value> {
    items
        .into_iter()
        .filter(|item| !matches!(item, Value::Object(map) if map.is_empty()))
        .collect()
}

/// The literal string `"null"` or the empty string.
///
/// A real JSON null is not a placeholder.
pub fn is_placeholder(value: &Value) -> bool {
    matches!(value, Value::String(text) if text.is_empty() || text == "null")
}

/// Copy of `record` without placeholder fields, key order preserved
pub fn strip_placeholders(record: &Record) -> Record {
    record
        .iter()
        .filter(|(_, value)| !is_placeholder(value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
