//! Response normalization
//!
//! The workflow answers with whatever shape the branch that ran happened to
//! emit: a bare object, a one-element list wrapping an object, a JSON document
//! encoded inside a string, a scalar, or nothing at all. This module folds all
//! of them into one `ResponseEnvelope` plus a predictable list of records.
//!
//! Two views of the payload are kept:
//! - the envelope's `data`, in its original shape, for display;
//! - the record list, always string-keyed objects, for tabular export.
//!
//! Nothing in here fails. Unparseable strings become raw string data.

pub mod filter;

pub use filter::{drop_empty_records, drop_empty_values, is_placeholder, strip_placeholders};

use serde_json::{Map, Value};

use crate::services::workflow::ResponseEnvelope;

/// One row of a future tabular report
pub type Record = Map<String, Value>;

/// Column used when a non-object value has to become a record
pub const VALUE_COLUMN: &str = "value";

/// Message fields in priority order; the AI-generated text is authoritative
const MESSAGE_KEYS: [&str; 3] = ["mensaje_ia", "mensaje", "message"];

/// Keys marking an object as an envelope rather than a plain row.
/// `datos` alone does not count; it is only read as a stand-in for `data`.
const ENVELOPE_KEYS: [&str; 4] = ["mensaje_ia", "mensaje", "message", "data"];

/// Fields a workflow may use to declare an intent
const INTENT_KEYS: [&str; 2] = ["intent", "intencion"];

/// Closed set of top-level shapes a decoded reply can take
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonShape<'a> {
    Null,
    Scalar(&'a Value),
    Array(&'a [Value]),
    Object(&'a Map<String, Value>),
    EncodedString(&'a str),
}

impl<'a> JsonShape<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Null => JsonShape::Null,
            Value::Bool(_) | Value::Number(_) => JsonShape::Scalar(value),
            Value::String(text) => JsonShape::EncodedString(text),
            Value::Array(items) => JsonShape::Array(items),
            Value::Object(map) => JsonShape::Object(map),
        }
    }
}

/// Envelope plus export records for one reply
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub envelope: ResponseEnvelope,
    pub records: Vec<Record>,
}

/// Normalize a raw decoded reply.
///
/// `fallback` supplies what is already known about the reply (its `ok` flag,
/// a message, an intent); fields found in `raw` override it. A failure
/// fallback is returned untouched with no records.
pub fn normalize(raw: &Value, fallback: &ResponseEnvelope) -> Normalized {
    let envelope = extract_envelope(raw, fallback);
    let records = extract_records(envelope.data());
    Normalized { envelope, records }
}

/// Classify the top-level shape and build the envelope
pub fn extract_envelope(raw: &Value, fallback: &ResponseEnvelope) -> ResponseEnvelope {
    if !fallback.ok() {
        return fallback.clone();
    }

    match JsonShape::of(raw) {
        JsonShape::Array(items) => match single_object(items) {
            Some(source) => from_list_item(source, fallback),
            None => keep_message(fallback, Some(raw.clone())),
        },
        JsonShape::Object(map) => from_object(map, fallback),
        JsonShape::EncodedString(text) => from_encoded_string(text, fallback),
        JsonShape::Scalar(value) => keep_message(fallback, Some(value.clone())),
        JsonShape::Null => keep_message(fallback, None),
    }
}

/// Turn whatever `data` ended up being into export records
pub fn extract_records(data: Option<&Value>) -> Vec<Record> {
    let shape = match data {
        Some(value) => JsonShape::of(value),
        None => JsonShape::Null,
    };

    match shape {
        JsonShape::Null => Vec::new(),
        JsonShape::Array(items) => items.iter().map(as_record).collect(),
        JsonShape::Object(map) => match map.get("data") {
            // doubly nested `{"data": {"data": [...]}}` branches
            Some(Value::Array(inner)) => inner.iter().map(as_record).collect(),
            _ => vec![map.clone()],
        },
        JsonShape::Scalar(value) => vec![wrap_value(value.clone())],
        JsonShape::EncodedString(text) => vec![wrap_value(Value::String(text.to_string()))],
    }
}

/// First non-empty message in priority order
pub fn message_of(source: &Map<String, Value>) -> Option<String> {
    MESSAGE_KEYS
        .iter()
        .filter_map(|key| source.get(*key))
        .filter_map(Value::as_str)
        .find(|text| !text.trim().is_empty())
        .map(str::to_string)
}

fn intent_of(source: &Map<String, Value>) -> Option<String> {
    INTENT_KEYS
        .iter()
        .filter_map(|key| source.get(*key))
        .filter_map(Value::as_str)
        .find(|text| !text.trim().is_empty())
        .map(|text| text.trim().to_string())
}

fn has_envelope_key(source: &Map<String, Value>) -> bool {
    ENVELOPE_KEYS.iter().any(|key| source.contains_key(*key))
}

/// `[{...}]`: the lone object is the envelope, whatever keys it carries
fn single_object(items: &[Value]) -> Option<&Map<String, Value>> {
    match items {
        [Value::Object(map)] => Some(map),
        _ => None,
    }
}

fn from_list_item(source: &Map<String, Value>, fallback: &ResponseEnvelope) -> ResponseEnvelope {
    fallback
        .clone()
        .with_message(message_of(source).or_else(|| fallback.message().map(str::to_string)))
        .with_intent(intent_of(source).or_else(|| fallback.intent().map(str::to_string)))
        .with_data(source.get("data").cloned())
}

fn from_object(source: &Map<String, Value>, fallback: &ResponseEnvelope) -> ResponseEnvelope {
    let payload = if has_envelope_key(source) {
        source.get("data").or_else(|| source.get("datos"))
    } else {
        None
    };
    let data = payload
        .cloned()
        .unwrap_or_else(|| Value::Object(source.clone()));

    fallback
        .clone()
        .with_message(message_of(source).or_else(|| fallback.message().map(str::to_string)))
        .with_intent(intent_of(source).or_else(|| fallback.intent().map(str::to_string)))
        .with_data(Some(data))
}

fn from_encoded_string(text: &str, fallback: &ResponseEnvelope) -> ResponseEnvelope {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => from_object(&map, fallback),
        Ok(parsed) => keep_message(fallback, Some(parsed)),
        Err(_) => keep_message(fallback, Some(Value::String(text.to_string()))),
    }
}

fn keep_message(fallback: &ResponseEnvelope, data: Option<Value>) -> ResponseEnvelope {
    fallback.clone().with_data(data)
}

fn as_record(value: &Value) -> Record {
    match value {
        Value::Object(map) => map.clone(),
        other => wrap_value(other.clone()),
    }
}

fn wrap_value(value: Value) -> Record {
    let mut record = Map::new();
    record.insert(VALUE_COLUMN.to_string(), value);
    record
}
