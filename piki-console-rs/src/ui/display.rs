//! Rendering of reply payloads
//!
//! Pure helpers deciding what of a reply is shown and how; printing is left
//! to the handlers.

use serde_json::{Map, Value};

/// Fields that may carry a link to a shared report, in priority order
const LINK_FIELDS: [&str; 4] = ["url", "link", "webViewLink", "webContentLink"];

/// Internal fields not listed when showing a single object
const HIDDEN_FIELDS: [&str; 10] = [
    "url",
    "link",
    "webViewLink",
    "webContentLink",
    "descripcion",
    "accion",
    "query_sql",
    "mensaje_ia",
    "mensaje",
    "message",
];

/// Shown for a field the workflow explicitly left unset
pub const UNASSIGNED: &str = "No asignado";

/// First non-empty link of a shared report
pub fn link_of(data: &Map<String, Value>) -> Option<&str> {
    LINK_FIELDS
        .iter()
        .filter_map(|key| data.get(*key))
        .filter_map(Value::as_str)
        .find(|link| !link.trim().is_empty())
}

pub fn description_of(data: &Map<String, Value>) -> Option<&str> {
    data.get("descripcion")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
}

/// Fields worth listing once link and description have been shown
pub fn visible_fields(data: &Map<String, Value>) -> impl Iterator<Item = (&String, &Value)> {
    data.iter()
        .filter(|(key, _)| !HIDDEN_FIELDS.contains(&key.as_str()))
}

/// Text form of a field value; JSON null reads as "No asignado"
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => UNASSIGNED.to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
