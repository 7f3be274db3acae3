//! n8n workflow data models
//!
//! Wire request sent to the webhook and the normalized reply envelope.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::session::SessionId;

/// One normalized reply from the remote workflow.
///
/// A failure envelope never carries data: the setters below keep
/// `data == None` whenever `ok == false`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    intent: Option<String>,
}

impl ResponseEnvelope {
    /// An empty successful envelope
    pub fn success() -> Self {
        Self {
            ok: true,
            message: None,
            data: None,
            error: None,
            intent: None,
        }
    }

    /// A failure envelope with a display message and a diagnostic error
    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
            data: None,
            error: Some(error.into()),
            intent: None,
        }
    }

    /// Replace the message
    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    /// Replace the payload; ignored on a failure envelope
    pub fn with_data(mut self, data: Option<Value>) -> Self {
        if self.ok {
            self.data = data.filter(|value| !value.is_null());
        }
        self
    }

    /// Replace the declared intent
    pub fn with_intent(mut self, intent: Option<String>) -> Self {
        self.intent = intent;
        self
    }

    pub fn ok(&self) -> bool {
        self.ok
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn intent(&self) -> Option<&str> {
        self.intent.as_deref()
    }
}

/// Request body POSTed to the webhook.
///
/// Field names on the wire (`chatInput`, `sessionId`, `intent`, `params`) are
/// fixed by the workflow. Built only through `ReportRequestBuilder`, which
/// rejects an empty query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundRequest {
    #[serde(rename = "chatInput")]
    query_text: String,

    #[serde(rename = "sessionId")]
    session_id: SessionId,

    #[serde(skip_serializing_if = "Option::is_none")]
    intent: Option<String>,

    #[serde(rename = "params", skip_serializing_if = "Map::is_empty")]
    parameters: Map<String, Value>,
}

impl OutboundRequest {
    pub(crate) fn new(
        query_text: String,
        session_id: SessionId,
        intent: Option<String>,
        parameters: Map<String, Value>,
    ) -> Self {
        Self {
            query_text,
            session_id,
            intent,
            parameters,
        }
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn intent(&self) -> Option<&str> {
        self.intent.as_deref()
    }

    pub fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_envelope_never_carries_data() {
        let envelope = ResponseEnvelope::failure("caído", "webhook unreachable: refused")
            .with_data(Some(json!([{"a": 1}])));

        assert_eq!(envelope.data(), None);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"ok": false, "message": "caído", "error": "webhook unreachable: refused"})
        );
    }
}
