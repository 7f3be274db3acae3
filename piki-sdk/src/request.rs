//! Outbound request construction and input validation
//!
//! Everything here runs before any network call; a rejected input never
//! costs a round-trip to the workflow.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{Result, ServiceError};
use crate::services::workflow::OutboundRequest;
use crate::session::SessionId;

static TRACKING_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9]{1,20}$").expect("tracking code pattern is valid")
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w.-]+@[\w.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid")
});

/// Reject empty or whitespace-only free text
pub fn validate_query(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ServiceError::validation("La consulta no puede estar vacía."))
    } else {
        Ok(trimmed)
    }
}

/// Shipment tracking codes are 1 to 20 ASCII letters or digits
pub fn validate_tracking_code(code: &str) -> Result<&str> {
    let trimmed = code.trim();
    if TRACKING_CODE.is_match(trimmed) {
        Ok(trimmed)
    } else {
        Err(ServiceError::validation(
            "Código de envío inválido. Debe contener entre 1 y 20 caracteres alfanuméricos.",
        ))
    }
}

/// Destination address for reports shared by e-mail
pub fn validate_email(email: &str) -> Result<&str> {
    let trimmed = email.trim();
    if EMAIL.is_match(trimmed) {
        Ok(trimmed)
    } else {
        Err(ServiceError::validation("Correo inválido."))
    }
}

/// Builds the `OutboundRequest` for one user action
#[derive(Debug, Clone)]
pub struct ReportRequestBuilder {
    query_text: String,
    session_id: SessionId,
    intent: Option<String>,
    parameters: Map<String, Value>,
}

impl ReportRequestBuilder {
    /// Start a request for the given free text within a conversation
    pub fn new(query_text: impl Into<String>, session_id: &SessionId) -> Self {
        Self {
            query_text: query_text.into(),
            session_id: session_id.clone(),
            intent: None,
            parameters: Map::new(),
        }
    }

    /// Tag the request with an intent the workflow routes on
    pub fn intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    /// Add a parameter, sent as-is (a JSON null stays null)
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Add a parameter only when it has a value
    pub fn param_opt<V: Into<Value>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Merge a parameter map; later keys win
    pub fn params(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Validate and freeze the request
    pub fn build(self) -> Result<OutboundRequest> {
        let query_text = validate_query(&self.query_text)?.to_string();
        Ok(OutboundRequest::new(
            query_text,
            self.session_id,
            self.intent,
            self.parameters,
        ))
    }
}
