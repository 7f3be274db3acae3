//! Error mapping for the n8n webhook
//!
//! Converts non-success HTTP replies from the workflow into our normalized
//! ServiceError type.

use reqwest::StatusCode;
use serde_json::Value;

use super::{ErrorContext, ServiceError};
use crate::util::truncate_string;

/// Longest body fragment carried in an error message
const MAX_BODY_IN_MESSAGE: usize = 200;

/// Map a non-success webhook reply to a ServiceError
pub fn map_http_error(
    status: StatusCode,
    body: &str,
    context: &mut ErrorContext,
) -> ServiceError {
    context.status_code = Some(status.as_u16());
    context.add("category", classify_http_error(status));

    // n8n answers 504 when the workflow itself outlives the gateway
    if status == StatusCode::GATEWAY_TIMEOUT || status == StatusCode::REQUEST_TIMEOUT {
        return ServiceError::timeout("El flujo de n8n tardó demasiado en responder (timeout).");
    }

    // Prefer the workflow's own explanation when the body is JSON
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("message")
                .or_else(|| json.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| truncate_string(body.trim(), MAX_BODY_IN_MESSAGE));

    if detail.is_empty() {
        ServiceError::service(format!("Error {}", status.as_u16()))
    } else {
        ServiceError::service(format!("Error {}: {}", status.as_u16(), detail))
    }
}

/// Helper function to classify HTTP errors by category
pub fn classify_http_error(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "validation",
        401 | 403 => "auth",
        404 => "not_found",
        408 | 504 => "timeout",
        429 => "rate_limit",
        500..=599 => "server",
        _ => "unknown",
    }
}
