//! Errors raised by the Piki SDK
//!
//! Most failures never surface as errors: the workflow client turns
//! connection problems, timeouts and error statuses into a failure
//! `ResponseEnvelope`. What remains is input validation, configuration and
//! report export, plus the transport categories used internally before they
//! are folded into an envelope.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub mod mapping;

/// Result alias used across the SDK
pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// The webhook could not be reached
    #[error("webhook unreachable: {0}")]
    Network(String),

    /// No answer within the configured wait
    #[error("webhook timed out: {0}")]
    Timeout(String),

    /// The workflow answered with an error status
    #[error("workflow error: {0}")]
    Service(String),

    /// Rejected before any network call (empty query, bad code, bad e-mail)
    #[error("invalid input: {0}")]
    Validation(String),

    /// A reply or document could not be decoded
    #[error("unreadable payload: {0}")]
    Parsing(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    /// Writing a report file failed
    #[error("report export failed: {0}")]
    Export(String),

    /// Any of the above plus where it happened
    #[error("{inner}")]
    WithContext {
        inner: Box<ServiceError>,
        context: ErrorContext,
    },
}

impl ServiceError {
    pub fn network(message: impl Into<String>) -> Self {
        ServiceError::Network(message.into())
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        ServiceError::Timeout(message.into())
    }

    pub fn service(message: impl Into<String>) -> Self {
        ServiceError::Service(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn parsing(message: impl Into<String>) -> Self {
        ServiceError::Parsing(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        ServiceError::Configuration(message.into())
    }

    pub fn export(message: impl Into<String>) -> Self {
        ServiceError::Export(message.into())
    }

    /// Attach call-site details
    pub fn with_context(self, context: ErrorContext) -> Self {
        ServiceError::WithContext {
            inner: Box::new(self),
            context,
        }
    }

    /// Attach a single detail
    pub fn with_context_value(self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.with_context(ErrorContext::default().with(key, value))
    }

    /// Innermost error, context layers removed
    pub fn root(&self) -> &ServiceError {
        match self {
            ServiceError::WithContext { inner, .. } => inner.root(),
            other => other,
        }
    }

    /// Message of the root error without its category prefix.
    ///
    /// This is the text shown to the user.
    pub fn detail(&self) -> &str {
        match self.root() {
            ServiceError::Network(m)
            | ServiceError::Timeout(m)
            | ServiceError::Service(m)
            | ServiceError::Validation(m)
            | ServiceError::Parsing(m)
            | ServiceError::Configuration(m)
            | ServiceError::Export(m) => m,
            ServiceError::WithContext { .. } => "",
        }
    }

    pub fn service_name(&self) -> Option<&str> {
        match self {
            ServiceError::WithContext { context, .. } => Some(&context.service),
            _ => None,
        }
    }

    /// HTTP status of the failed call, searching nested contexts
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ServiceError::WithContext { context, inner } => {
                context.status_code.or_else(|| inner.status_code())
            }
            _ => None,
        }
    }

    /// Failed while talking to the workflow
    pub fn is_transport(&self) -> bool {
        matches!(
            self.root(),
            ServiceError::Network(_) | ServiceError::Timeout(_) | ServiceError::Service(_)
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.root(), ServiceError::Validation(_))
    }
}

/// Where and when an error happened
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub service: String,
    pub timestamp: DateTime<Utc>,
    pub status_code: Option<u16>,
    /// Correlates the error with the request's log lines
    pub request_id: Option<String>,
    pub endpoint: Option<String>,
    pub data: HashMap<String, String>,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::for_service("piki")
    }
}

impl ErrorContext {
    pub fn for_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            timestamp: Utc::now(),
            status_code: None,
            request_id: None,
            endpoint: None,
            data: HashMap::new(),
        }
    }

    pub fn status_code(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn add(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.data.insert(key.into(), value.to_string());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.add(key, value);
        self
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        let error = if err.is_timeout() {
            ServiceError::timeout(err.to_string())
        } else if err.is_connect() || err.is_request() || err.is_redirect() {
            ServiceError::network(err.to_string())
        } else if err.is_decode() || err.is_body() {
            ServiceError::parsing(err.to_string())
        } else {
            ServiceError::network(err.to_string())
        };

        let mut context = ErrorContext::for_service("http_client");
        if let Some(status) = err.status() {
            context = context.status_code(status.as_u16());
        }
        if let Some(url) = err.url() {
            context = context.endpoint(url.as_str());
        }
        error.with_context(context)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::parsing(err.to_string()).with_context(ErrorContext::for_service("json"))
    }
}

/// Filesystem failures only happen while writing reports
impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::export(err.to_string())
    }
}

impl From<csv::Error> for ServiceError {
    fn from(err: csv::Error) -> Self {
        ServiceError::export(format!("csv: {}", err))
    }
}

impl From<rust_xlsxwriter::XlsxError> for ServiceError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ServiceError::export(format!("xlsx: {}", err))
    }
}
