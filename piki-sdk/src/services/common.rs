//! Pieces shared by webhook clients

use std::fmt;

use crate::error::{mapping, ErrorContext, ServiceError};

/// `User-Agent` header value, e.g. `Piki/0.1.0 (n8n-webhook)`
#[derive(Debug, Clone)]
pub struct UserAgent {
    pub app_name: String,
    pub version: String,
    /// Parenthesized suffix naming the component
    pub extra: Option<String>,
}

impl UserAgent {
    /// This crate's agent tagged with a component name
    pub fn component(extra: &str) -> Self {
        Self {
            extra: Some(extra.to_string()),
            ..Self::default()
        }
    }
}

impl Default for UserAgent {
    fn default() -> Self {
        Self {
            app_name: "Piki".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            extra: None,
        }
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.extra {
            Some(extra) => write!(f, "{}/{} ({})", self.app_name, self.version, extra),
            None => write!(f, "{}/{}", self.app_name, self.version),
        }
    }
}

/// Read the body of an error status and map it, keeping the call's context
pub async fn error_from_response(
    mut context: ErrorContext,
    response: reqwest::Response,
) -> ServiceError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    mapping::map_http_error(status, &body, &mut context).with_context(context)
}
