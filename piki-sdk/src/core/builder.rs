//! HTTP client construction
//!
//! Every webhook call sends JSON, so the content type is a default header;
//! gzip replies are decoded transparently.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;

use crate::config::DEFAULT_TIMEOUT_SECONDS;
use crate::error::{Result, ServiceError};
use crate::services::UserAgent;

#[derive(Debug, Clone)]
pub struct ClientBuilder {
    headers: Vec<(String, String)>,
    timeout: Duration,
    user_agent: UserAgent,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECONDS),
            user_agent: UserAgent::default(),
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra header sent on every call, e.g. a tenant tag the workflow routes on
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Upper bound for a whole call, connection included
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: UserAgent) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn build_http_client(&self) -> Result<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ServiceError::configuration(format!("header name {:?}: {}", name, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ServiceError::configuration(format!("header value for {}: {}", name, e))
            })?;
            headers.insert(name, value);
        }

        Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.to_string())
            .gzip(true)
            .default_headers(headers)
            .build()
            .map_err(|e| ServiceError::configuration(format!("cannot create HTTP client: {}", e)))
    }
}
