//! n8n workflow client implementation
//!
//! POSTs one `OutboundRequest` to the webhook and always hands back a
//! `ResponseEnvelope`. Connection failures, timeouts and error statuses are
//! folded into a failure envelope; nothing raises past this boundary.

mod models;
pub use models::*;

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;

use crate::config::{ConfigProvider, ServiceConfig, WebhookConfig, DEFAULT_PROVIDER};
use crate::core::WorkflowTransport;
use crate::core::ClientBuilder;
use crate::error::{ErrorContext, Result, ServiceError};
use crate::normalize;
use crate::services::common::{error_from_response, UserAgent};
use crate::util::{generate_request_id, timed, truncate_string};

/// Longest body fragment written to the debug log
const MAX_LOGGED_BODY: usize = 500;

/// What came back from the webhook before normalization
#[derive(Debug)]
enum RawReply {
    Empty,
    Json(Value),
    Text(String),
}

/// n8n webhook client
pub struct WorkflowClient {
    /// HTTP client
    http_client: Client,

    /// Configuration
    config: WebhookConfig,
}

impl WorkflowClient {
    /// Create a client from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_provider(&**DEFAULT_PROVIDER)
    }

    /// Create a client from any config provider
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        Self::new_with_config(WebhookConfig::from_provider(provider)?)
    }

    /// Create a client with explicit configuration
    pub fn new_with_config(config: WebhookConfig) -> Result<Self> {
        config.validate()?;

        let http_client = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(UserAgent::component("n8n-webhook"))
            .build_http_client()?;

        Ok(Self { http_client, config })
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    async fn post_raw(&self, request: &OutboundRequest, request_id: &str) -> Result<RawReply> {
        let url = &self.config.webhook_url;

        let response = self
            .http_client
            .post(url)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let context = ErrorContext::for_service(self.config.service_name())
                .endpoint(url.as_str())
                .request_id(request_id);
            return Err(error_from_response(context, response).await);
        }

        let body = response.text().await?;
        debug!(
            "[{}] n8n replied {}: {}",
            request_id,
            status.as_u16(),
            truncate_string(&body, MAX_LOGGED_BODY)
        );

        if body.trim().is_empty() {
            return Ok(RawReply::Empty);
        }

        Ok(match serde_json::from_str::<Value>(&body) {
            Ok(json) => RawReply::Json(json),
            Err(_) => RawReply::Text(body),
        })
    }
}

#[async_trait]
impl WorkflowTransport for WorkflowClient {
    async fn send(&self, request: &OutboundRequest) -> ResponseEnvelope {
        let request_id = generate_request_id();
        debug!(
            "[{}] POST {} session={} intent={:?}",
            request_id,
            self.config.webhook_url,
            request.session_id(),
            request.intent()
        );

        let (result, elapsed) = timed(self.post_raw(request, &request_id)).await;
        debug!("[{}] round-trip took {:?}", request_id, elapsed);

        match result {
            Ok(RawReply::Empty) => ResponseEnvelope::success(),
            Ok(RawReply::Json(json)) => normalize::extract_envelope(&json, &ResponseEnvelope::success()),
            Ok(RawReply::Text(text)) => ResponseEnvelope::success().with_message(Some(text)),
            Err(err) => {
                warn!("[{}] n8n call failed: {}", request_id, err);
                failure_envelope(&err)
            }
        }
    }
}

/// Fold a transport error into the envelope shown to the user
fn failure_envelope(err: &ServiceError) -> ResponseEnvelope {
    let message = match err.root() {
        ServiceError::Timeout(_) if err.status_code().is_some() => err.detail().to_string(),
        ServiceError::Timeout(_) => "El servidor n8n tardó demasiado en responder.".to_string(),
        ServiceError::Service(detail) => detail.clone(),
        _ => format!("Error de conexión al webhook de n8n: {}", err.detail()),
    };

    ResponseEnvelope::failure(message, err.to_string())
}
