//! Core abstractions for the Piki SDK
//!
//! - `WorkflowTransport`: the seam between the conversation pipeline and
//!   whatever performs the call to the remote workflow
//! - `ClientBuilder`: builder for the underlying HTTP client

pub mod builder;
pub use builder::ClientBuilder;

use async_trait::async_trait;

use crate::services::workflow::{OutboundRequest, ResponseEnvelope};

/// Performs one call to the remote workflow.
///
/// Implementations never fail: connection problems, timeouts and bad
/// statuses come back as a failure envelope (`ok == false`). Exactly one
/// call is in flight per user action.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkflowTransport: Send + Sync {
    /// Send a request and return the normalized envelope
    async fn send(&self, request: &OutboundRequest) -> ResponseEnvelope;
}
