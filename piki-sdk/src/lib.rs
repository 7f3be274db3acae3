//! # Piki SDK
//!
//! Client side of the Piki shipment-tracking assistant. Queries go to an n8n
//! workflow over a webhook; whatever shape the workflow answers with is
//! normalized into one envelope and a list of exportable records.
//!
//! This crate provides:
//!
//! - `WorkflowClient`: the webhook transport, which never fails past its boundary
//! - Response normalization (`normalize`) and record filtering
//! - Intent classification to decide between display and local export
//! - Request building and input validation
//! - CSV / JSON export of record lists
//! - Error handling and configuration management utilities
//!
//! ## Architecture
//!
//! - `WorkflowTransport`: trait at the network seam, mocked in tests
//! - `Conversation`: one session bound to a transport; yields `Reply` values
//! - `ResponseEnvelope`: the canonical reply `(ok, message, data, error, intent)`
//! - `ServiceError`: error type for the few paths that do fail

// Re-export core modules
pub mod core;
pub use core::{ClientBuilder, WorkflowTransport};

// Re-export service-specific modules
pub mod services;
pub use services::workflow::{self, OutboundRequest, ResponseEnvelope, WorkflowClient};

// Re-export error handling
pub mod error;
pub use error::{ErrorContext, Result, ServiceError};

// Re-export configuration management
pub mod config;
pub use config::{ConfigProvider, ServiceConfig, WebhookConfig};

pub mod normalize;
pub use normalize::{Normalized, Record};

pub mod intent;
pub use intent::Route;

pub mod request;
pub use request::ReportRequestBuilder;

pub mod report;
pub use report::{CourierFilter, ReportKind, SharePlatform};

pub mod session;
pub use session::SessionId;

pub mod conversation;
pub use conversation::{Conversation, Reply};

pub mod export;
pub use export::{ExportFormat, ExportOutcome, TableExporter};

// Internal helpers
mod util;

#[cfg(test)]
mod tests;
