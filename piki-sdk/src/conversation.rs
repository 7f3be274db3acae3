//! Conversation pipeline
//!
//! Ties one session to a transport: build the request, send it, normalize the
//! reply, drop empty rows and decide whether it should be exported.

use log::debug;
use serde_json::{Map, Value};

use crate::core::WorkflowTransport;
use crate::error::Result;
use crate::intent::{self, Route};
use crate::normalize::{self, drop_empty_records, drop_empty_values, strip_placeholders, Record};
use crate::request::ReportRequestBuilder;
use crate::services::workflow::{OutboundRequest, ResponseEnvelope};
use crate::session::SessionId;

/// One normalized answer, ready for display or export
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    envelope: ResponseEnvelope,
    records: Vec<Record>,
    route: Route,
}

impl Reply {
    /// Run record extraction and classification over an envelope
    pub fn from_envelope(envelope: ResponseEnvelope) -> Self {
        let records = drop_empty_records(normalize::extract_records(envelope.data()));
        let route = intent::classify(&envelope);
        Self {
            envelope,
            records,
            route,
        }
    }

    pub fn envelope(&self) -> &ResponseEnvelope {
        &self.envelope
    }

    pub fn ok(&self) -> bool {
        self.envelope.ok()
    }

    pub fn message(&self) -> Option<&str> {
        self.envelope.message()
    }

    pub fn error(&self) -> Option<&str> {
        self.envelope.error()
    }

    /// Payload in its original shape
    pub fn display_data(&self) -> Option<&Value> {
        self.envelope.data()
    }

    /// Export view: non-empty records, placeholders kept
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Payload as shown to the user: same shape as `display_data`, but `{}`
    /// list entries are gone and objects lose their `"null"`/`""` fields.
    pub fn display_view(&self) -> Option<Value> {
        self.display_data().map(clean_for_display)
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// The workflow asked for a local file
    pub fn export_requested(&self) -> bool {
        self.route == Route::LocalExport
    }

    /// Neither a message nor any records
    pub fn is_empty(&self) -> bool {
        self.message().is_none() && self.records.is_empty()
    }
}

fn clean_for_display(data: &Value) -> Value {
    match data {
        Value::Array(items) => Value::Array(
            drop_empty_values(items.clone())
                .iter()
                .map(|item| match item {
                    Value::Object(record) => Value::Object(strip_placeholders(record)),
                    other => other.clone(),
                })
                .collect(),
        ),
        Value::Object(record) => Value::Object(strip_placeholders(record)),
        other => other.clone(),
    }
}

/// A session bound to a workflow transport
pub struct Conversation<T: WorkflowTransport> {
    transport: T,
    session: SessionId,
}

impl<T: WorkflowTransport> Conversation<T> {
    pub fn new(transport: T, session: SessionId) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Ask the workflow something.
    ///
    /// An empty query fails here without a network call; everything after
    /// that point is folded into the returned `Reply`.
    pub async fn ask(
        &self,
        query: &str,
        intent: Option<&str>,
        params: Map<String, Value>,
    ) -> Result<Reply> {
        let mut builder = ReportRequestBuilder::new(query, &self.session).params(params);
        if let Some(intent) = intent {
            builder = builder.intent(intent);
        }

        let request = builder.build()?;
        Ok(self.dispatch(&request).await)
    }

    /// Send a prebuilt request
    pub async fn dispatch(&self, request: &OutboundRequest) -> Reply {
        let envelope = self.transport.send(request).await;
        let reply = Reply::from_envelope(envelope);
        debug!(
            "session {} got ok={} records={} route={:?}",
            self.session,
            reply.ok(),
            reply.records().len(),
            reply.route()
        );
        reply
    }
}
