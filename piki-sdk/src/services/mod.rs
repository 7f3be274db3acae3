//! Remote services Piki talks to
//!
//! Only one for now: the n8n workflow behind the webhook.

pub mod workflow;
mod common;

pub use common::UserAgent;
