//! Where the console finds its webhook
//!
//! Settings come from layered providers: command-line overrides first, then
//! the process environment (which `dotenv` may have filled from a `.env`
//! file), then built-in defaults.

use std::collections::HashMap;
use std::env;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};
use crate::util::parse_duration;

/// Test-mode webhook of a local n8n instance
pub const DEFAULT_WEBHOOK_URL: &str = "http://localhost:5678/webhook-test/piki";

/// Seconds to wait for the workflow
pub const DEFAULT_TIMEOUT_SECONDS: f64 = 120.0;

pub const DEFAULT_REPORTS_DIR: &str = "./reports";

pub const DEFAULT_SESSION_PREFIX: &str = "session_";

/// Setting names, as looked up in every provider
pub mod keys {
    pub const WEBHOOK_URL: &str = "n8n_webhook_url";
    pub const TIMEOUT: &str = "timeout";
    pub const REPORTS_DIR: &str = "reports_dir";
    pub const SESSION_PREFIX: &str = "session_prefix";
}

/// A source of raw string settings
pub trait ConfigProvider: Send + Sync {
    fn get_string(&self, key: &str) -> Result<String>;
}

/// Typed lookups layered over any provider
pub trait ConfigProviderExt: ConfigProvider {
    /// Accepts `"30s"`, `"5m"`, `"1500ms"` or bare seconds like `"120.0"`
    fn get_duration(&self, key: &str) -> Result<Duration> {
        let raw = self.get_string(key)?;
        parse_duration(&raw).ok_or_else(|| {
            ServiceError::configuration(format!("{} is not a duration: {}", key, raw))
        })
    }

    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key)
            .unwrap_or_else(|_| default.to_string())
    }
}

impl<T: ConfigProvider + ?Sized> ConfigProviderExt for T {}

/// Reads process environment variables.
///
/// A key such as `n8n_webhook_url` maps to `N8N_WEBHOOK_URL`, or to
/// `PREFIX_N8N_WEBHOOK_URL` when a prefix is set.
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    prefix: Option<String>,
}

impl EnvConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub(crate) fn variable_name(&self, key: &str) -> String {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
            .collect();

        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, name),
            None => name,
        }
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        let name = self.variable_name(key);
        env::var(&name).map_err(|e| match e {
            env::VarError::NotPresent => {
                ServiceError::configuration(format!("{} is not set", name))
            }
            env::VarError::NotUnicode(_) => {
                ServiceError::configuration(format!("{} is not valid unicode", name))
            }
        })
    }
}

/// Fixed values, used for command-line overrides and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigProvider {
    values: HashMap<String, String>,
}

impl MemoryConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        self.values.insert(key.into(), value.to_string());
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        match self.values.get(key) {
            Some(value) => Ok(value.clone()),
            None => Err(ServiceError::configuration(format!("{} is not set", key))),
        }
    }
}

/// Asks each layer in turn; the first one holding the key wins
#[derive(Default)]
pub struct CompositeConfigProvider {
    layers: Vec<Box<dyn ConfigProvider>>,
}

impl CompositeConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_provider(&mut self, provider: impl ConfigProvider + 'static) {
        self.layers.push(Box::new(provider));
    }

    pub fn with_provider(mut self, provider: impl ConfigProvider + 'static) -> Self {
        self.add_provider(provider);
        self
    }
}

impl ConfigProvider for CompositeConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.layers
            .iter()
            .find_map(|layer| layer.get_string(key).ok())
            .ok_or_else(|| ServiceError::configuration(format!("{} is not set in any layer", key)))
    }
}

/// Unprefixed environment lookup used by `WorkflowClient::from_env`
pub static DEFAULT_PROVIDER: Lazy<Arc<EnvConfigProvider>> =
    Lazy::new(|| Arc::new(EnvConfigProvider::new()));

/// Settings for one remote service
pub trait ServiceConfig: Debug + Send + Sync {
    fn validate(&self) -> Result<()>;

    fn service_name(&self) -> &str;
}

/// Webhook endpoint, wait budget and report locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Queries are POSTed here
    pub webhook_url: String,

    pub timeout: Duration,

    /// Suggested directory for locally saved reports
    pub reports_dir: PathBuf,

    pub session_prefix: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECONDS),
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            session_prefix: DEFAULT_SESSION_PREFIX.to_string(),
        }
    }
}

impl WebhookConfig {
    /// Missing settings take their defaults. A timeout that is present but
    /// unreadable is an error, as is an invalid URL.
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        let defaults = Self::default();

        let timeout = if provider.get_string(keys::TIMEOUT).is_ok() {
            provider.get_duration(keys::TIMEOUT)?
        } else {
            defaults.timeout
        };

        let config = Self {
            webhook_url: provider.get_string_or(keys::WEBHOOK_URL, &defaults.webhook_url),
            timeout,
            reports_dir: provider
                .get_string(keys::REPORTS_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.reports_dir),
            session_prefix: provider.get_string_or(keys::SESSION_PREFIX, &defaults.session_prefix),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_provider(&**DEFAULT_PROVIDER)
    }
}

impl ServiceConfig for WebhookConfig {
    fn validate(&self) -> Result<()> {
        let raw = self.webhook_url.trim();
        if raw.is_empty() {
            return Err(ServiceError::configuration("the n8n webhook URL is empty"));
        }

        let url = url::Url::parse(raw).map_err(|e| {
            ServiceError::configuration(format!("bad n8n webhook URL {}: {}", raw, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ServiceError::configuration(format!(
                "the n8n webhook must be http or https, not {}",
                url.scheme()
            )));
        }

        if self.timeout.is_zero() {
            return Err(ServiceError::configuration("the timeout must be positive"));
        }

        Ok(())
    }

    fn service_name(&self) -> &str {
        "n8n"
    }
}
