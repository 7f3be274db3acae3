//! Tests for configuration loading

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use crate::config::{
        keys, CompositeConfigProvider, ConfigProvider, ConfigProviderExt, EnvConfigProvider,
        MemoryConfigProvider, ServiceConfig, WebhookConfig, DEFAULT_SESSION_PREFIX,
        DEFAULT_WEBHOOK_URL,
    };

    #[test]
    fn test_defaults_without_any_keys() {
        let config = WebhookConfig::from_provider(&MemoryConfigProvider::new()).unwrap();

        assert_eq!(config.webhook_url, DEFAULT_WEBHOOK_URL);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.reports_dir, PathBuf::from("./reports"));
        assert_eq!(config.session_prefix, DEFAULT_SESSION_PREFIX);
        assert_eq!(config.service_name(), "n8n");
    }

    #[test]
    fn test_timeout_formats() {
        for (raw, expected) in [
            ("45", Duration::from_secs(45)),
            ("2.5", Duration::from_millis(2500)),
            ("1500ms", Duration::from_millis(1500)),
            ("2m", Duration::from_secs(120)),
        ] {
            let mut provider = MemoryConfigProvider::new();
            provider.set("timeout", raw);
            assert_eq!(WebhookConfig::from_provider(&provider).unwrap().timeout, expected, "{}", raw);
        }
    }

    #[test]
    fn test_malformed_values_are_errors() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("timeout", "soon");
        assert!(WebhookConfig::from_provider(&provider).is_err());

        let mut provider = MemoryConfigProvider::new();
        provider.set("timeout", "0");
        assert!(WebhookConfig::from_provider(&provider).is_err());

        let mut provider = MemoryConfigProvider::new();
        provider.set("n8n_webhook_url", "ftp://example.com/hook");
        assert!(WebhookConfig::from_provider(&provider).is_err());

        let mut provider = MemoryConfigProvider::new();
        provider.set("n8n_webhook_url", "no es una url");
        assert!(WebhookConfig::from_provider(&provider).is_err());
    }

    #[test]
    fn test_composite_priority() {
        let mut overrides = MemoryConfigProvider::new();
        overrides.set("n8n_webhook_url", "https://override.example.com/webhook/piki");

        let mut base = MemoryConfigProvider::new();
        base.set("n8n_webhook_url", "https://base.example.com/webhook/piki");
        base.set("session_prefix", "cli_");

        let provider = CompositeConfigProvider::new()
            .with_provider(overrides)
            .with_provider(base);

        let config = WebhookConfig::from_provider(&provider).unwrap();
        assert_eq!(config.webhook_url, "https://override.example.com/webhook/piki");
        assert_eq!(config.session_prefix, "cli_");
    }

    #[test]
    fn test_env_provider_reads_prefixed_variable() {
        std::env::set_var("PIKI_TEST_TIMEOUT", "15");
        let provider = EnvConfigProvider::new().with_prefix("PIKI_TEST");

        assert_eq!(provider.get_duration(keys::TIMEOUT).unwrap(), Duration::from_secs(15));
        assert!(provider.get_string("missing_key").is_err());
        std::env::remove_var("PIKI_TEST_TIMEOUT");
    }

    #[test]
    fn test_env_variable_names() {
        assert_eq!(EnvConfigProvider::new().variable_name(keys::WEBHOOK_URL), "N8N_WEBHOOK_URL");
        assert_eq!(
            EnvConfigProvider::new().with_prefix("PIKI").variable_name("reports-dir"),
            "PIKI_REPORTS_DIR"
        );
    }

    #[test]
    fn test_fallback_getters() {
        let mut provider = MemoryConfigProvider::new();
        provider.set(keys::SESSION_PREFIX, "cli_");

        assert_eq!(provider.get_string_or(keys::SESSION_PREFIX, "x_"), "cli_");
        assert_eq!(provider.get_string_or(keys::REPORTS_DIR, "./out"), "./out");
        assert!(provider.get_duration(keys::TIMEOUT).is_err());

        let mut layered = CompositeConfigProvider::new();
        layered.add_provider(provider);
        assert!(layered.get_string("absent").is_err());
    }
}
