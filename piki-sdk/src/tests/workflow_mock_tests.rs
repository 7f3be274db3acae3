//! Mock tests for the n8n webhook client
//!
//! These tests use WireMock to stand in for the n8n webhook and verify the
//! wire format and that every failure comes back as a failure envelope.

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::WebhookConfig;
    use crate::core::WorkflowTransport;
    use crate::request::ReportRequestBuilder;
    use crate::services::workflow::{OutboundRequest, WorkflowClient};
    use crate::session::SessionId;

    const HOOK_PATH: &str = "/webhook/piki";

    fn create_test_client(base_url: &str, timeout: Duration) -> WorkflowClient {
        WorkflowClient::new_with_config(WebhookConfig {
            webhook_url: format!("{}{}", base_url, HOOK_PATH),
            timeout,
            reports_dir: PathBuf::from("./reports"),
            session_prefix: "session_".to_string(),
        })
        .expect("Failed to build workflow client")
    }

    fn simple_request(query: &str) -> OutboundRequest {
        ReportRequestBuilder::new(query, &SessionId::new("session_mock"))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_posts_wire_contract() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(HOOK_PATH))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "chatInput": "Consultar estado del envío con código AB12",
                "sessionId": "session_mock",
                "intent": "consultar_estado",
                "params": {"codigo": "AB12"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "mensaje_ia": "El envío AB12 está en camino.",
                "data": {"codigo": "AB12", "estado": "en camino"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri(), Duration::from_secs(5));
        let request = ReportRequestBuilder::new(
            "Consultar estado del envío con código AB12",
            &SessionId::new("session_mock"),
        )
        .intent("consultar_estado")
        .param("codigo", "AB12")
        .build()
        .unwrap();

        let envelope = client.send(&request).await;

        assert!(envelope.ok());
        assert_eq!(envelope.message(), Some("El envío AB12 está en camino."));
        assert_eq!(envelope.data(), Some(&json!({"codigo": "AB12", "estado": "en camino"})));
    }

    #[tokio::test]
    async fn test_list_of_one_reply() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(HOOK_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"mensaje_ia": "Encontré 2 envíos fallidos.", "data": [{"id": 1}, {"id": 2}]}
            ])))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri(), Duration::from_secs(5));
        let envelope = client.send(&simple_request("fallidos")).await;

        assert!(envelope.ok());
        assert_eq!(envelope.message(), Some("Encontré 2 envíos fallidos."));
        assert_eq!(envelope.data(), Some(&json!([{"id": 1}, {"id": 2}])));
    }

    #[tokio::test]
    async fn test_non_json_body_becomes_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(HOOK_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("Workflow was started"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri(), Duration::from_secs(5));
        let envelope = client.send(&simple_request("hola")).await;

        assert!(envelope.ok());
        assert_eq!(envelope.message(), Some("Workflow was started"));
        assert_eq!(envelope.data(), None);
    }

    #[tokio::test]
    async fn test_empty_body_is_plain_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(HOOK_PATH))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri(), Duration::from_secs(5));
        let envelope = client.send(&simple_request("hola")).await;

        assert!(envelope.ok());
        assert_eq!(envelope.message(), None);
        assert_eq!(envelope.data(), None);
        assert_eq!(envelope.error(), None);
    }

    #[tokio::test]
    async fn test_server_error_is_failure_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(HOOK_PATH))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"message": "Error in workflow"})),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri(), Duration::from_secs(5));
        let envelope = client.send(&simple_request("hola")).await;

        assert!(!envelope.ok());
        assert_eq!(envelope.message(), Some("Error 500: Error in workflow"));
        assert_eq!(envelope.data(), None);
        assert!(envelope.error().unwrap().contains("Error in workflow"));
    }

    #[tokio::test]
    async fn test_gateway_timeout_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(HOOK_PATH))
            .respond_with(ResponseTemplate::new(504))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri(), Duration::from_secs(5));
        let envelope = client.send(&simple_request("hola")).await;

        assert!(!envelope.ok());
        assert_eq!(
            envelope.message(),
            Some("El flujo de n8n tardó demasiado en responder (timeout).")
        );
    }

    #[tokio::test]
    async fn test_client_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(HOOK_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"mensaje": "tarde"}))
                    .set_delay(Duration::from_millis(800)),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri(), Duration::from_millis(100));
        let envelope = client.send(&simple_request("hola")).await;

        assert!(!envelope.ok());
        assert_eq!(envelope.message(), Some("El servidor n8n tardó demasiado en responder."));
        assert_eq!(envelope.data(), None);
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let client = create_test_client("http://127.0.0.1:1", Duration::from_secs(2));
        let envelope = client.send(&simple_request("hola")).await;

        assert!(!envelope.ok());
        assert!(envelope
            .message()
            .unwrap()
            .starts_with("Error de conexión al webhook de n8n:"));
        assert!(envelope.error().is_some());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = WebhookConfig {
            webhook_url: "not a url".to_string(),
            ..WebhookConfig::default()
        };
        assert!(WorkflowClient::new_with_config(config).is_err());
    }
}
