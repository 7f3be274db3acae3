//! Tests for error handling functionality
//!
//! These tests verify that the error system in the SDK works correctly.

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use crate::error::{mapping, ErrorContext, ServiceError};

    #[test]
    fn test_service_error_creation() {
        let network_err = ServiceError::network("Connection failed");
        let validation_err = ServiceError::validation("La consulta no puede estar vacía.");
        let export_err = ServiceError::export("disk full");

        assert_eq!(network_err.to_string(), "webhook unreachable: Connection failed");
        assert_eq!(validation_err.to_string(), "invalid input: La consulta no puede estar vacía.");
        assert_eq!(export_err.to_string(), "report export failed: disk full");

        assert!(network_err.is_transport());
        assert!(!validation_err.is_transport());
        assert!(validation_err.is_validation());
        assert!(!export_err.is_transport());
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::for_service("n8n")
            .status_code(500)
            .request_id("req-123")
            .endpoint("http://localhost:5678/webhook/piki")
            .with("attempt", 1);

        let err = ServiceError::service("Error 500: boom").with_context(context);

        assert_eq!(err.service_name(), Some("n8n"));
        assert_eq!(err.status_code(), Some(500));
        assert_eq!(err.detail(), "Error 500: boom");
        assert!(err.is_transport());
        assert!(err.to_string().contains("boom"));

        let quick = ServiceError::timeout("slow").with_context_value("attempt", 2);
        assert!(matches!(quick.root(), ServiceError::Timeout(_)));
        assert_eq!(quick.status_code(), None);
    }

    #[test]
    fn test_map_gateway_timeout() {
        let mut context = ErrorContext::for_service("n8n");
        let err = mapping::map_http_error(StatusCode::GATEWAY_TIMEOUT, "", &mut context);

        assert!(matches!(err, ServiceError::Timeout(_)));
        assert_eq!(err.detail(), "El flujo de n8n tardó demasiado en responder (timeout).");
        assert_eq!(context.status_code, Some(504));
        assert_eq!(context.data.get("category").map(String::as_str), Some("timeout"));
    }

    #[test]
    fn test_map_json_error_body() {
        let mut context = ErrorContext::for_service("n8n");
        let err = mapping::map_http_error(
            StatusCode::NOT_FOUND,
            r#"{"code": 404, "message": "The requested webhook is not registered."}"#,
            &mut context,
        );

        assert_eq!(err.detail(), "Error 404: The requested webhook is not registered.");
        assert_eq!(context.data.get("category").map(String::as_str), Some("not_found"));
    }

    #[test]
    fn test_map_plain_and_empty_bodies() {
        let mut context = ErrorContext::default();
        let err = mapping::map_http_error(StatusCode::INTERNAL_SERVER_ERROR, "  kaboom \n", &mut context);
        assert_eq!(err.detail(), "Error 500: kaboom");

        let long = "x".repeat(500);
        let err = mapping::map_http_error(StatusCode::BAD_GATEWAY, &long, &mut context);
        assert!(err.detail().ends_with("..."));
        assert!(err.detail().chars().count() < 220);

        let err = mapping::map_http_error(StatusCode::BAD_REQUEST, "", &mut context);
        assert_eq!(err.detail(), "Error 400");
    }

    #[test]
    fn test_io_and_json_conversions() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ServiceError = io.into();
        assert!(matches!(err, ServiceError::Export(_)));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ServiceError = json_err.into();
        assert!(matches!(err.root(), ServiceError::Parsing(_)));
        assert_eq!(err.service_name(), Some("json"));
    }
}
