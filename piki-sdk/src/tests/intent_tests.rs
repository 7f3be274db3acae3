//! Tests for intent classification

#[cfg(test)]
mod tests {
    use crate::intent::{classify, is_local_export, Route};
    use crate::services::workflow::ResponseEnvelope;

    fn envelope(intent: Option<&str>, message: Option<&str>) -> ResponseEnvelope {
        ResponseEnvelope::success()
            .with_intent(intent.map(str::to_string))
            .with_message(message.map(str::to_string))
    }

    #[test]
    fn test_declared_intent() {
        assert!(is_local_export(&envelope(Some("reporte_local"), None)));
        assert!(is_local_export(&envelope(Some("DOWNLOAD"), None)));
        assert!(is_local_export(&envelope(Some("guardar_local"), Some("hola"))));
    }

    #[test]
    fn test_message_fallback() {
        assert!(is_local_export(&envelope(None, Some("por favor descargar el archivo"))));
        assert!(is_local_export(&envelope(None, Some("Lo dejo para Guardar en mi PC"))));
        assert!(is_local_export(&envelope(Some("consulta"), Some("generé un reporte local"))));
    }

    #[test]
    fn test_no_match() {
        assert!(!is_local_export(&envelope(None, Some("hola"))));
        assert!(!is_local_export(&envelope(None, None)));
        assert!(!is_local_export(&envelope(Some("compartir_fallidos"), Some("listo"))));
    }

    #[test]
    fn test_classify_routes() {
        assert_eq!(classify(&envelope(Some("descargar"), None)), Route::LocalExport);
        assert_eq!(classify(&envelope(None, Some("hola"))), Route::Display);
    }
}
