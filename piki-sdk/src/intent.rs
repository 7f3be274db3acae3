//! Intent classification
//!
//! Decides whether a reply should be displayed in the console or saved as a
//! local report file. An explicit intent from the workflow wins; otherwise
//! the message text is scanned for a few Spanish and English phrases.

use crate::services::workflow::ResponseEnvelope;

const LOCAL_EXPORT_INTENTS: [&str; 4] = ["reporte_local", "descargar", "guardar_local", "download"];

const LOCAL_EXPORT_PHRASES: [&str; 4] = [
    "reporte local",
    "guardar local",
    "descargar",
    "guardar en mi pc",
];

/// Where the console routes a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Print the message and data
    Display,
    /// Offer to save the records as a file
    LocalExport,
}

/// Classify a reply
pub fn classify(envelope: &ResponseEnvelope) -> Route {
    if is_local_export(envelope) {
        Route::LocalExport
    } else {
        Route::Display
    }
}

/// True when the reply asks for a local file
pub fn is_local_export(envelope: &ResponseEnvelope) -> bool {
    if let Some(intent) = envelope.intent() {
        let intent = intent.trim().to_lowercase();
        if LOCAL_EXPORT_INTENTS.contains(&intent.as_str()) {
            return true;
        }
    }

    envelope
        .message()
        .map(|message| {
            let message = message.to_lowercase();
            LOCAL_EXPORT_PHRASES
                .iter()
                .any(|phrase| message.contains(phrase))
        })
        .unwrap_or(false)
}
