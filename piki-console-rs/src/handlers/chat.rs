//! Free conversation with the assistant

use anyhow::Result;
use piki_sdk::report::CHAT_BASE_NAME;
use piki_sdk::WorkflowTransport;
use serde_json::Map;
use tracing::debug;

use crate::app::App;

impl<T: WorkflowTransport> App<T> {
    pub(crate) async fn chat(&self) -> Result<()> {
        self.ui.info("Escribí tu consulta. Enter vacío o 'salir' para volver al menú.");

        loop {
            let query = self.ui.text("Tú")?;
            if query.is_empty() || query.eq_ignore_ascii_case("salir") {
                return Ok(());
            }

            let reply = self
                .ui
                .with_spinner("Piki está pensando", self.conversation.ask(&query, None, Map::new()))
                .await?;

            if !reply.ok() {
                self.ui.error(reply.message().unwrap_or("Error desconocido"));
                continue;
            }

            if reply.is_empty() {
                self.ui.info("La consulta fue procesada correctamente, pero no se recibieron datos.");
            } else {
                if let Some(message) = reply.message() {
                    self.ui.line(&self.ui.formatter().assistant(message));
                }
                if let Some(data) = reply.display_view() {
                    self.show_data(&data);
                }
            }

            if reply.export_requested() {
                debug!(records = reply.records().len(), "Reply asks for a local export");
                if reply.records().is_empty() {
                    self.ui.info("No hay datos para exportar.");
                } else if self.ui.confirm("¿Guardar estos datos como reporte local?", true)? {
                    self.save_report(reply.records(), CHAT_BASE_NAME)?;
                }
            }
        }
    }
}
