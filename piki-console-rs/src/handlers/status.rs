//! Shipment status lookup

use anyhow::Result;
use piki_sdk::report::status_request;
use piki_sdk::WorkflowTransport;

use crate::app::App;

impl<T: WorkflowTransport> App<T> {
    pub(crate) async fn shipment_status(&self) -> Result<()> {
        let code = self.ui.text("Ingrese el código de envío")?;
        let request = match status_request(self.conversation.session(), &code) {
            Ok(request) => request,
            Err(e) if e.is_validation() => {
                self.ui.error(e.detail());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let reply = self
            .ui
            .with_spinner("Consultando el estado del envío", self.conversation.dispatch(&request))
            .await;

        if !reply.ok() {
            self.ui.error(&format!(
                "Error al consultar el envío: {}",
                reply.message().unwrap_or("Error desconocido")
            ));
            return Ok(());
        }

        if let Some(message) = reply.message() {
            self.ui.line(&self.ui.formatter().assistant(message));
        }

        match reply.display_view() {
            Some(data) => self.show_data(&data),
            None if reply.message().is_none() => {
                self.ui.info("No se encontró información para el código proporcionado.");
            }
            None => {}
        }
        Ok(())
    }
}
