//! Reports saved on this machine

use anyhow::Result;
use piki_sdk::{ReportKind, WorkflowTransport};

use crate::app::{App, Screen, NO_REPLY_MESSAGE};
use crate::ui::APP_TITLE;

impl<T: WorkflowTransport> App<T> {
    pub(crate) async fn local_menu(&self) -> Result<Screen> {
        let options = [
            "Descargar el reporte de envíos fallidos",
            "Descargar el reporte de repartidores",
            "Consulta personalizada",
            "Volver al menú principal",
            "Salir",
        ];

        loop {
            self.ui.title(APP_TITLE);
            let kind = match self.ui.select("Seleccione una opción", &options)? {
                0 => ReportKind::FailedShipments,
                1 => ReportKind::CourierLocality,
                2 => ReportKind::CustomQuery,
                3 => return Ok(Screen::Main),
                _ => return Ok(Screen::Exit),
            };

            if self.local_report(kind).await? {
                return self.continue_menu();
            }
        }
    }

    /// Returns false when the user backed out before anything was sent
    async fn local_report(&self, kind: ReportKind) -> Result<bool> {
        let filter = match kind {
            ReportKind::CourierLocality => match self.ui.courier_filter()? {
                Some(filter) => Some(filter),
                None => return Ok(false),
            },
            _ => None,
        };

        let query = match kind {
            ReportKind::CustomQuery => Some(self.ui.text("Ingrese su consulta personalizada")?),
            _ => None,
        };

        let request = match kind.local_request(self.conversation.session(), query.as_deref(), filter.as_ref()) {
            Ok(request) => request,
            Err(e) if e.is_validation() => {
                self.ui.error(e.detail());
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };

        let reply = self
            .ui
            .with_spinner(
                &format!("Consultando datos para {}", kind.description()),
                self.conversation.dispatch(&request),
            )
            .await;

        if !reply.ok() {
            self.ui.error(&format!("Error: {}", reply.message().unwrap_or(NO_REPLY_MESSAGE)));
            return Ok(true);
        }

        if reply.records().is_empty() {
            self.ui.info(kind.no_data_message());
        } else {
            self.save_report(reply.records(), kind.base_name())?;
        }

        if let Some(message) = reply.message() {
            self.ui.line(&self.ui.formatter().assistant(message));
        }
        Ok(true)
    }
}
