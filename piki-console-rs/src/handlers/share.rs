//! Reports generated and delivered by the workflow itself

use anyhow::Result;
use piki_sdk::{ReportKind, SharePlatform, WorkflowTransport};
use serde_json::Value;

use crate::app::{App, Screen};
use crate::ui::display::{description_of, link_of};
use crate::ui::APP_TITLE;

/// Outcome of the platform prompt
enum PlatformChoice {
    Platform(SharePlatform),
    Back,
    Exit,
}

impl<T: WorkflowTransport> App<T> {
    pub(crate) async fn share_menu(&self) -> Result<Screen> {
        let options = [
            "Compartir reporte de envíos fallidos",
            "Compartir reporte de repartidores",
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

            let filter = match kind {
                ReportKind::CourierLocality => match self.ui.courier_filter()? {
                    Some(filter) => Some(filter),
                    None => continue,
                },
                _ => None,
            };

            let query = match kind {
                ReportKind::CustomQuery => {
                    self.ui.info("Presiona Enter para volver al menú");
                    let query = self.ui.text("Ingrese la consulta personalizada que desea compartir")?;
                    if query.is_empty() || query == "0" {
                        self.ui.info("Operación cancelada.");
                        continue;
                    }
                    Some(query)
                }
                _ => None,
            };

            let platform = match self.platform()? {
                PlatformChoice::Platform(platform) => platform,
                PlatformChoice::Back => continue,
                PlatformChoice::Exit => return Ok(Screen::Exit),
            };

            let recipient = match platform {
                SharePlatform::Gmail => Some(self.ui.email()?),
                SharePlatform::Drive => None,
            };

            let request = match kind.share_request(
                self.conversation.session(),
                platform,
                query.as_deref(),
                filter.as_ref(),
                recipient.as_deref(),
            ) {
                Ok(request) => request,
                Err(e) if e.is_validation() => {
                    self.ui.error(e.detail());
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let reply = self
                .ui
                .with_spinner(
                    &format!("Generando {} para compartir", kind.description()),
                    self.conversation.dispatch(&request),
                )
                .await;

            if !reply.ok() {
                self.ui.error(&format!(
                    "Error al compartir el reporte: {}",
                    reply.message().unwrap_or("Error desconocido")
                ));
                return self.continue_menu();
            }

            let formatter = self.ui.formatter();
            if let Some(message) = reply.message() {
                self.ui.line(&formatter.assistant(message));
            }

            match reply.display_view() {
                Some(Value::Object(data)) => {
                    if let Some(link) = link_of(&data) {
                        self.ui.line(&formatter.link(link));
                    }
                    if let Some(description) = description_of(&data) {
                        self.ui.line(description);
                    }
                }
                Some(other) => self.show_data(&other),
                None if reply.message().is_none() => {
                    self.ui.success("n8n procesó la solicitud correctamente.");
                }
                None => {}
            }

            return self.continue_menu();
        }
    }

    fn platform(&self) -> Result<PlatformChoice> {
        let options = ["Drive", "Gmail", "Volver al menú anterior", "Salir"];
        Ok(match self.ui.select("Seleccione la plataforma para compartir", &options)? {
            0 => PlatformChoice::Platform(SharePlatform::Drive),
            1 => PlatformChoice::Platform(SharePlatform::Gmail),
            2 => PlatformChoice::Back,
            _ => PlatformChoice::Exit,
        })
    }
}
