//! Menu loop
//!
//! Navigation between the main, share and local menus. An error inside one
//! action is reported and the loop goes back to the main menu.

use std::path::PathBuf;

use anyhow::Result;
use piki_sdk::export::{preview, DEFAULT_PREVIEW_ROWS};
use piki_sdk::{Conversation, Record, TableExporter, WorkflowTransport};
use serde_json::Value;
use tracing::{error, info};

use crate::ui::display::{description_of, link_of, render_value, visible_fields};
use crate::ui::{Interactive, APP_TITLE};

/// Shown when a failed reply carries no message of its own
pub const NO_REPLY_MESSAGE: &str = "n8n no devolvió mensaje; no se pudo generar el reporte.";

const GOODBYE: &str = "Saliendo del programa. ¡Hasta luego! 👋";

/// Which menu is shown next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    Share,
    Local,
    Exit,
}

/// Console application state for one run
pub struct App<T: WorkflowTransport> {
    pub(crate) conversation: Conversation<T>,
    pub(crate) ui: Interactive,
    pub(crate) reports_dir: PathBuf,
}

impl<T: WorkflowTransport> App<T> {
    pub fn new(conversation: Conversation<T>, ui: Interactive, reports_dir: PathBuf) -> Self {
        Self {
            conversation,
            ui,
            reports_dir,
        }
    }

    pub async fn run(&self) -> Result<()> {
        info!(session = %self.conversation.session(), "Console session started");
        let mut screen = Screen::Main;

        while screen != Screen::Exit {
            let next = match screen {
                Screen::Main => self.main_menu().await,
                Screen::Share => self.share_menu().await,
                Screen::Local => self.local_menu().await,
                Screen::Exit => Ok(Screen::Exit),
            };

            screen = match next {
                Ok(next) => next,
                Err(e) => {
                    error!("Action failed: {:#}", e);
                    self.ui.error(&format!("Ocurrió un error: {}", e));
                    Screen::Main
                }
            };
        }

        self.ui.line(GOODBYE);
        Ok(())
    }

    async fn main_menu(&self) -> Result<Screen> {
        self.ui.title(APP_TITLE);
        let options = [
            "Consultar estado de un envío",
            "Generar reporte para compartir",
            "Chatear con Piki",
            "Generar reporte local",
            "Salir",
        ];

        match self.ui.select("Seleccione una opción", &options)? {
            0 => {
                self.shipment_status().await?;
                self.continue_menu()
            }
            1 => Ok(Screen::Share),
            2 => {
                self.chat().await?;
                self.continue_menu()
            }
            3 => Ok(Screen::Local),
            _ => Ok(Screen::Exit),
        }
    }

    /// Asked after every completed action
    pub(crate) fn continue_menu(&self) -> Result<Screen> {
        let options = [
            "Volver al menú principal - Consultar envíos y más opciones",
            "Generar reporte para compartir - Enviar por Drive o Gmail",
            "Generar reporte local - Descargar en tu computadora",
            "Salir",
        ];

        Ok(match self.ui.select("¿Qué deseas hacer ahora?", &options)? {
            0 => Screen::Main,
            1 => Screen::Share,
            2 => Screen::Local,
            _ => Screen::Exit,
        })
    }

    /// Print a reply's display view
    pub(crate) fn show_data(&self, data: &Value) {
        let formatter = self.ui.formatter();

        match data {
            Value::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    self.ui.line(&formatter.section(&format!("Registro {}", idx + 1)));
                    match item {
                        Value::Object(record) => self.show_fields(record),
                        other => self.ui.line(&render_value(other)),
                    }
                }
            }
            Value::Object(record) => {
                if let Some(link) = link_of(record) {
                    self.ui.line(&formatter.link(link));
                }
                if let Some(description) = description_of(record) {
                    self.ui.line(&formatter.note(description));
                }
                self.show_fields(record);
            }
            other => self.ui.line(&render_value(other)),
        }
    }

    fn show_fields(&self, record: &Record) {
        let formatter = self.ui.formatter();
        for (key, value) in visible_fields(record) {
            self.ui.line(&formatter.field(key, &render_value(value)));
        }
    }

    /// Ask for format and folder, then write the records
    pub(crate) fn save_report(&self, records: &[Record], base_name: &str) -> Result<()> {
        let (format, directory) = self.ui.export_settings(&self.reports_dir)?;
        self.ui.line(&preview(records, DEFAULT_PREVIEW_ROWS));

        match TableExporter::new(directory).export(records, base_name, format) {
            Ok(outcome) => {
                info!(path = %outcome.path.display(), rows = outcome.rows, "Report exported");
                self.ui
                    .line(&self.ui.formatter().saved_file(&outcome.path.display().to_string()));
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.ui.error(&format!("Error al generar el reporte: {}", e.detail()));
            }
        }
        Ok(())
    }
}
