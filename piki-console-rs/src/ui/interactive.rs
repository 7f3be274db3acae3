//! Interactive prompts

use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use piki_sdk::request::validate_email;
use piki_sdk::{CourierFilter, ExportFormat};

use super::formatter::Formatter;

/// Prompt and message helpers shared by every handler
pub struct Interactive {
    formatter: Formatter,
    theme: ColorfulTheme,
}

impl Interactive {
    pub fn with_formatter(formatter: Formatter) -> Self {
        Self {
            formatter,
            theme: ColorfulTheme::default(),
        }
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn title(&self, message: &str) {
        println!("{}", self.formatter.title(message));
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.formatter.info(message));
    }

    pub fn success(&self, message: &str) {
        println!("{}", self.formatter.success(message));
    }

    pub fn error(&self, message: &str) {
        println!("{}", self.formatter.error(message));
    }

    pub fn line(&self, message: &str) {
        println!("{}", message);
    }

    /// Pick one entry; returns its index
    pub fn select(&self, prompt: &str, items: &[&str]) -> Result<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .context("Failed to read menu selection")
    }

    /// Free text; may come back empty
    pub fn text(&self, prompt: &str) -> Result<String> {
        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .context("Failed to read input")?;
        Ok(value.trim().to_string())
    }

    /// Non-empty text, asked again until given
    pub fn required_text(&self, prompt: &str, empty_message: &'static str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .validate_with(move |input: &String| {
                if input.trim().is_empty() {
                    Err(empty_message)
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map(|value| value.trim().to_string())
            .context("Failed to read input")
    }

    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .context("Failed to read confirmation")
    }

    /// E-mail address, asked again until valid
    pub fn email(&self) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt("Ingrese el correo electrónico para la notificación")
            .validate_with(|input: &String| {
                validate_email(input).map(|_| ()).map_err(|_| "Correo inválido. Intente nuevamente.")
            })
            .interact_text()
            .map(|value| value.trim().to_string())
            .context("Failed to read e-mail")
    }

    /// Courier / locality criteria; `None` when the user cancels
    pub fn courier_filter(&self) -> Result<Option<CourierFilter>> {
        let options = [
            "Filtrar por localidad",
            "Filtrar por repartidor",
            "Filtrar por ambos",
            "Cancelar",
        ];

        loop {
            let choice = self.select("Seleccione el criterio para el reporte de repartidores", &options)?;
            let filter = match choice {
                0 => CourierFilter::by_locality(&self.text("Ingrese la localidad")?),
                1 => CourierFilter::by_courier(&self.text("Ingrese el nombre del repartidor")?),
                2 => {
                    let locality = self.text("Ingrese la localidad")?;
                    let courier = self.text("Ingrese el nombre del repartidor")?;
                    CourierFilter::by_both(&locality, &courier)
                }
                _ => return Ok(None),
            };

            match filter {
                Ok(filter) => return Ok(Some(filter)),
                Err(e) => self.error(e.detail()),
            }
        }
    }

    /// File format and target directory for a local report
    pub fn export_settings(&self, default_dir: &Path) -> Result<(ExportFormat, PathBuf)> {
        let format = match self.select(
            "Seleccione el formato del reporte",
            &["Excel (.xlsx)", "CSV (.csv)", "JSON (.json)"],
        )? {
            0 => ExportFormat::Xlsx,
            1 => ExportFormat::Csv,
            _ => ExportFormat::Json,
        };

        let directory: String = Input::with_theme(&self.theme)
            .with_prompt("Carpeta destino")
            .default(default_dir.display().to_string())
            .interact_text()
            .context("Failed to read directory")?;

        self.info(&format!(
            "Formato seleccionado: {} - Carpeta: {}",
            format.extension().to_uppercase(),
            directory
        ));
        Ok((format, PathBuf::from(directory.trim())))
    }

    /// Run `future` behind a spinner
    pub async fn with_spinner<F, T>(&self, message: &str, future: F) -> T
    where
        F: Future<Output = T>,
    {
        let spinner = self.formatter.spinner(message);
        let result = future.await;
        spinner.finish_and_clear();
        result
    }
}
