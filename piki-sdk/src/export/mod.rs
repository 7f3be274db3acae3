//! Tabular export of normalized records
//!
//! Records are flattened (`{"a": {"b": 1}}` becomes column `a.b`) and written
//! as an Excel sheet, CSV or a JSON array into a timestamped file.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use rust_xlsxwriter::{ColNum, RowNum, Workbook};
use serde_json::{Map, Value};

use crate::error::{Result, ServiceError};
use crate::normalize::{Record, VALUE_COLUMN};
use crate::util::truncate_string;

/// Rows shown by `preview` unless told otherwise
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Widest cell shown in a preview
const MAX_PREVIEW_CELL: usize = 30;

/// Worksheet name in Excel reports
pub const SHEET_NAME: &str = "Reporte";

/// Supported file formats; Excel is the default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ServiceError::validation(format!("Formato no soportado: {}", other))),
        }
    }
}

/// Where a report landed and how many rows it has
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub rows: usize,
}

/// Writes record lists into a target directory
#[derive(Debug, Clone)]
pub struct TableExporter {
    directory: PathBuf,
}

impl TableExporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Write `records` to `{directory}/{base_name}_{YYYYmmdd_HHMMSS}.{ext}`
    pub fn export(&self, records: &[Record], base_name: &str, format: ExportFormat) -> Result<ExportOutcome> {
        if records.is_empty() {
            return Err(ServiceError::export("No hay registros para exportar."));
        }

        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(file_name(base_name, format));

        match format {
            ExportFormat::Xlsx => write_xlsx(&path, records)?,
            ExportFormat::Csv => write_csv(&path, records)?,
            ExportFormat::Json => write_json(&path, records)?,
        }

        info!("Exported {} rows to {}", records.len(), path.display());
        Ok(ExportOutcome {
            path,
            rows: records.len(),
        })
    }
}

fn file_name(base_name: &str, format: ExportFormat) -> String {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("{}_{}.{}", base_name, stamp, format.extension())
}

fn write_csv(path: &Path, records: &[Record]) -> Result<()> {
    let rows: Vec<Record> = records.iter().map(flatten_record).collect();
    let header = columns(&rows);

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&header)?;
    for row in &rows {
        writer.write_record(header.iter().map(|column| cell_text(row.get(column))))?;
    }
    writer.flush()?;
    Ok(())
}

/// Header row first; numbers and booleans keep their cell type, nulls stay blank
fn write_xlsx(path: &Path, records: &[Record]) -> Result<()> {
    let rows: Vec<Record> = records.iter().map(flatten_record).collect();
    let header = columns(&rows);

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (c, column) in header.iter().enumerate() {
        sheet.write_string(0, col_num(c)?, column.as_str())?;
    }

    for (r, row) in rows.iter().enumerate() {
        let line = row_num(r + 1)?;
        for (c, column) in header.iter().enumerate() {
            let col = col_num(c)?;
            match row.get(column) {
                None | Some(Value::Null) => {}
                Some(Value::Bool(flag)) => {
                    sheet.write_boolean(line, col, *flag)?;
                }
                Some(Value::Number(n)) => match n.as_f64() {
                    Some(number) => {
                        sheet.write_number(line, col, number)?;
                    }
                    None => {
                        sheet.write_string(line, col, n.to_string())?;
                    }
                },
                Some(other) => {
                    sheet.write_string(line, col, cell_text(Some(other)))?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn row_num(index: usize) -> Result<RowNum> {
    RowNum::try_from(index)
        .map_err(|_| ServiceError::export(format!("demasiadas filas para Excel: {}", index)))
}

fn col_num(index: usize) -> Result<ColNum> {
    ColNum::try_from(index)
        .map_err(|_| ServiceError::export(format!("demasiadas columnas para Excel: {}", index)))
}

fn write_json(path: &Path, records: &[Record]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)
        .map_err(|e| ServiceError::export(format!("JSON error: {}", e)))?;
    writer.flush()?;
    Ok(())
}

/// Flatten nested objects into dotted keys; arrays stay as values
pub fn flatten_record(record: &Record) -> Record {
    let mut flat = Map::new();
    flatten_into(&mut flat, None, record);
    flat
}

fn flatten_into(flat: &mut Record, prefix: Option<&str>, object: &Map<String, Value>) {
    for (key, value) in object {
        let column = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.clone(),
        };

        match value {
            Value::Object(inner) if !inner.is_empty() => flatten_into(flat, Some(column.as_str()), inner),
            other => {
                flat.insert(column, other.clone());
            }
        }
    }
}

/// Union of keys in order of first appearance
pub fn columns(rows: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.iter().any(|existing| existing == key) {
                columns.push(key.clone());
            }
        }
    }
    if columns.is_empty() {
        columns.push(VALUE_COLUMN.to_string());
    }
    columns
}

/// Text form of one cell; missing and null cells are blank
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Plain-text table of the first `rows` records plus a row count
pub fn preview(records: &[Record], rows: usize) -> String {
    let mut out = String::from("=== Vista previa del reporte ===\n");
    if records.is_empty() {
        out.push_str("(Sin registros para mostrar)");
        return out;
    }

    let flat: Vec<Record> = records.iter().take(rows).map(flatten_record).collect();
    let header = columns(&flat);
    let cells: Vec<Vec<String>> = flat
        .iter()
        .map(|row| {
            header
                .iter()
                .map(|column| truncate_string(&cell_text(row.get(column)), MAX_PREVIEW_CELL))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    out.push_str(&format_line(&header, &widths));
    for row in &cells {
        out.push_str(&format_line(row, &widths));
    }

    if records.len() > rows {
        out.push_str(&format!("... ({} filas en total)", records.len()));
    } else {
        out.push_str(&format!("Total de filas: {}", records.len()));
    }
    out
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}
