//! Report kinds and the requests that produce them
//!
//! Each report the console offers maps to a fixed workflow intent, a canned
//! query text, an export file base name and a "no data" message.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{Result, ServiceError};
use crate::request::{validate_email, validate_query, validate_tracking_code, ReportRequestBuilder};
use crate::services::workflow::OutboundRequest;
use crate::session::SessionId;

/// Base name for records exported from the free chat
pub const CHAT_BASE_NAME: &str = "reporte_chat_piki";

/// Intent for a single shipment lookup
pub const STATUS_INTENT: &str = "consultar_estado";

/// Reports the workflow knows how to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    FailedShipments,
    CourierLocality,
    CustomQuery,
}

impl ReportKind {
    /// Intent used when the report is exported locally
    pub fn intent(&self) -> &'static str {
        match self {
            ReportKind::FailedShipments => "reporte_fallidos",
            ReportKind::CourierLocality => "reporte_repartidor_localidad",
            ReportKind::CustomQuery => "consulta_personalizada",
        }
    }

    /// `tipo` parameter of a shared report
    pub fn share_tag(&self) -> &'static str {
        match self {
            ReportKind::FailedShipments => "fallidos",
            ReportKind::CourierLocality => "repartidores",
            ReportKind::CustomQuery => "personalizado",
        }
    }

    /// Intent used when the workflow shares the report itself
    pub fn share_intent(&self) -> String {
        format!("compartir_{}", self.share_tag())
    }

    /// Canned query text; custom queries carry the user's own
    pub fn query_text(&self) -> Option<&'static str> {
        match self {
            ReportKind::FailedShipments => Some("Generar reporte de envíos fallidos"),
            ReportKind::CourierLocality => Some("Generar reporte de localidad o repartidor"),
            ReportKind::CustomQuery => None,
        }
    }

    /// File base name for the exported table
    pub fn base_name(&self) -> &'static str {
        match self {
            ReportKind::FailedShipments => "reporte_envios_fallidos",
            ReportKind::CourierLocality => "reporte_localidad_repartidor",
            ReportKind::CustomQuery => "reporte_consulta_personalizada",
        }
    }

    /// Shown when the reply normalizes to zero records
    pub fn no_data_message(&self) -> &'static str {
        match self {
            ReportKind::FailedShipments => "No hay envíos fallidos para generar el reporte.",
            ReportKind::CourierLocality => "No hay datos para el filtro proporcionado.",
            ReportKind::CustomQuery => "La consulta no devolvió datos para generar un reporte.",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ReportKind::FailedShipments => "el reporte de envíos fallidos",
            ReportKind::CourierLocality => "el reporte de repartidores",
            ReportKind::CustomQuery => "el reporte personalizado solicitado",
        }
    }

    /// Request for a report that will be saved on this machine
    pub fn local_request(
        &self,
        session_id: &SessionId,
        custom_query: Option<&str>,
        filter: Option<&CourierFilter>,
    ) -> Result<OutboundRequest> {
        let query = self.resolve_query(custom_query)?;
        let mut builder = ReportRequestBuilder::new(query, session_id).intent(self.intent());

        if let Some(filter) = filter {
            // local reports send unset filters as explicit nulls
            builder = builder
                .param("localidad", filter.locality.clone())
                .param("repartidor", filter.courier.clone());
        }

        builder.build()
    }

    /// Request asking the workflow to generate and share the report
    pub fn share_request(
        &self,
        session_id: &SessionId,
        platform: SharePlatform,
        custom_query: Option<&str>,
        filter: Option<&CourierFilter>,
        recipient: Option<&str>,
    ) -> Result<OutboundRequest> {
        let query = match self {
            ReportKind::CustomQuery => self.resolve_query(custom_query)?,
            _ => format!("Compartir {} mediante {}", self.description(), platform),
        };

        let mut builder = ReportRequestBuilder::new(query.clone(), session_id)
            .intent(self.share_intent())
            .param("tipo", self.share_tag())
            .param("plataforma", platform.as_str());

        if let Some(filter) = filter {
            builder = builder
                .param_opt("localidad", filter.locality.clone())
                .param_opt("repartidor", filter.courier.clone());
        }

        if *self == ReportKind::CustomQuery {
            builder = builder.param("consulta", query);
        }

        match (platform, recipient) {
            (SharePlatform::Gmail, Some(email)) => {
                builder = builder.param("email_destinatario", validate_email(email)?);
            }
            (SharePlatform::Gmail, None) => {
                return Err(ServiceError::validation("Gmail requiere un correo de destino."));
            }
            (SharePlatform::Drive, _) => {}
        }

        builder.build()
    }

    fn resolve_query(&self, custom_query: Option<&str>) -> Result<String> {
        match (self.query_text(), custom_query) {
            (Some(canned), _) => Ok(canned.to_string()),
            (None, Some(text)) => Ok(validate_query(text)?.to_string()),
            (None, None) => Err(ServiceError::validation("La consulta no puede estar vacía.")),
        }
    }
}

/// Request for the status of one shipment
pub fn status_request(session_id: &SessionId, code: &str) -> Result<OutboundRequest> {
    let code = validate_tracking_code(code)?;
    let mut params = Map::new();
    params.insert("codigo".to_string(), Value::from(code));

    ReportRequestBuilder::new(format!("Consultar estado del envío con código {}", code), session_id)
        .intent(STATUS_INTENT)
        .params(params)
        .build()
}

/// Where a shared report is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Drive,
    Gmail,
}

impl SharePlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            SharePlatform::Drive => "drive",
            SharePlatform::Gmail => "gmail",
        }
    }
}

impl fmt::Display for SharePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SharePlatform {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "drive" => Ok(SharePlatform::Drive),
            "gmail" => Ok(SharePlatform::Gmail),
            other => Err(ServiceError::validation(format!("Plataforma desconocida: {}", other))),
        }
    }
}

/// Courier and/or locality filter; at least one side is set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourierFilter {
    locality: Option<String>,
    courier: Option<String>,
}

impl CourierFilter {
    pub fn by_locality(locality: &str) -> Result<Self> {
        Ok(Self {
            locality: Some(non_blank(locality, "La localidad no puede estar vacía.")?),
            courier: None,
        })
    }

    pub fn by_courier(courier: &str) -> Result<Self> {
        Ok(Self {
            locality: None,
            courier: Some(non_blank(courier, "El nombre del repartidor no puede estar vacío.")?),
        })
    }

    pub fn by_both(locality: &str, courier: &str) -> Result<Self> {
        if locality.trim().is_empty() || courier.trim().is_empty() {
            return Err(ServiceError::validation("Debe completar ambos campos."));
        }
        Ok(Self {
            locality: Some(locality.trim().to_string()),
            courier: Some(courier.trim().to_string()),
        })
    }

    pub fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }

    pub fn courier(&self) -> Option<&str> {
        self.courier.as_deref()
    }
}

fn non_blank(value: &str, message: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ServiceError::validation(message))
    } else {
        Ok(trimmed.to_string())
    }
}
