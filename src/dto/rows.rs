//! Table rows: pure projections from domain records to display cells.

use crate::domain::call::CallWithRelations;
use crate::domain::candidate::Candidate;
use crate::domain::client::Client;
use crate::domain::event::Event;
use crate::domain::types::{CandidateStatus, EventStatus, RecordId, format_timestamp};

/// Visual tone of a status badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeTone {
    /// Amber "pendiente" styling.
    Pending,
    /// Green "agendado" styling.
    Scheduled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub tone: BadgeTone,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateRow {
    pub id: RecordId,
    pub name: String,
    pub telefono: String,
    pub correo: String,
    pub ciudad: String,
    pub badge: Badge,
}

impl From<&Candidate> for CandidateRow {
    fn from(candidate: &Candidate) -> Self {
        let tone = if candidate.estado_gestion == CandidateStatus::Nuevo {
            BadgeTone::Pending
        } else {
            BadgeTone::Scheduled
        };
        Self {
            id: candidate.id,
            name: candidate.full_name(),
            telefono: or_na(candidate.telefono.as_deref()),
            correo: or_na(candidate.correo.as_deref()),
            ciudad: or_na(candidate.ciudad.as_deref()),
            badge: Badge {
                label: candidate.estado_gestion.label().to_string(),
                tone,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientRow {
    pub id: RecordId,
    pub name: String,
    pub contact: String,
    pub telefono: String,
}

impl From<&Client> for ClientRow {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: or_na(client.display_name()),
            contact: or_na(client.contact_email()),
            telefono: or_na(client.contact_phone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRow {
    pub id: RecordId,
    pub tipo: String,
    pub fecha: String,
    pub capacidad: String,
    pub inscritos: String,
    pub badge: Badge,
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        let tone = if event.estado == Some(EventStatus::Disponible) {
            BadgeTone::Scheduled
        } else {
            BadgeTone::Pending
        };
        Self {
            id: event.id,
            tipo: or_na(event.tipo_reunion.as_deref()),
            fecha: event
                .fecha_hora
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_else(|| "N/A".into()),
            capacidad: event.capacidad_total.unwrap_or(0).to_string(),
            inscritos: event.inscritos_actuales.unwrap_or(0).to_string(),
            badge: Badge {
                label: event
                    .estado
                    .map(|s| s.label().to_string())
                    .unwrap_or_else(|| "Otro".into()),
                tone,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallRow {
    pub id: RecordId,
    pub candidate: String,
    pub fecha: String,
    pub badge: Badge,
    pub evento: String,
    pub resumen: String,
    /// Set when the call carries a recording handle.
    pub conversation_id: Option<String>,
}

impl From<&CallWithRelations> for CallRow {
    fn from(row: &CallWithRelations) -> Self {
        let candidate = row
            .candidatos
            .as_ref()
            .map(|c| c.full_name())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Desconocido".into());
        let resultado = row.call.resultado.as_deref().unwrap_or_default();
        let tone = if resultado == "exitoso" {
            BadgeTone::Scheduled
        } else {
            BadgeTone::Pending
        };
        Self {
            id: row.call.id,
            candidate,
            fecha: row
                .call
                .fecha_hora_llamada
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_else(|| "N/A".into()),
            badge: Badge {
                label: if resultado.is_empty() {
                    "Pendiente".into()
                } else {
                    resultado.to_string()
                },
                tone,
            },
            evento: row
                .eventos
                .as_ref()
                .and_then(|e| e.tipo_reunion.clone())
                .unwrap_or_else(|| "Ninguno".into()),
            resumen: row
                .call
                .resumen
                .clone()
                .unwrap_or_else(|| "Sin resumen".into()),
            conversation_id: row.call.conversation_id.clone(),
        }
    }
}

fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "N/A".into(),
    }
}
