use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{self, EventStatus, RecordId};

/// One row of the remote `eventos` table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: RecordId,
    #[serde(default)]
    pub tipo_reunion: Option<String>,
    /// Stored timestamp, kept verbatim; parse with [`Event::starts_at`].
    #[serde(default)]
    pub fecha_hora: Option<String>,
    #[serde(default)]
    pub capacidad_total: Option<i64>,
    #[serde(default)]
    pub inscritos_actuales: Option<i64>,
    #[serde(default, deserialize_with = "types::de_opt_event_status")]
    pub estado: Option<EventStatus>,
}

impl Event {
    /// Parsed start time, when the stored value is one of the known shapes.
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        self.fecha_hora.as_deref().and_then(types::parse_timestamp)
    }

    /// "inscritos/capacidad" occupancy cell, defaulting absent counts to 0.
    pub fn occupancy(&self) -> String {
        format!(
            "{}/{}",
            self.inscritos_actuales.unwrap_or(0),
            self.capacidad_total.unwrap_or(0)
        )
    }
}

/// Insert payload for an event. Enrollment starts at the store's default;
/// only the fields collected by the form travel.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewEvent {
    pub tipo_reunion: String,
    pub fecha_hora: String,
    pub capacidad_total: i64,
    pub estado: EventStatus,
}

impl NewEvent {
    #[must_use]
    pub fn new(tipo_reunion: String, fecha_hora: String, capacidad_total: i64, estado: EventStatus) -> Self {
        Self {
            tipo_reunion: tipo_reunion.trim().to_string(),
            fecha_hora: fecha_hora.trim().to_string(),
            capacidad_total,
            estado,
        }
    }
}

/// Patch payload for an event.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UpdateEvent {
    pub tipo_reunion: String,
    pub fecha_hora: String,
    pub capacidad_total: i64,
    pub estado: EventStatus,
}

impl UpdateEvent {
    #[must_use]
    pub fn new(tipo_reunion: String, fecha_hora: String, capacidad_total: i64, estado: EventStatus) -> Self {
        Self {
            tipo_reunion: tipo_reunion.trim().to_string(),
            fecha_hora: fecha_hora.trim().to_string(),
            capacidad_total,
            estado,
        }
    }
}
