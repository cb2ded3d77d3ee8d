//! Typed values shared by the domain entities.
//!
//! Records come from a remote store whose schema is enforced server-side, so
//! the wrappers here stay deliberately forgiving on reads: unknown status
//! strings degrade to a sentinel instead of failing deserialization.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is not a plain integer.
    #[error("invalid record id")]
    InvalidId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Store-assigned identifier of a record.
///
/// Identifiers are interpolated into `id=eq.<id>` filter positions of remote
/// requests; keeping them numeric is the integrity guarantee that a crafted
/// value can never smuggle extra filter operators into the query string.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw `i64` backing this identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for RecordId {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| TypeConstraintError::InvalidId)
    }
}

/// Management status of a candidate.
///
/// Unknown or missing values read as [`CandidateStatus::Nuevo`]; that is the
/// sentinel the dashboard classification treats as "pending".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CandidateStatus {
    #[default]
    Nuevo,
    Contactado,
    Entrevistado,
    Rechazado,
    Contratado,
}

impl CandidateStatus {
    pub const ALL: [CandidateStatus; 5] = [
        CandidateStatus::Nuevo,
        CandidateStatus::Contactado,
        CandidateStatus::Entrevistado,
        CandidateStatus::Rechazado,
        CandidateStatus::Contratado,
    ];

    /// Parses a stored status string, degrading unknown values to `Nuevo`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "contactado" => CandidateStatus::Contactado,
            "entrevistado" => CandidateStatus::Entrevistado,
            "rechazado" => CandidateStatus::Rechazado,
            "contratado" => CandidateStatus::Contratado,
            _ => CandidateStatus::Nuevo,
        }
    }

    /// Wire value stored by the remote table.
    pub const fn as_str(self) -> &'static str {
        match self {
            CandidateStatus::Nuevo => "nuevo",
            CandidateStatus::Contactado => "contactado",
            CandidateStatus::Entrevistado => "entrevistado",
            CandidateStatus::Rechazado => "rechazado",
            CandidateStatus::Contratado => "contratado",
        }
    }

    /// Human-facing label shown in badges and selects.
    pub const fn label(self) -> &'static str {
        match self {
            CandidateStatus::Nuevo => "Nuevo",
            CandidateStatus::Contactado => "Contactado",
            CandidateStatus::Entrevistado => "Entrevistado",
            CandidateStatus::Rechazado => "Rechazado",
            CandidateStatus::Contratado => "Contratado",
        }
    }
}

impl Display for CandidateStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CandidateStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CandidateStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse).unwrap_or_default())
    }
}

/// Scheduling status of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventStatus {
    Disponible,
    Lleno,
    Finalizado,
}

impl EventStatus {
    pub const ALL: [EventStatus; 3] = [
        EventStatus::Disponible,
        EventStatus::Lleno,
        EventStatus::Finalizado,
    ];

    /// Parses a stored status string; values outside the enumeration are
    /// surfaced as `None` and rendered as "Otro".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "disponible" => Some(EventStatus::Disponible),
            "lleno" => Some(EventStatus::Lleno),
            "finalizado" => Some(EventStatus::Finalizado),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EventStatus::Disponible => "disponible",
            EventStatus::Lleno => "lleno",
            EventStatus::Finalizado => "finalizado",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EventStatus::Disponible => "Disponible",
            EventStatus::Lleno => "Lleno",
            EventStatus::Finalizado => "Finalizado",
        }
    }
}

impl Display for EventStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown event status: {raw}")))
    }
}

/// Lenient deserializer for optional status columns: unknown strings become
/// `None` instead of failing the whole row.
pub(crate) fn de_opt_event_status<'de, D>(deserializer: D) -> Result<Option<EventStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(EventStatus::parse))
}

/// Parses the timestamp representations the store is known to emit: RFC 3339
/// with offset, bare ISO with seconds, and the `datetime-local` form without.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Formats a stored timestamp for tables; unparseable values pass through
/// verbatim so the user still sees what the store holds.
pub fn format_timestamp(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => value.trim().to_string(),
    }
}
