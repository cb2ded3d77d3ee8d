use serde::{Deserialize, Serialize};

use crate::domain::types::{CandidateStatus, RecordId};

/// One row of the remote `candidatos` table.
///
/// Every column except the id is optional: the schema lives in the store and
/// older rows may predate columns added later.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    pub id: RecordId,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellido: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub ciudad: Option<String>,
    #[serde(default)]
    pub estado_gestion: CandidateStatus,
}

impl Candidate {
    /// Display name assembled from the name parts, e.g. "Ana Diaz".
    pub fn full_name(&self) -> String {
        let mut name = String::new();
        if let Some(nombre) = self.nombre.as_deref() {
            name.push_str(nombre.trim());
        }
        if let Some(apellido) = self.apellido.as_deref() {
            if !name.is_empty() {
                name.push(' ');
            }
            name.push_str(apellido.trim());
        }
        name
    }
}

/// Insert payload for a candidate; the store assigns the id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewCandidate {
    pub nombre: String,
    pub apellido: String,
    pub telefono: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ciudad: Option<String>,
    pub estado_gestion: CandidateStatus,
}

impl NewCandidate {
    #[must_use]
    pub fn new(
        nombre: String,
        apellido: String,
        telefono: String,
        correo: Option<String>,
        ciudad: Option<String>,
        estado_gestion: CandidateStatus,
    ) -> Self {
        Self {
            nombre: nombre.trim().to_string(),
            apellido: apellido.trim().to_string(),
            telefono: telefono.trim().to_string(),
            correo: correo
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            ciudad: ciudad
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            estado_gestion,
        }
    }
}

/// Patch payload for a candidate. The edit modal collects every field, so
/// updates carry the full column set rather than a sparse diff.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UpdateCandidate {
    pub nombre: String,
    pub apellido: String,
    pub telefono: String,
    pub correo: Option<String>,
    pub ciudad: Option<String>,
    pub estado_gestion: CandidateStatus,
}

impl UpdateCandidate {
    #[must_use]
    pub fn new(
        nombre: String,
        apellido: String,
        telefono: String,
        correo: Option<String>,
        ciudad: Option<String>,
        estado_gestion: CandidateStatus,
    ) -> Self {
        Self {
            nombre: nombre.trim().to_string(),
            apellido: apellido.trim().to_string(),
            telefono: telefono.trim().to_string(),
            correo: correo
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            ciudad: ciudad
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            estado_gestion,
        }
    }
}
