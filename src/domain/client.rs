use serde::{Deserialize, Serialize};

use crate::domain::types::RecordId;

/// One row of the remote `clientes` table.
///
/// The table's column names are not strictly fixed across deployments, so
/// reads go through accessors that try the canonical column first and fall
/// back to the known alias (`nombre`/`empresa`, `email`/`contacto`,
/// `telefono`/`phone`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: RecordId,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub empresa: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contacto: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Client {
    pub fn display_name(&self) -> Option<&str> {
        self.nombre.as_deref().or(self.empresa.as_deref())
    }

    pub fn contact_email(&self) -> Option<&str> {
        self.email.as_deref().or(self.contacto.as_deref())
    }

    pub fn contact_phone(&self) -> Option<&str> {
        self.telefono.as_deref().or(self.phone.as_deref())
    }
}

/// Insert payload for a client. Writes always use the canonical column
/// names; the aliases only exist on the read side.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewClient {
    pub nombre: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
}

impl NewClient {
    #[must_use]
    pub fn new(nombre: String, email: String, telefono: Option<String>) -> Self {
        Self {
            nombre: nombre.trim().to_string(),
            email: email.to_lowercase().trim().to_string(),
            telefono: telefono
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

/// Patch payload for a client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UpdateClient {
    pub nombre: String,
    pub email: String,
    pub telefono: Option<String>,
}

impl UpdateClient {
    #[must_use]
    pub fn new(nombre: String, email: String, telefono: Option<String>) -> Self {
        Self {
            nombre: nombre.trim().to_string(),
            email: email.to_lowercase().trim().to_string(),
            telefono: telefono
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}
