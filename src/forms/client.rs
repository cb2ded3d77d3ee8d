use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::forms::{FieldKind, FieldSpec, FieldValues, FormError, non_empty};

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct ClientForm {
    #[validate(length(min = 1, message = "nombre is required"))]
    pub nombre: String,
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[serde(default)]
    pub telefono: String,
}

impl ClientForm {
    pub fn from_values(values: &FieldValues) -> Result<Self, FormError> {
        let form: Self = serde_json::from_value(serde_json::to_value(values)?)?;
        form.validate()
            .map_err(|err| FormError::Invalid(err.to_string()))?;
        Ok(form)
    }

    pub fn into_new(self) -> NewClient {
        NewClient::new(self.nombre, self.email, non_empty(self.telefono))
    }

    pub fn into_update(self) -> UpdateClient {
        UpdateClient::new(self.nombre, self.email, non_empty(self.telefono))
    }
}

/// Field set of the client modal; prefills read through the alias fallbacks
/// so a row stored under `empresa`/`contacto`/`phone` still edits cleanly.
pub fn client_fields(existing: Option<&Client>) -> Vec<FieldSpec> {
    let text = |field: Option<&str>| field.unwrap_or_default().to_string();

    vec![
        FieldSpec::new("nombre", "Nombre / Empresa", FieldKind::Text)
            .initial(text(existing.and_then(|c| c.display_name())))
            .required(),
        FieldSpec::new("email", "Email de Contacto", FieldKind::Email)
            .initial(text(existing.and_then(|c| c.contact_email())))
            .required(),
        FieldSpec::new("telefono", "Teléfono", FieldKind::Text)
            .initial(text(existing.and_then(|c| c.contact_phone()))),
    ]
}
