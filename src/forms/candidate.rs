use serde::Deserialize;
use validator::Validate;

use crate::domain::candidate::{Candidate, NewCandidate, UpdateCandidate};
use crate::domain::types::CandidateStatus;
use crate::forms::{FieldKind, FieldSpec, FieldValues, FormError, SelectOption, non_empty};

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct CandidateForm {
    #[validate(length(min = 1, message = "nombre is required"))]
    pub nombre: String,
    #[validate(length(min = 1, message = "apellido is required"))]
    pub apellido: String,
    #[validate(length(min = 1, message = "telefono is required"))]
    pub telefono: String,
    #[serde(default)]
    pub correo: String,
    #[serde(default)]
    pub ciudad: String,
    #[serde(default)]
    pub estado_gestion: String,
}

impl CandidateForm {
    pub fn from_values(values: &FieldValues) -> Result<Self, FormError> {
        let form: Self = serde_json::from_value(serde_json::to_value(values)?)?;
        form.validate()
            .map_err(|err| FormError::Invalid(err.to_string()))?;
        Ok(form)
    }

    pub fn into_new(self) -> NewCandidate {
        NewCandidate::new(
            self.nombre,
            self.apellido,
            self.telefono,
            non_empty(self.correo),
            non_empty(self.ciudad),
            CandidateStatus::parse(&self.estado_gestion),
        )
    }

    pub fn into_update(self) -> UpdateCandidate {
        UpdateCandidate::new(
            self.nombre,
            self.apellido,
            self.telefono,
            non_empty(self.correo),
            non_empty(self.ciudad),
            CandidateStatus::parse(&self.estado_gestion),
        )
    }
}

/// Field set of the candidate modal, pre-populated when editing.
pub fn candidate_fields(existing: Option<&Candidate>) -> Vec<FieldSpec> {
    let status = existing.map(|c| c.estado_gestion).unwrap_or_default();
    let text = |field: Option<&str>| field.unwrap_or_default().to_string();

    vec![
        FieldSpec::new("nombre", "Nombre", FieldKind::Text)
            .initial(text(existing.and_then(|c| c.nombre.as_deref())))
            .required(),
        FieldSpec::new("apellido", "Apellido", FieldKind::Text)
            .initial(text(existing.and_then(|c| c.apellido.as_deref())))
            .required(),
        FieldSpec::new("telefono", "Teléfono", FieldKind::Tel)
            .initial(text(existing.and_then(|c| c.telefono.as_deref())))
            .required(),
        FieldSpec::new("correo", "Correo Electrónico", FieldKind::Email)
            .initial(text(existing.and_then(|c| c.correo.as_deref()))),
        FieldSpec::new("ciudad", "Ciudad", FieldKind::Text)
            .initial(text(existing.and_then(|c| c.ciudad.as_deref()))),
        FieldSpec::new(
            "estado_gestion",
            "Estado de Gestión",
            FieldKind::Select(
                CandidateStatus::ALL
                    .iter()
                    .map(|s| SelectOption::new(s.as_str(), s.label()))
                    .collect(),
            ),
        )
        .initial(status.as_str()),
    ]
}
