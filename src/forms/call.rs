use serde::Deserialize;
use validator::Validate;

use crate::domain::call::{Call, NewCall, UpdateCall};
use crate::domain::candidate::Candidate;
use crate::domain::event::Event;
use crate::domain::types::RecordId;
use crate::forms::{
    FieldKind, FieldSpec, FieldValues, FormError, SelectOption, datetime_initial, non_empty,
};

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct CallForm {
    #[validate(length(min = 1, message = "fecha_hora_llamada is required"))]
    pub fecha_hora_llamada: String,
    #[validate(length(min = 1, message = "resultado is required"))]
    pub resultado: String,
    #[serde(default)]
    pub resumen: String,
    #[serde(default)]
    pub candidato_id: String,
    #[serde(default)]
    pub evento_id: String,
}

impl CallForm {
    pub fn from_values(values: &FieldValues) -> Result<Self, FormError> {
        let form: Self = serde_json::from_value(serde_json::to_value(values)?)?;
        form.validate()
            .map_err(|err| FormError::Invalid(err.to_string()))?;
        Ok(form)
    }

    fn reference(
        raw: &str,
        field: &'static str,
    ) -> Result<Option<RecordId>, FormError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse()
            .map(Some)
            .map_err(|_| FormError::InvalidReference(field))
    }

    pub fn into_new(self) -> Result<NewCall, FormError> {
        let candidato = Self::reference(&self.candidato_id, "candidato_id")?;
        let evento = Self::reference(&self.evento_id, "evento_id")?;
        Ok(NewCall::new(
            self.fecha_hora_llamada,
            self.resultado,
            non_empty(self.resumen),
            candidato,
            evento,
        ))
    }

    pub fn into_update(self) -> Result<UpdateCall, FormError> {
        let candidato = Self::reference(&self.candidato_id, "candidato_id")?;
        let evento = Self::reference(&self.evento_id, "evento_id")?;
        Ok(UpdateCall::new(
            self.fecha_hora_llamada,
            self.resultado,
            non_empty(self.resumen),
            candidato,
            evento,
        ))
    }
}

/// Field set of the call modal. The candidate/event references are offered
/// as selects over the locally held record lists.
pub fn call_fields(
    existing: Option<&Call>,
    candidates: &[Candidate],
    events: &[Event],
) -> Vec<FieldSpec> {
    let mut candidate_options = vec![SelectOption::new("", "Ninguno")];
    candidate_options.extend(
        candidates
            .iter()
            .map(|c| SelectOption::new(c.id.to_string(), c.full_name())),
    );

    let mut event_options = vec![SelectOption::new("", "Ninguno")];
    event_options.extend(events.iter().map(|e| {
        SelectOption::new(
            e.id.to_string(),
            e.tipo_reunion.as_deref().unwrap_or("N/A"),
        )
    }));

    let fk = |primary: Option<RecordId>, variant: Option<RecordId>| {
        primary
            .or(variant)
            .map(|id| id.to_string())
            .unwrap_or_default()
    };

    vec![
        FieldSpec::new("fecha_hora_llamada", "Fecha/Hora", FieldKind::DateTime)
            .initial(datetime_initial(
                existing.and_then(|c| c.fecha_hora_llamada.as_deref()),
            ))
            .required(),
        FieldSpec::new("resultado", "Resultado", FieldKind::Text)
            .initial(
                existing
                    .and_then(|c| c.resultado.as_deref())
                    .unwrap_or_default(),
            )
            .required(),
        FieldSpec::new("candidato_id", "Candidato", FieldKind::Select(candidate_options))
            .initial(existing.map(|c| fk(c.candidato_id, c.id_candidato)).unwrap_or_default()),
        FieldSpec::new("evento_id", "Evento Asignado", FieldKind::Select(event_options))
            .initial(existing.map(|c| fk(c.evento_id, c.id_evento)).unwrap_or_default()),
        FieldSpec::new("resumen", "Resumen", FieldKind::TextArea).initial(
            existing
                .and_then(|c| c.resumen.as_deref())
                .unwrap_or_default(),
        ),
    ]
}
