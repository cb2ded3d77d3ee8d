use serde::Deserialize;
use validator::Validate;

use crate::domain::event::{Event, NewEvent, UpdateEvent};
use crate::domain::types::EventStatus;
use crate::forms::{FieldKind, FieldSpec, FieldValues, FormError, SelectOption, datetime_initial};

const DEFAULT_CAPACITY: i64 = 5;

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct EventForm {
    #[validate(length(min = 1, message = "tipo_reunion is required"))]
    pub tipo_reunion: String,
    #[validate(length(min = 1, message = "fecha_hora is required"))]
    pub fecha_hora: String,
    #[serde(default)]
    pub capacidad_total: String,
    #[serde(default)]
    pub estado: String,
}

impl EventForm {
    pub fn from_values(values: &FieldValues) -> Result<Self, FormError> {
        let form: Self = serde_json::from_value(serde_json::to_value(values)?)?;
        form.validate()
            .map_err(|err| FormError::Invalid(err.to_string()))?;
        Ok(form)
    }

    fn capacity(&self) -> Result<i64, FormError> {
        let trimmed = self.capacidad_total.trim();
        if trimmed.is_empty() {
            return Ok(DEFAULT_CAPACITY);
        }
        trimmed
            .parse()
            .map_err(|_| FormError::InvalidNumber("capacidad_total"))
    }

    fn status(&self) -> EventStatus {
        EventStatus::parse(&self.estado).unwrap_or(EventStatus::Disponible)
    }

    pub fn into_new(self) -> Result<NewEvent, FormError> {
        let capacidad = self.capacity()?;
        let estado = self.status();
        Ok(NewEvent::new(self.tipo_reunion, self.fecha_hora, capacidad, estado))
    }

    pub fn into_update(self) -> Result<UpdateEvent, FormError> {
        let capacidad = self.capacity()?;
        let estado = self.status();
        Ok(UpdateEvent::new(self.tipo_reunion, self.fecha_hora, capacidad, estado))
    }
}

/// Field set of the event modal.
pub fn event_fields(existing: Option<&Event>) -> Vec<FieldSpec> {
    let capacity = existing
        .and_then(|e| e.capacidad_total)
        .unwrap_or(DEFAULT_CAPACITY);
    let status = existing
        .and_then(|e| e.estado)
        .unwrap_or(EventStatus::Disponible);

    vec![
        FieldSpec::new("tipo_reunion", "Tipo de Reunión", FieldKind::Text)
            .initial(
                existing
                    .and_then(|e| e.tipo_reunion.as_deref())
                    .unwrap_or_default(),
            )
            .required(),
        FieldSpec::new("fecha_hora", "Fecha y Hora", FieldKind::DateTime)
            .initial(datetime_initial(
                existing.and_then(|e| e.fecha_hora.as_deref()),
            ))
            .required(),
        FieldSpec::new("capacidad_total", "Capacidad Total", FieldKind::Number)
            .initial(capacity.to_string()),
        FieldSpec::new(
            "estado",
            "Estado",
            FieldKind::Select(
                EventStatus::ALL
                    .iter()
                    .map(|s| SelectOption::new(s.as_str(), s.label()))
                    .collect(),
            ),
        )
        .initial(status.as_str()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_capacity_falls_back_to_the_default() {
        let form = EventForm::from_values(&values(&[
            ("tipo_reunion", "Demo"),
            ("fecha_hora", "2026-03-01T10:00"),
            ("capacidad_total", ""),
            ("estado", "disponible"),
        ]))
        .unwrap();
        assert_eq!(form.into_new().unwrap().capacidad_total, DEFAULT_CAPACITY);
    }

    #[test]
    fn non_numeric_capacity_is_rejected() {
        let form = EventForm::from_values(&values(&[
            ("tipo_reunion", "Demo"),
            ("fecha_hora", "2026-03-01T10:00"),
            ("capacidad_total", "muchos"),
            ("estado", "lleno"),
        ]))
        .unwrap();
        assert!(matches!(
            form.into_new(),
            Err(FormError::InvalidNumber("capacidad_total"))
        ));
    }

    #[test]
    fn stored_timestamps_prefill_in_editable_form() {
        let event = Event {
            id: crate::domain::types::RecordId::new(1),
            tipo_reunion: Some("Demo".into()),
            fecha_hora: Some("2026-03-01T10:30:00+00:00".into()),
            capacidad_total: Some(10),
            inscritos_actuales: Some(2),
            estado: Some(EventStatus::Lleno),
        };
        let fields = event_fields(Some(&event));
        assert_eq!(fields[1].initial, "2026-03-01T10:30");
        assert_eq!(fields[3].initial, "lleno");
    }
}
