use crate::domain::event::Event;

/// How many events the dashboard previews.
pub const UPCOMING_PREVIEW_LIMIT: usize = 5;

/// Headline totals of the dashboard cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_candidates: usize,
    pub total_clients: usize,
    pub total_events: usize,
    pub total_calls: usize,
}

/// One line of the "Próximos Eventos" preview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventPreviewRow {
    pub tipo: String,
    pub fecha: String,
    pub cupos: String,
}

impl From<&Event> for EventPreviewRow {
    fn from(event: &Event) -> Self {
        Self {
            tipo: event.tipo_reunion.clone().unwrap_or_else(|| "N/A".into()),
            fecha: event
                .fecha_hora
                .as_deref()
                .map(crate::domain::types::format_timestamp)
                .unwrap_or_else(|| "N/A".into()),
            cupos: event.occupancy(),
        }
    }
}

/// The soonest events first: parseable timestamps sort ascending, rows
/// without one keep their fetch order at the end.
pub fn upcoming_events(events: &[Event]) -> Vec<EventPreviewRow> {
    let mut ordered: Vec<&Event> = events.iter().collect();
    ordered.sort_by_key(|e| match e.starts_at() {
        Some(dt) => (0, Some(dt)),
        None => (1, None),
    });
    ordered
        .into_iter()
        .take(UPCOMING_PREVIEW_LIMIT)
        .map(EventPreviewRow::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{EventStatus, RecordId};

    fn event(id: i64, fecha: Option<&str>) -> Event {
        Event {
            id: RecordId::new(id),
            tipo_reunion: Some(format!("Evento {id}")),
            fecha_hora: fecha.map(str::to_string),
            capacidad_total: Some(5),
            inscritos_actuales: Some(1),
            estado: Some(EventStatus::Disponible),
        }
    }

    #[test]
    fn preview_sorts_soonest_first_and_caps_at_the_limit() {
        let events = vec![
            event(1, Some("2026-05-01T10:00")),
            event(2, None),
            event(3, Some("2026-04-01T10:00")),
            event(4, Some("2026-06-01T10:00")),
            event(5, Some("2026-03-01T10:00")),
            event(6, Some("2026-07-01T10:00")),
            event(7, Some("2026-08-01T10:00")),
        ];

        let preview = upcoming_events(&events);
        assert_eq!(preview.len(), UPCOMING_PREVIEW_LIMIT);
        assert_eq!(preview[0].tipo, "Evento 5");
        assert_eq!(preview[1].tipo, "Evento 3");
        assert_eq!(preview[4].tipo, "Evento 6");
    }

    #[test]
    fn rows_without_timestamps_sort_last_in_fetch_order() {
        let events = vec![event(1, None), event(2, Some("2026-03-01T10:00"))];
        let preview = upcoming_events(&events);
        assert_eq!(preview[0].tipo, "Evento 2");
        assert_eq!(preview[1].tipo, "Evento 1");
        assert_eq!(preview[1].fecha, "N/A");
    }
}
