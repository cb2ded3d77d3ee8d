use crate::domain::event::Event;
use crate::domain::types::RecordId;
use crate::forms::FieldValues;
use crate::forms::event::EventForm;
use crate::repository::{EventReader, EventWriter};
use crate::services::{ServiceError, ServiceResult};

/// Current event list; read failures degrade to an empty list.
pub async fn load_events<R>(repo: &R) -> Vec<Event>
where
    R: EventReader + ?Sized,
{
    match repo.list_events().await {
        Ok(rows) => rows,
        Err(err) => {
            log::error!("Error fetching eventos: {err}");
            Vec::new()
        }
    }
}

/// Single event lookup; read failures degrade to `None`.
pub async fn get_event<R>(repo: &R, id: RecordId) -> Option<Event>
where
    R: EventReader + ?Sized,
{
    match repo.get_event_by_id(id).await {
        Ok(found) => found,
        Err(err) => {
            log::error!("Error fetching evento {id}: {err}");
            None
        }
    }
}

pub async fn save_event<R>(
    repo: &R,
    id: Option<RecordId>,
    values: &FieldValues,
) -> ServiceResult<Event>
where
    R: EventWriter + ?Sized,
{
    let form = EventForm::from_values(values)?;
    let saved = match id {
        Some(id) => repo.update_event(id, &form.into_update()?).await,
        None => repo.create_event(&form.into_new()?).await,
    };
    saved.map_err(|err| {
        log::error!("Error saving evento: {err}");
        ServiceError::from(err)
    })
}

pub async fn delete_event<R>(repo: &R, id: RecordId) -> ServiceResult<()>
where
    R: EventWriter + ?Sized,
{
    repo.delete_event(id).await.map_err(|err| {
        log::error!("Error deleting evento {id}: {err}");
        ServiceError::from(err)
    })
}
