use crate::domain::call::{Call, CallWithRelations};
use crate::domain::types::RecordId;
use crate::forms::FieldValues;
use crate::forms::call::CallForm;
use crate::repository::{CallReader, CallWriter, FlowTrigger};
use crate::services::{ServiceError, ServiceResult};

/// Call history with relations resolved; read failures degrade to an empty
/// list. The join-vs-fallback choice happens inside the repository — by the
/// time a result reaches this function it is already best-effort.
pub async fn load_calls<R>(repo: &R) -> Vec<CallWithRelations>
where
    R: CallReader + ?Sized,
{
    match repo.list_calls_with_relations().await {
        Ok(rows) => rows,
        Err(err) => {
            log::error!("Error fetching llamadas: {err}");
            Vec::new()
        }
    }
}

/// Single call lookup; read failures degrade to `None`.
pub async fn get_call<R>(repo: &R, id: RecordId) -> Option<Call>
where
    R: CallReader + ?Sized,
{
    match repo.get_call_by_id(id).await {
        Ok(found) => found,
        Err(err) => {
            log::error!("Error fetching llamada {id}: {err}");
            None
        }
    }
}

pub async fn save_call<R>(
    repo: &R,
    id: Option<RecordId>,
    values: &FieldValues,
) -> ServiceResult<Call>
where
    R: CallWriter + ?Sized,
{
    let form = CallForm::from_values(values)?;
    let saved = match id {
        Some(id) => repo.update_call(id, &form.into_update()?).await,
        None => repo.create_call(&form.into_new()?).await,
    };
    saved.map_err(|err| {
        log::error!("Error saving llamada: {err}");
        ServiceError::from(err)
    })
}

pub async fn delete_call<R>(repo: &R, id: RecordId) -> ServiceResult<()>
where
    R: CallWriter + ?Sized,
{
    repo.delete_call(id).await.map_err(|err| {
        log::error!("Error deleting llamada {id}: {err}");
        ServiceError::from(err)
    })
}

/// Downloads the recording of an automated call through the relay.
pub async fn fetch_call_audio<R>(repo: &R, conversation_id: &str) -> ServiceResult<Vec<u8>>
where
    R: FlowTrigger + ?Sized,
{
    repo.fetch_call_audio(conversation_id).await.map_err(|err| {
        log::error!("Error fetching call audio {conversation_id}: {err}");
        ServiceError::from(err)
    })
}
