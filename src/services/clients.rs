use crate::domain::client::Client;
use crate::domain::types::RecordId;
use crate::forms::FieldValues;
use crate::forms::client::ClientForm;
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};

/// Current client list; read failures degrade to an empty list.
pub async fn load_clients<R>(repo: &R) -> Vec<Client>
where
    R: ClientReader + ?Sized,
{
    match repo.list_clients().await {
        Ok(rows) => rows,
        Err(err) => {
            log::error!("Error fetching clientes: {err}");
            Vec::new()
        }
    }
}

/// Single client lookup; read failures degrade to `None`.
pub async fn get_client<R>(repo: &R, id: RecordId) -> Option<Client>
where
    R: ClientReader + ?Sized,
{
    match repo.get_client_by_id(id).await {
        Ok(found) => found,
        Err(err) => {
            log::error!("Error fetching cliente {id}: {err}");
            None
        }
    }
}

pub async fn save_client<R>(
    repo: &R,
    id: Option<RecordId>,
    values: &FieldValues,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let form = ClientForm::from_values(values)?;
    let saved = match id {
        Some(id) => repo.update_client(id, &form.into_update()).await,
        None => repo.create_client(&form.into_new()).await,
    };
    saved.map_err(|err| {
        log::error!("Error saving cliente: {err}");
        ServiceError::from(err)
    })
}

pub async fn delete_client<R>(repo: &R, id: RecordId) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    repo.delete_client(id).await.map_err(|err| {
        log::error!("Error deleting cliente {id}: {err}");
        ServiceError::from(err)
    })
}
