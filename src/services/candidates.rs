use crate::domain::candidate::Candidate;
use crate::domain::types::RecordId;
use crate::forms::FieldValues;
use crate::forms::candidate::CandidateForm;
use crate::repository::{CandidateReader, CandidateWriter};
use crate::services::{ServiceError, ServiceResult};

/// Current candidate list; read failures degrade to an empty list.
pub async fn load_candidates<R>(repo: &R) -> Vec<Candidate>
where
    R: CandidateReader + ?Sized,
{
    match repo.list_candidates().await {
        Ok(rows) => rows,
        Err(err) => {
            log::error!("Error fetching candidatos: {err}");
            Vec::new()
        }
    }
}

/// Single candidate lookup; read failures degrade to `None`.
pub async fn get_candidate<R>(repo: &R, id: RecordId) -> Option<Candidate>
where
    R: CandidateReader + ?Sized,
{
    match repo.get_candidate_by_id(id).await {
        Ok(found) => found,
        Err(err) => {
            log::error!("Error fetching candidato {id}: {err}");
            None
        }
    }
}

/// Creates or updates a candidate from a submitted modal, depending on
/// whether an id is being edited.
pub async fn save_candidate<R>(
    repo: &R,
    id: Option<RecordId>,
    values: &FieldValues,
) -> ServiceResult<Candidate>
where
    R: CandidateWriter + ?Sized,
{
    let form = CandidateForm::from_values(values)?;
    let saved = match id {
        Some(id) => repo.update_candidate(id, &form.into_update()).await,
        None => repo.create_candidate(&form.into_new()).await,
    };
    saved.map_err(|err| {
        log::error!("Error saving candidato: {err}");
        ServiceError::from(err)
    })
}

pub async fn delete_candidate<R>(repo: &R, id: RecordId) -> ServiceResult<()>
where
    R: CandidateWriter + ?Sized,
{
    repo.delete_candidate(id).await.map_err(|err| {
        log::error!("Error deleting candidato {id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    #[tokio::test]
    async fn load_degrades_read_failures_to_an_empty_list() {
        let mut repo = MockRepository::new();
        repo.expect_list_candidates().returning(|| {
            Err(RepositoryError::Transport("connection refused".into()))
        });
        assert!(load_candidates(&repo).await.is_empty());
    }

    #[tokio::test]
    async fn save_propagates_write_failures() {
        let mut repo = MockRepository::new();
        repo.expect_create_candidate().returning(|_| {
            Err(RepositoryError::Store {
                status: 400,
                message: "bad request".into(),
            })
        });

        let mut values = FieldValues::new();
        values.insert("nombre".into(), "Ana".into());
        values.insert("apellido".into(), "Diaz".into());
        values.insert("telefono".into(), "555".into());

        let err = save_candidate(&repo, None, &values).await.unwrap_err();
        assert!(matches!(err, ServiceError::Repository(_)));
    }

    #[tokio::test]
    async fn save_rejects_incomplete_forms_before_any_write() {
        // No expectations on the mock: a write attempt would panic.
        let repo = MockRepository::new();
        let mut values = FieldValues::new();
        values.insert("nombre".into(), "Ana".into());
        values.insert("apellido".into(), "".into());
        values.insert("telefono".into(), "555".into());

        let err = save_candidate(&repo, None, &values).await.unwrap_err();
        assert!(matches!(err, ServiceError::Form(_)));
    }
}
