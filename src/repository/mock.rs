//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::call::{Call, CallWithRelations, NewCall, UpdateCall};
use crate::domain::candidate::{Candidate, NewCandidate, UpdateCandidate};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::event::{Event, NewEvent, UpdateEvent};
use crate::domain::types::RecordId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CallReader, CallWriter, CandidateReader, CandidateWriter, ClientReader, ClientWriter,
    EventReader, EventWriter, FlowResponse, FlowTrigger,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl CandidateReader for Repository {
        async fn list_candidates(&self) -> RepositoryResult<Vec<Candidate>>;
        async fn get_candidate_by_id(&self, id: RecordId) -> RepositoryResult<Option<Candidate>>;
    }

    #[async_trait]
    impl CandidateWriter for Repository {
        async fn create_candidate(&self, new_candidate: &NewCandidate) -> RepositoryResult<Candidate>;
        async fn update_candidate(
            &self,
            id: RecordId,
            updates: &UpdateCandidate,
        ) -> RepositoryResult<Candidate>;
        async fn delete_candidate(&self, id: RecordId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl ClientReader for Repository {
        async fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
        async fn get_client_by_id(&self, id: RecordId) -> RepositoryResult<Option<Client>>;
    }

    #[async_trait]
    impl ClientWriter for Repository {
        async fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        async fn update_client(&self, id: RecordId, updates: &UpdateClient) -> RepositoryResult<Client>;
        async fn delete_client(&self, id: RecordId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl EventReader for Repository {
        async fn list_events(&self) -> RepositoryResult<Vec<Event>>;
        async fn get_event_by_id(&self, id: RecordId) -> RepositoryResult<Option<Event>>;
    }

    #[async_trait]
    impl EventWriter for Repository {
        async fn create_event(&self, new_event: &NewEvent) -> RepositoryResult<Event>;
        async fn update_event(&self, id: RecordId, updates: &UpdateEvent) -> RepositoryResult<Event>;
        async fn delete_event(&self, id: RecordId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl CallReader for Repository {
        async fn list_calls(&self) -> RepositoryResult<Vec<Call>>;
        async fn get_call_by_id(&self, id: RecordId) -> RepositoryResult<Option<Call>>;
        async fn list_calls_with_relations(&self) -> RepositoryResult<Vec<CallWithRelations>>;
    }

    #[async_trait]
    impl CallWriter for Repository {
        async fn create_call(&self, new_call: &NewCall) -> RepositoryResult<Call>;
        async fn update_call(&self, id: RecordId, updates: &UpdateCall) -> RepositoryResult<Call>;
        async fn delete_call(&self, id: RecordId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl FlowTrigger for Repository {
        async fn trigger_flow(&self) -> RepositoryResult<FlowResponse>;
        async fn fetch_call_audio(&self, conversation_id: &str) -> RepositoryResult<Vec<u8>>;
    }
}
