use async_trait::async_trait;

use crate::domain::call::{Call, CallWithRelations, NewCall, UpdateCall};
use crate::domain::candidate::{Candidate, NewCandidate, UpdateCandidate};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::event::{Event, NewEvent, UpdateEvent};
use crate::domain::types::RecordId;
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod rest;

pub use rest::RestRepository;

/// Body relayed back from the automation webhook, kept raw so callers can
/// distinguish a JSON acknowledgment from an HTML page served by a
/// misconfigured deployment.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowResponse {
    pub content_type: Option<String>,
    pub body: String,
}

#[async_trait]
pub trait CandidateReader {
    async fn list_candidates(&self) -> RepositoryResult<Vec<Candidate>>;
    async fn get_candidate_by_id(&self, id: RecordId) -> RepositoryResult<Option<Candidate>>;
}

#[async_trait]
pub trait CandidateWriter {
    async fn create_candidate(&self, new_candidate: &NewCandidate) -> RepositoryResult<Candidate>;
    async fn update_candidate(
        &self,
        id: RecordId,
        updates: &UpdateCandidate,
    ) -> RepositoryResult<Candidate>;
    async fn delete_candidate(&self, id: RecordId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait ClientReader {
    async fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    async fn get_client_by_id(&self, id: RecordId) -> RepositoryResult<Option<Client>>;
}

#[async_trait]
pub trait ClientWriter {
    async fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    async fn update_client(
        &self,
        id: RecordId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client>;
    async fn delete_client(&self, id: RecordId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait EventReader {
    async fn list_events(&self) -> RepositoryResult<Vec<Event>>;
    async fn get_event_by_id(&self, id: RecordId) -> RepositoryResult<Option<Event>>;
}

#[async_trait]
pub trait EventWriter {
    async fn create_event(&self, new_event: &NewEvent) -> RepositoryResult<Event>;
    async fn update_event(&self, id: RecordId, updates: &UpdateEvent) -> RepositoryResult<Event>;
    async fn delete_event(&self, id: RecordId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait CallReader {
    async fn list_calls(&self) -> RepositoryResult<Vec<Call>>;
    async fn get_call_by_id(&self, id: RecordId) -> RepositoryResult<Option<Call>>;
    /// Calls with their candidate/event relations resolved — via the store's
    /// embedded join when possible, via the local-map fallback otherwise.
    async fn list_calls_with_relations(&self) -> RepositoryResult<Vec<CallWithRelations>>;
}

#[async_trait]
pub trait CallWriter {
    async fn create_call(&self, new_call: &NewCall) -> RepositoryResult<Call>;
    async fn update_call(&self, id: RecordId, updates: &UpdateCall) -> RepositoryResult<Call>;
    async fn delete_call(&self, id: RecordId) -> RepositoryResult<()>;
}

/// Operations relayed through the config/proxy endpoint rather than the
/// store: the automation webhook and call-recording retrieval.
#[async_trait]
pub trait FlowTrigger {
    async fn trigger_flow(&self) -> RepositoryResult<FlowResponse>;
    async fn fetch_call_audio(&self, conversation_id: &str) -> RepositoryResult<Vec<u8>>;
}
