//! Repository implementation over the hosted store's REST interface.
//!
//! Speaks the store's filter-query conventions (`?select=*`, `?id=eq.<id>`,
//! embedded relations) and sends `Prefer: return=representation` so every
//! write echoes the mutated row. Webhook and recording traffic goes through
//! the config/proxy endpoint instead, keeping privileged secrets out of
//! this process entirely.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::call::{
    Call, CallWithRelations, NewCall, RelatedCandidate, RelatedEvent, UpdateCall,
};
use crate::domain::candidate::{Candidate, NewCandidate, UpdateCandidate};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::event::{Event, NewEvent, UpdateEvent};
use crate::domain::types::RecordId;
use crate::models::config::ClientConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CallReader, CallWriter, CandidateReader, CandidateWriter, ClientReader, ClientWriter,
    EventReader, EventWriter, FlowResponse, FlowTrigger,
};

const CANDIDATES: &str = "candidatos";
const CLIENTS: &str = "clientes";
const EVENTS: &str = "eventos";
const CALLS: &str = "llamadas";

const CALLS_JOINED_QUERY: &str =
    "llamadas?select=*,candidatos(nombre,apellido),eventos(tipo_reunion)";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Data access client over the remote store plus the proxy relay routes.
#[derive(Clone, Debug)]
pub struct RestRepository {
    http: reqwest::Client,
    base_url: String,
    proxy_url: String,
}

impl RestRepository {
    /// Retrieves connection configuration from the proxy's `/api/config`
    /// and builds a ready-to-use repository. Any failure here leaves the
    /// application without a usable data client, so callers surface it to
    /// the user instead of continuing.
    pub async fn connect(proxy_url: &str) -> RepositoryResult<Self> {
        let bootstrap = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        let url = format!("{}/api/config", proxy_url.trim_end_matches('/'));
        let response = check(bootstrap.get(&url).send().await?).await?;
        let config: ClientConfig = response.json().await?;
        Self::with_config(proxy_url, &config)
    }

    /// Builds the repository from an already retrieved configuration.
    pub fn with_config(proxy_url: &str, config: &ClientConfig) -> RepositoryResult<Self> {
        let mut headers = HeaderMap::new();
        let apikey = HeaderValue::from_str(&config.supabase_anon_key)
            .map_err(|_| RepositoryError::Configuration("invalid access key".to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.supabase_anon_key))
            .map_err(|_| RepositoryError::Configuration("invalid access key".to_string()))?;
        headers.insert("apikey", apikey);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: format!("{}/rest/v1", config.supabase_url.trim_end_matches('/')),
            proxy_url: proxy_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_rows<T: DeserializeOwned>(&self, path_and_query: &str) -> RepositoryResult<Vec<T>> {
        let url = format!("{}/{}", self.base_url, path_and_query);
        let response = check(self.http.get(&url).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn fetch_by_id<T: DeserializeOwned>(
        &self,
        table: &str,
        id: RecordId,
    ) -> RepositoryResult<Option<T>> {
        let mut rows = self
            .fetch_rows::<T>(&format!("{table}?id=eq.{id}&select=*"))
            .await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }

    async fn insert_row<T, B>(&self, table: &str, body: &B) -> RepositoryResult<T>
    where
        T: DeserializeOwned,
        B: serde::Serialize + Sync,
    {
        let url = format!("{}/{}", self.base_url, table);
        let response = check(self.http.post(&url).json(body).send().await?).await?;
        first(response.json().await?)
    }

    async fn patch_row<T, B>(&self, table: &str, id: RecordId, body: &B) -> RepositoryResult<T>
    where
        T: DeserializeOwned,
        B: serde::Serialize + Sync,
    {
        let url = format!("{}/{table}?id=eq.{id}", self.base_url);
        let response = check(self.http.patch(&url).json(body).send().await?).await?;
        first(response.json().await?)
    }

    async fn delete_row(&self, table: &str, id: RecordId) -> RepositoryResult<()> {
        let url = format!("{}/{table}?id=eq.{id}", self.base_url);
        check(self.http.delete(&url).send().await?).await?;
        Ok(())
    }

    /// Three plain fetches joined locally. Only the call list itself is
    /// load-bearing; the lookup fetches degrade to empty maps so a partial
    /// outage still yields rows (with unresolved relations).
    async fn list_calls_via_fallback(&self) -> RepositoryResult<Vec<CallWithRelations>> {
        #[derive(Deserialize)]
        struct KeyedCandidate {
            id: RecordId,
            #[serde(default)]
            nombre: Option<String>,
            #[serde(default)]
            apellido: Option<String>,
        }

        #[derive(Deserialize)]
        struct KeyedEvent {
            id: RecordId,
            #[serde(default)]
            tipo_reunion: Option<String>,
        }

        let calls_path = format!("{CALLS}?select=*");
        let candidates_path = format!("{CANDIDATES}?select=id,nombre,apellido");
        let events_path = format!("{EVENTS}?select=id,tipo_reunion");
        let (calls, candidates, events) = tokio::join!(
            self.fetch_rows::<Call>(&calls_path),
            self.fetch_rows::<KeyedCandidate>(&candidates_path),
            self.fetch_rows::<KeyedEvent>(&events_path),
        );

        let calls = calls?;
        let candidates: HashMap<RecordId, RelatedCandidate> = candidates
            .unwrap_or_else(|err| {
                log::error!("Candidate lookup fetch failed during call fallback: {err}");
                Vec::new()
            })
            .into_iter()
            .map(|c| {
                (
                    c.id,
                    RelatedCandidate {
                        nombre: c.nombre,
                        apellido: c.apellido,
                    },
                )
            })
            .collect();
        let events: HashMap<RecordId, RelatedEvent> = events
            .unwrap_or_else(|err| {
                log::error!("Event lookup fetch failed during call fallback: {err}");
                Vec::new()
            })
            .into_iter()
            .map(|e| {
                (
                    e.id,
                    RelatedEvent {
                        tipo_reunion: e.tipo_reunion,
                    },
                )
            })
            .collect();

        Ok(calls
            .into_iter()
            .map(|call| CallWithRelations::resolve(call, &candidates, &events))
            .collect())
    }
}

/// Maps non-success responses to [`RepositoryError::Store`], preserving the
/// body the store sent as the diagnostic message.
async fn check(response: reqwest::Response) -> RepositoryResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(RepositoryError::Store {
        status: status.as_u16(),
        message,
    })
}

/// Writes ask for `return=representation`; the mutated row arrives as the
/// first element of a collection. An empty echo means the row does not
/// exist (or was filtered away by row-level security).
fn first<T>(mut rows: Vec<T>) -> RepositoryResult<T> {
    if rows.is_empty() {
        Err(RepositoryError::NotFound)
    } else {
        Ok(rows.remove(0))
    }
}

#[async_trait]
impl CandidateReader for RestRepository {
    async fn list_candidates(&self) -> RepositoryResult<Vec<Candidate>> {
        self.fetch_rows(&format!("{CANDIDATES}?select=*")).await
    }

    async fn get_candidate_by_id(&self, id: RecordId) -> RepositoryResult<Option<Candidate>> {
        self.fetch_by_id(CANDIDATES, id).await
    }
}

#[async_trait]
impl CandidateWriter for RestRepository {
    async fn create_candidate(&self, new_candidate: &NewCandidate) -> RepositoryResult<Candidate> {
        self.insert_row(CANDIDATES, new_candidate).await
    }

    async fn update_candidate(
        &self,
        id: RecordId,
        updates: &UpdateCandidate,
    ) -> RepositoryResult<Candidate> {
        self.patch_row(CANDIDATES, id, updates).await
    }

    async fn delete_candidate(&self, id: RecordId) -> RepositoryResult<()> {
        self.delete_row(CANDIDATES, id).await
    }
}

#[async_trait]
impl ClientReader for RestRepository {
    async fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        self.fetch_rows(&format!("{CLIENTS}?select=*")).await
    }

    async fn get_client_by_id(&self, id: RecordId) -> RepositoryResult<Option<Client>> {
        self.fetch_by_id(CLIENTS, id).await
    }
}

#[async_trait]
impl ClientWriter for RestRepository {
    async fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        self.insert_row(CLIENTS, new_client).await
    }

    async fn update_client(
        &self,
        id: RecordId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client> {
        self.patch_row(CLIENTS, id, updates).await
    }

    async fn delete_client(&self, id: RecordId) -> RepositoryResult<()> {
        self.delete_row(CLIENTS, id).await
    }
}

#[async_trait]
impl EventReader for RestRepository {
    async fn list_events(&self) -> RepositoryResult<Vec<Event>> {
        self.fetch_rows(&format!("{EVENTS}?select=*")).await
    }

    async fn get_event_by_id(&self, id: RecordId) -> RepositoryResult<Option<Event>> {
        self.fetch_by_id(EVENTS, id).await
    }
}

#[async_trait]
impl EventWriter for RestRepository {
    async fn create_event(&self, new_event: &NewEvent) -> RepositoryResult<Event> {
        self.insert_row(EVENTS, new_event).await
    }

    async fn update_event(&self, id: RecordId, updates: &UpdateEvent) -> RepositoryResult<Event> {
        self.patch_row(EVENTS, id, updates).await
    }

    async fn delete_event(&self, id: RecordId) -> RepositoryResult<()> {
        self.delete_row(EVENTS, id).await
    }
}

#[async_trait]
impl CallReader for RestRepository {
    async fn list_calls(&self) -> RepositoryResult<Vec<Call>> {
        self.fetch_rows(&format!("{CALLS}?select=*")).await
    }

    async fn get_call_by_id(&self, id: RecordId) -> RepositoryResult<Option<Call>> {
        self.fetch_by_id(CALLS, id).await
    }

    async fn list_calls_with_relations(&self) -> RepositoryResult<Vec<CallWithRelations>> {
        match self.fetch_rows::<CallWithRelations>(CALLS_JOINED_QUERY).await {
            Ok(rows) => Ok(rows),
            Err(err) => {
                log::error!("Joined call fetch failed, using plain-fetch fallback: {err}");
                self.list_calls_via_fallback().await
            }
        }
    }
}

#[async_trait]
impl CallWriter for RestRepository {
    async fn create_call(&self, new_call: &NewCall) -> RepositoryResult<Call> {
        self.insert_row(CALLS, new_call).await
    }

    async fn update_call(&self, id: RecordId, updates: &UpdateCall) -> RepositoryResult<Call> {
        self.patch_row(CALLS, id, updates).await
    }

    async fn delete_call(&self, id: RecordId) -> RepositoryResult<()> {
        self.delete_row(CALLS, id).await
    }
}

#[async_trait]
impl FlowTrigger for RestRepository {
    async fn trigger_flow(&self) -> RepositoryResult<FlowResponse> {
        let url = format!("{}/api/trigger-flow", self.proxy_url);
        let response = self.http.post(&url).send().await?;
        let status = response.status();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(RepositoryError::WebhookNotConfigured);
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RepositoryError::Store {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(FlowResponse { content_type, body })
    }

    async fn fetch_call_audio(&self, conversation_id: &str) -> RepositoryResult<Vec<u8>> {
        let url = format!("{}/api/call-audio", self.proxy_url);
        let response = self
            .http
            .get(&url)
            .query(&[("conversation_id", conversation_id)])
            .send()
            .await?;
        let response = check(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_takes_the_echoed_row_and_rejects_empty_collections() {
        assert_eq!(first(vec![1, 2]).unwrap(), 1);
        assert!(matches!(
            first(Vec::<i32>::new()),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn joined_query_requests_the_embedded_relations() {
        assert_eq!(
            CALLS_JOINED_QUERY,
            "llamadas?select=*,candidatos(nombre,apellido),eventos(tipo_reunion)"
        );
    }
}
