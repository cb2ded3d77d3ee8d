//! In-memory repository fake backing the integration tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use coders_crm::domain::call::{Call, CallWithRelations, NewCall, RelatedCandidate, RelatedEvent, UpdateCall};
use coders_crm::domain::candidate::{Candidate, NewCandidate, UpdateCandidate};
use coders_crm::domain::client::{Client, NewClient, UpdateClient};
use coders_crm::domain::event::{Event, NewEvent, UpdateEvent};
use coders_crm::domain::types::RecordId;
use coders_crm::repository::errors::{RepositoryError, RepositoryResult};
use coders_crm::repository::{
    CallReader, CallWriter, CandidateReader, CandidateWriter, ClientReader, ClientWriter,
    EventReader, EventWriter, FlowResponse, FlowTrigger,
};

/// What the fake relay answers when triggered.
#[derive(Clone, Debug)]
pub enum FlowBehavior {
    Started,
    HtmlPage,
    NotConfigured,
    Payload(String),
}

#[derive(Default)]
pub struct FakeRepository {
    pub candidates: Mutex<Vec<Candidate>>,
    pub clients: Mutex<Vec<Client>>,
    pub events: Mutex<Vec<Event>>,
    pub calls: Mutex<Vec<Call>>,
    next_id: Mutex<i64>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub flow: Mutex<Option<FlowBehavior>>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_flow(&self, behavior: FlowBehavior) {
        *self.flow.lock().unwrap() = Some(behavior);
    }

    fn assign_id(&self) -> RecordId {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        RecordId::new(*next)
    }

    fn read_guard(&self) -> RepositoryResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(RepositoryError::Transport("simulated read outage".into()))
        } else {
            Ok(())
        }
    }

    fn write_guard(&self) -> RepositoryResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(RepositoryError::Store {
                status: 400,
                message: "simulated write rejection".into(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CandidateReader for FakeRepository {
    async fn list_candidates(&self) -> RepositoryResult<Vec<Candidate>> {
        self.read_guard()?;
        Ok(self.candidates.lock().unwrap().clone())
    }

    async fn get_candidate_by_id(&self, id: RecordId) -> RepositoryResult<Option<Candidate>> {
        self.read_guard()?;
        Ok(self
            .candidates
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }
}

#[async_trait]
impl CandidateWriter for FakeRepository {
    async fn create_candidate(&self, new_candidate: &NewCandidate) -> RepositoryResult<Candidate> {
        self.write_guard()?;
        let candidate = Candidate {
            id: self.assign_id(),
            nombre: Some(new_candidate.nombre.clone()),
            apellido: Some(new_candidate.apellido.clone()),
            telefono: Some(new_candidate.telefono.clone()),
            correo: new_candidate.correo.clone(),
            ciudad: new_candidate.ciudad.clone(),
            estado_gestion: new_candidate.estado_gestion,
        };
        self.candidates.lock().unwrap().push(candidate.clone());
        Ok(candidate)
    }

    async fn update_candidate(
        &self,
        id: RecordId,
        updates: &UpdateCandidate,
    ) -> RepositoryResult<Candidate> {
        self.write_guard()?;
        let mut rows = self.candidates.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepositoryError::NotFound)?;
        row.nombre = Some(updates.nombre.clone());
        row.apellido = Some(updates.apellido.clone());
        row.telefono = Some(updates.telefono.clone());
        row.correo = updates.correo.clone();
        row.ciudad = updates.ciudad.clone();
        row.estado_gestion = updates.estado_gestion;
        Ok(row.clone())
    }

    async fn delete_candidate(&self, id: RecordId) -> RepositoryResult<()> {
        self.write_guard()?;
        self.candidates.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl ClientReader for FakeRepository {
    async fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        self.read_guard()?;
        Ok(self.clients.lock().unwrap().clone())
    }

    async fn get_client_by_id(&self, id: RecordId) -> RepositoryResult<Option<Client>> {
        self.read_guard()?;
        Ok(self
            .clients
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }
}

#[async_trait]
impl ClientWriter for FakeRepository {
    async fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        self.write_guard()?;
        let client = Client {
            id: self.assign_id(),
            nombre: Some(new_client.nombre.clone()),
            empresa: None,
            email: Some(new_client.email.clone()),
            contacto: None,
            telefono: new_client.telefono.clone(),
            phone: None,
        };
        self.clients.lock().unwrap().push(client.clone());
        Ok(client)
    }

    async fn update_client(
        &self,
        id: RecordId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client> {
        self.write_guard()?;
        let mut rows = self.clients.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepositoryError::NotFound)?;
        row.nombre = Some(updates.nombre.clone());
        row.email = Some(updates.email.clone());
        row.telefono = updates.telefono.clone();
        Ok(row.clone())
    }

    async fn delete_client(&self, id: RecordId) -> RepositoryResult<()> {
        self.write_guard()?;
        self.clients.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl EventReader for FakeRepository {
    async fn list_events(&self) -> RepositoryResult<Vec<Event>> {
        self.read_guard()?;
        Ok(self.events.lock().unwrap().clone())
    }

    async fn get_event_by_id(&self, id: RecordId) -> RepositoryResult<Option<Event>> {
        self.read_guard()?;
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }
}

#[async_trait]
impl EventWriter for FakeRepository {
    async fn create_event(&self, new_event: &NewEvent) -> RepositoryResult<Event> {
        self.write_guard()?;
        let event = Event {
            id: self.assign_id(),
            tipo_reunion: Some(new_event.tipo_reunion.clone()),
            fecha_hora: Some(new_event.fecha_hora.clone()),
            capacidad_total: Some(new_event.capacidad_total),
            inscritos_actuales: Some(0),
            estado: Some(new_event.estado),
        };
        self.events.lock().unwrap().push(event.clone());
        Ok(event)
    }

    async fn update_event(&self, id: RecordId, updates: &UpdateEvent) -> RepositoryResult<Event> {
        self.write_guard()?;
        let mut rows = self.events.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(RepositoryError::NotFound)?;
        row.tipo_reunion = Some(updates.tipo_reunion.clone());
        row.fecha_hora = Some(updates.fecha_hora.clone());
        row.capacidad_total = Some(updates.capacidad_total);
        row.estado = Some(updates.estado);
        Ok(row.clone())
    }

    async fn delete_event(&self, id: RecordId) -> RepositoryResult<()> {
        self.write_guard()?;
        self.events.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }
}

#[async_trait]
impl CallReader for FakeRepository {
    async fn list_calls(&self) -> RepositoryResult<Vec<Call>> {
        self.read_guard()?;
        Ok(self.calls.lock().unwrap().clone())
    }

    async fn get_call_by_id(&self, id: RecordId) -> RepositoryResult<Option<Call>> {
        self.read_guard()?;
        Ok(self
            .calls
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list_calls_with_relations(&self) -> RepositoryResult<Vec<CallWithRelations>> {
        self.read_guard()?;
        // The store-side join, simulated over the local tables.
        let candidates = self
            .candidates
            .lock()
            .unwrap()
            .iter()
            .map(|c| {
                (
                    c.id,
                    RelatedCandidate {
                        nombre: c.nombre.clone(),
                        apellido: c.apellido.clone(),
                    },
                )
            })
            .collect();
        let events = self
            .events
            .lock()
            .unwrap()
            .iter()
            .map(|e| {
                (
                    e.id,
                    RelatedEvent {
                        tipo_reunion: e.tipo_reunion.clone(),
                    },
                )
            })
            .collect();
        Ok(self
            .calls
            .lock()
            .unwrap()
            .iter()
            .cloned()
            .map(|call| CallWithRelations::resolve(call, &candidates, &events))
            .collect())
    }
}

#[async_trait]
impl CallWriter for FakeRepository {
    async fn create_call(&self, new_call: &NewCall) -> RepositoryResult<Call> {
        self.write_guard()?;
        let call = Call {
            id: self.assign_id(),
            fecha_hora_llamada: Some(new_call.fecha_hora_llamada.clone()),
            resultado: Some(new_call.resultado.clone()),
            resumen: new_call.resumen.clone(),
            candidato_id: new_call.candidato_id,
            id_candidato: None,
            evento_id: new_call.evento_id,
            id_evento: None,
            conversation_id: None,
        };
        self.calls.lock().unwrap().push(call.clone());
        Ok(call)
    }

    async fn update_call(&self, id: RecordId, updates: &UpdateCall) -> RepositoryResult<Call> {
        self.write_guard()?;
        let mut rows = self.calls.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepositoryError::NotFound)?;
        row.fecha_hora_llamada = Some(updates.fecha_hora_llamada.clone());
        row.resultado = Some(updates.resultado.clone());
        row.resumen = updates.resumen.clone();
        row.candidato_id = updates.candidato_id;
        row.evento_id = updates.evento_id;
        Ok(row.clone())
    }

    async fn delete_call(&self, id: RecordId) -> RepositoryResult<()> {
        self.write_guard()?;
        self.calls.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl FlowTrigger for FakeRepository {
    async fn trigger_flow(&self) -> RepositoryResult<FlowResponse> {
        let behavior = self.flow.lock().unwrap().clone();
        match behavior {
            None | Some(FlowBehavior::NotConfigured) => {
                Err(RepositoryError::WebhookNotConfigured)
            }
            Some(FlowBehavior::Started) => Ok(FlowResponse {
                content_type: Some("application/json".into()),
                body: r#"{"message": "Workflow was started"}"#.into(),
            }),
            Some(FlowBehavior::HtmlPage) => Ok(FlowResponse {
                content_type: Some("text/html; charset=utf-8".into()),
                body: "<!DOCTYPE html>\n<html><body>dashboard</body></html>".into(),
            }),
            Some(FlowBehavior::Payload(body)) => Ok(FlowResponse {
                content_type: Some("application/json".into()),
                body,
            }),
        }
    }

    async fn fetch_call_audio(&self, conversation_id: &str) -> RepositoryResult<Vec<u8>> {
        Ok(format!("audio:{conversation_id}").into_bytes())
    }
}
