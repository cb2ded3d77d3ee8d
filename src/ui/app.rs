//! The view controller: one instance owns the state container, the modal
//! controller and the chart renderer, and drives every
//! fetch → render → (user action) → mutate → refetch cycle.
//!
//! Key handling is synchronous and returns an [`Effect`]; the event loop
//! draws the intermediate frame (loading placeholder, busy submit control)
//! and then awaits [`App::perform`] on the effect. Because effects are
//! awaited inline on the single logical thread, a navigation can never
//! observe a stale response rendering into the wrong view.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use crate::domain::call::CallWithRelations;
use crate::domain::candidate::Candidate;
use crate::domain::client::Client;
use crate::domain::event::Event;
use crate::domain::types::RecordId;
use crate::forms::FieldValues;
use crate::forms::call::call_fields;
use crate::forms::candidate::candidate_fields;
use crate::forms::client::client_fields;
use crate::forms::event::event_fields;
use crate::repository::errors::RepositoryError;
use crate::repository::{
    CallReader, CallWriter, CandidateReader, CandidateWriter, ClientReader, ClientWriter,
    EventReader, EventWriter, FlowTrigger,
};
use crate::services::webhook::FlowOutcome;
use crate::services::{
    ServiceError, ServiceResult, calls, candidates, clients, dashboard, events, webhook,
};
use crate::ui::chart::ChartRenderer;
use crate::ui::modal::{ModalAction, ModalController, ModalSpec};

/// Everything the dashboard needs from a data client.
pub trait Repository:
    CandidateReader
    + CandidateWriter
    + ClientReader
    + ClientWriter
    + EventReader
    + EventWriter
    + CallReader
    + CallWriter
    + FlowTrigger
    + Sync
{
}

impl<T> Repository for T where
    T: CandidateReader
        + CandidateWriter
        + ClientReader
        + ClientWriter
        + EventReader
        + EventWriter
        + CallReader
        + CallWriter
        + FlowTrigger
        + Sync
{
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Candidates,
    Clients,
    Events,
    Calls,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Candidates,
        View::Clients,
        View::Events,
        View::Calls,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Candidates => "Coders",
            View::Clients => "Clientes",
            View::Events => "Eventos",
            View::Calls => "Llamadas",
        }
    }

    const fn index(self) -> usize {
        match self {
            View::Dashboard => 0,
            View::Candidates => 1,
            View::Clients => 2,
            View::Events => 3,
            View::Calls => 4,
        }
    }

    const fn next(self) -> View {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl Default for View {
    fn default() -> Self {
        View::Dashboard
    }
}

/// Per-navigation lifecycle of the visible view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Rendered,
    Error,
}

/// The single state container. Each record list is the most recent fetch
/// result for its entity and is replaced wholesale on every load.
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub view_state: ViewState,
    pub candidates: Vec<Candidate>,
    pub clients: Vec<Client>,
    pub events: Vec<Event>,
    pub calls: Vec<CallWithRelations>,
}

impl AppState {
    pub fn candidate_by_id(&self, id: RecordId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    pub fn client_by_id(&self, id: RecordId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn event_by_id(&self, id: RecordId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn call_by_id(&self, id: RecordId) -> Option<&CallWithRelations> {
        self.calls.iter().find(|c| c.call.id == id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Status-line message, the terminal's `alert()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// State of the webhook trigger control on the calls view.
#[derive(Debug, Default)]
pub struct TriggerControl {
    pub busy: bool,
}

impl TriggerControl {
    pub fn label(&self) -> &'static str {
        if self.busy {
            "Disparando..."
        } else {
            "Iniciar Flujo de Llamadas (N8N)"
        }
    }
}

/// Deferred work produced by key handling; awaited by the event loop after
/// the intermediate frame is drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    None,
    LoadView(View),
    Submit {
        action: ModalAction,
        values: FieldValues,
    },
    TriggerFlow,
    FetchAudio(String),
}

const CLIENT_UNAVAILABLE_NOTICE: &str =
    "No se pudo conectar al servidor para obtener las credenciales.";
const WEBHOOK_MISCONFIGURED_NOTICE: &str = "El servidor devolvió la página principal en lugar de \
     ejecutar el webhook. Reinicia el servidor después de guardar el archivo .env.local.";
const WEBHOOK_MISSING_NOTICE: &str =
    "No hay un webhook configurado. Define N8N_WEBHOOK_URL en el servidor.";

pub struct App<R> {
    /// `None` when configuration retrieval failed at startup; every view
    /// load then lands in the error state until the process is restarted.
    repo: Option<R>,
    pub state: AppState,
    pub modal: ModalController,
    pub chart: ChartRenderer,
    pub webhook: TriggerControl,
    pub notice: Option<Notice>,
    pub selected: usize,
    pub should_quit: bool,
}

impl<R: Repository> App<R> {
    pub fn new(repo: Option<R>) -> Self {
        let notice = match repo {
            Some(_) => None,
            None => Some(Notice {
                level: NoticeLevel::Error,
                text: CLIENT_UNAVAILABLE_NOTICE.to_string(),
            }),
        };
        Self {
            repo,
            state: AppState::default(),
            modal: ModalController::new(),
            chart: ChartRenderer::new(),
            webhook: TriggerControl::default(),
            notice,
            selected: 0,
            should_quit: false,
        }
    }

    /// The configured data client, when initialization succeeded.
    pub fn repository(&self) -> Option<&R> {
        self.repo.as_ref()
    }

    /// First navigation after startup.
    pub fn start(&mut self) -> Effect {
        self.navigate(View::Dashboard)
    }

    /// Frame tick: retires modals whose exit delay has elapsed.
    pub fn tick(&mut self, now: Instant) {
        self.modal.sweep(now);
    }

    pub fn navigate(&mut self, view: View) -> Effect {
        self.state.current_view = view;
        self.state.view_state = ViewState::Loading;
        self.selected = 0;
        Effect::LoadView(view)
    }

    /// Routes one key press. Purely synchronous; any remote work comes
    /// back as an [`Effect`] for the loop to await.
    pub fn on_key(&mut self, key: KeyEvent) -> Effect {
        if self.modal.active().is_some() {
            return self.on_modal_key(key);
        }
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Effect::None
            }
            KeyCode::Char('1') => self.navigate(View::Dashboard),
            KeyCode::Char('2') => self.navigate(View::Candidates),
            KeyCode::Char('3') => self.navigate(View::Clients),
            KeyCode::Char('4') => self.navigate(View::Events),
            KeyCode::Char('5') => self.navigate(View::Calls),
            KeyCode::Tab => self.navigate(self.state.current_view.next()),
            KeyCode::Char('r') => self.navigate(self.state.current_view),
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Effect::None
            }
            KeyCode::Down => {
                if self.selected + 1 < self.visible_rows() {
                    self.selected += 1;
                }
                Effect::None
            }
            KeyCode::Char('n') => {
                self.open_create_modal();
                Effect::None
            }
            KeyCode::Char('e') => {
                self.open_edit_modal();
                Effect::None
            }
            KeyCode::Char('d') => {
                self.open_delete_modal();
                Effect::None
            }
            KeyCode::Char('w') if self.state.current_view == View::Calls => {
                if self.webhook.busy {
                    return Effect::None;
                }
                self.webhook.busy = true;
                Effect::TriggerFlow
            }
            KeyCode::Char('a') if self.state.current_view == View::Calls => {
                match self.selected_call_recording() {
                    Some(conversation_id) => Effect::FetchAudio(conversation_id),
                    None => Effect::None,
                }
            }
            _ => Effect::None,
        }
    }

    fn on_modal_key(&mut self, key: KeyEvent) -> Effect {
        match key.code {
            KeyCode::Esc => {
                self.modal.close();
                Effect::None
            }
            KeyCode::Enter => match self.modal.begin_submit() {
                Some((action, values)) => Effect::Submit { action, values },
                None => Effect::None,
            },
            KeyCode::Tab | KeyCode::Down => {
                self.modal.focus_next();
                Effect::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.modal.focus_prev();
                Effect::None
            }
            KeyCode::Left => {
                self.modal.cycle_select(-1);
                Effect::None
            }
            KeyCode::Right => {
                self.modal.cycle_select(1);
                Effect::None
            }
            KeyCode::Backspace => {
                self.modal.backspace();
                Effect::None
            }
            KeyCode::Char(c) => {
                self.modal.input(c);
                Effect::None
            }
            _ => Effect::None,
        }
    }

    /// Runs a deferred effect to completion.
    pub async fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::LoadView(view) => self.load_view(view).await,
            Effect::Submit { action, values } => self.run_submit(action, values).await,
            Effect::TriggerFlow => self.run_trigger_flow().await,
            Effect::FetchAudio(conversation_id) => self.run_fetch_audio(&conversation_id).await,
        }
    }

    /// Loads a view's records, replacing that entity's slot in the state
    /// container wholesale.
    async fn load_view(&mut self, view: View) {
        let Some(repo) = self.repo.as_ref() else {
            log::error!("Cannot load view {:?}: data client unavailable", view);
            self.state.view_state = ViewState::Error;
            return;
        };
        match view {
            View::Dashboard => {
                let snapshot = dashboard::load_dashboard(repo).await;
                self.state.candidates = snapshot.candidates;
                self.state.clients = snapshot.clients;
                self.state.events = snapshot.events;
                self.state.calls = snapshot.calls;
                self.chart.render(&self.state.candidates);
            }
            View::Candidates => {
                self.state.candidates = candidates::load_candidates(repo).await;
            }
            View::Clients => {
                self.state.clients = clients::load_clients(repo).await;
            }
            View::Events => {
                self.state.events = events::load_events(repo).await;
            }
            View::Calls => {
                self.state.calls = calls::load_calls(repo).await;
            }
        }
        self.state.view_state = ViewState::Rendered;
        self.clamp_selection();
    }

    async fn run_submit(&mut self, action: ModalAction, values: FieldValues) {
        match self.dispatch(&action, &values).await {
            Ok(()) => {
                self.modal.finish_submit(Ok(()));
                // A completed mutation re-triggers the active view's load:
                // always a full refetch, never a local patch.
                self.state.view_state = ViewState::Loading;
                self.load_view(self.state.current_view).await;
            }
            Err(err) => {
                log::error!("Modal submission failed: {err}");
                self.modal.finish_submit(Err(()));
            }
        }
    }

    async fn dispatch(&self, action: &ModalAction, values: &FieldValues) -> ServiceResult<()> {
        let Some(repo) = self.repo.as_ref() else {
            return Err(ServiceError::Repository(RepositoryError::Configuration(
                "data client unavailable".to_string(),
            )));
        };
        match action {
            ModalAction::CreateCandidate => {
                candidates::save_candidate(repo, None, values).await?;
            }
            ModalAction::UpdateCandidate(id) => {
                candidates::save_candidate(repo, Some(*id), values).await?;
            }
            ModalAction::DeleteCandidate(id) => candidates::delete_candidate(repo, *id).await?,
            ModalAction::CreateClient => {
                clients::save_client(repo, None, values).await?;
            }
            ModalAction::UpdateClient(id) => {
                clients::save_client(repo, Some(*id), values).await?;
            }
            ModalAction::DeleteClient(id) => clients::delete_client(repo, *id).await?,
            ModalAction::CreateEvent => {
                events::save_event(repo, None, values).await?;
            }
            ModalAction::UpdateEvent(id) => {
                events::save_event(repo, Some(*id), values).await?;
            }
            ModalAction::DeleteEvent(id) => events::delete_event(repo, *id).await?,
            ModalAction::CreateCall => {
                calls::save_call(repo, None, values).await?;
            }
            ModalAction::UpdateCall(id) => {
                calls::save_call(repo, Some(*id), values).await?;
            }
            ModalAction::DeleteCall(id) => calls::delete_call(repo, *id).await?,
        }
        Ok(())
    }

    async fn run_trigger_flow(&mut self) {
        let outcome = match self.repo.as_ref() {
            Some(repo) => webhook::trigger_flow(repo).await,
            None => Err(ServiceError::Repository(RepositoryError::Configuration(
                "data client unavailable".to_string(),
            ))),
        };
        match outcome {
            Ok(FlowOutcome::Started(message)) => self.notify(
                NoticeLevel::Success,
                format!("🚀 {message}: ¡Las llamadas han comenzado!"),
            ),
            Ok(FlowOutcome::Misconfigured) => {
                self.notify(NoticeLevel::Error, WEBHOOK_MISCONFIGURED_NOTICE.to_string());
            }
            Ok(FlowOutcome::Other(payload)) => {
                self.notify(NoticeLevel::Info, format!("Respuesta del Webhook: {payload}"));
            }
            Err(ServiceError::WebhookNotConfigured) => {
                self.notify(NoticeLevel::Error, WEBHOOK_MISSING_NOTICE.to_string());
            }
            Err(err) => self.notify(NoticeLevel::Error, format!("❌ Error: {err}")),
        }
        // The trigger control always comes back, whatever the outcome.
        self.webhook.busy = false;
    }

    async fn run_fetch_audio(&mut self, conversation_id: &str) {
        let Some(repo) = self.repo.as_ref() else {
            self.notify(NoticeLevel::Error, CLIENT_UNAVAILABLE_NOTICE.to_string());
            return;
        };
        match calls::fetch_call_audio(repo, conversation_id).await {
            Ok(bytes) => {
                let path = format!("llamada-{conversation_id}.mp3");
                match std::fs::write(&path, &bytes) {
                    Ok(()) => self.notify(
                        NoticeLevel::Success,
                        format!("Grabación guardada en {path}"),
                    ),
                    Err(err) => {
                        log::error!("Failed to write recording {path}: {err}");
                        self.notify(
                            NoticeLevel::Error,
                            "No se pudo guardar la grabación.".to_string(),
                        );
                    }
                }
            }
            Err(_) => self.notify(
                NoticeLevel::Error,
                "No se pudo obtener la grabación de la llamada.".to_string(),
            ),
        }
    }

    fn open_create_modal(&mut self) {
        let spec = match self.state.current_view {
            View::Dashboard => return,
            View::Candidates => ModalSpec {
                title: "Añadir Nuevo Candidato".to_string(),
                body: None,
                fields: candidate_fields(None),
                danger: false,
                submit_label: None,
                action: ModalAction::CreateCandidate,
            },
            View::Clients => ModalSpec {
                title: "Nuevo Cliente".to_string(),
                body: None,
                fields: client_fields(None),
                danger: false,
                submit_label: None,
                action: ModalAction::CreateClient,
            },
            View::Events => ModalSpec {
                title: "Crear Nuevo Evento".to_string(),
                body: None,
                fields: event_fields(None),
                danger: false,
                submit_label: None,
                action: ModalAction::CreateEvent,
            },
            View::Calls => ModalSpec {
                title: "Registrar Llamada".to_string(),
                body: None,
                fields: call_fields(None, &self.state.candidates, &self.state.events),
                danger: false,
                submit_label: None,
                action: ModalAction::CreateCall,
            },
        };
        self.modal.show(spec);
    }

    fn open_edit_modal(&mut self) {
        let spec = match self.state.current_view {
            View::Dashboard => return,
            View::Candidates => {
                let Some(id) = self.state.candidates.get(self.selected).map(|c| c.id) else {
                    return;
                };
                let Some(candidate) = self.state.candidate_by_id(id) else {
                    return;
                };
                ModalSpec {
                    title: "Editar Candidato".to_string(),
                    body: None,
                    fields: candidate_fields(Some(candidate)),
                    danger: false,
                    submit_label: None,
                    action: ModalAction::UpdateCandidate(id),
                }
            }
            View::Clients => {
                let Some(id) = self.state.clients.get(self.selected).map(|c| c.id) else {
                    return;
                };
                let Some(client) = self.state.client_by_id(id) else {
                    return;
                };
                ModalSpec {
                    title: "Editar Cliente".to_string(),
                    body: None,
                    fields: client_fields(Some(client)),
                    danger: false,
                    submit_label: None,
                    action: ModalAction::UpdateClient(id),
                }
            }
            View::Events => {
                let Some(id) = self.state.events.get(self.selected).map(|e| e.id) else {
                    return;
                };
                let Some(event) = self.state.event_by_id(id) else {
                    return;
                };
                ModalSpec {
                    title: "Editar Evento".to_string(),
                    body: None,
                    fields: event_fields(Some(event)),
                    danger: false,
                    submit_label: None,
                    action: ModalAction::UpdateEvent(id),
                }
            }
            View::Calls => {
                let Some(id) = self.state.calls.get(self.selected).map(|c| c.call.id) else {
                    return;
                };
                let Some(row) = self.state.call_by_id(id) else {
                    return;
                };
                ModalSpec {
                    title: "Editar Llamada".to_string(),
                    body: None,
                    fields: call_fields(
                        Some(&row.call),
                        &self.state.candidates,
                        &self.state.events,
                    ),
                    danger: false,
                    submit_label: None,
                    action: ModalAction::UpdateCall(id),
                }
            }
        };
        self.modal.show(spec);
    }

    fn open_delete_modal(&mut self) {
        match self.state.current_view {
            View::Dashboard => {}
            View::Candidates => {
                if let Some(id) = self.state.candidates.get(self.selected).map(|c| c.id) {
                    self.modal
                        .confirm_delete("Candidato", ModalAction::DeleteCandidate(id));
                }
            }
            View::Clients => {
                if let Some(id) = self.state.clients.get(self.selected).map(|c| c.id) {
                    self.modal
                        .confirm_delete("Cliente", ModalAction::DeleteClient(id));
                }
            }
            View::Events => {
                if let Some(id) = self.state.events.get(self.selected).map(|e| e.id) {
                    self.modal
                        .confirm_delete("Evento", ModalAction::DeleteEvent(id));
                }
            }
            View::Calls => {
                if let Some(id) = self.state.calls.get(self.selected).map(|c| c.call.id) {
                    self.modal
                        .confirm_delete("Llamada", ModalAction::DeleteCall(id));
                }
            }
        }
    }

    fn selected_call_recording(&self) -> Option<String> {
        self.state
            .calls
            .get(self.selected)
            .and_then(|row| row.call.conversation_id.clone())
    }

    fn visible_rows(&self) -> usize {
        match self.state.current_view {
            View::Dashboard => 0,
            View::Candidates => self.state.candidates.len(),
            View::Clients => self.state.clients.len(),
            View::Events => self.state.events.len(),
            View::Calls => self.state.calls.len(),
        }
    }

    fn clamp_selection(&mut self) {
        let rows = self.visible_rows();
        if rows == 0 {
            self.selected = 0;
        } else if self.selected >= rows {
            self.selected = rows - 1;
        }
    }

    fn notify(&mut self, level: NoticeLevel, text: String) {
        self.notice = Some(Notice { level, text });
    }
}
