//! View-controller flows end to end over the in-memory fake: navigation
//! state machine, modal-driven mutations with full refetch, webhook trigger
//! outcomes.

use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};

use coders_crm::dto::rows::{BadgeTone, CandidateRow};
use coders_crm::ui::app::{App, Effect, NoticeLevel, View, ViewState};
use coders_crm::ui::modal::MODAL_EXIT_DELAY;

mod common;

use common::{FakeRepository, FlowBehavior};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::from(code)
}

async fn app_with(repo: FakeRepository) -> App<FakeRepository> {
    let mut app = App::new(Some(repo));
    let effect = app.start();
    app.perform(effect).await;
    app
}

fn type_text(app: &mut App<FakeRepository>, text: &str) {
    for c in text.chars() {
        app.on_key(key(KeyCode::Char(c)));
    }
}

#[tokio::test]
async fn navigation_walks_loading_to_rendered() {
    let mut app = app_with(FakeRepository::new()).await;
    assert_eq!(app.state.view_state, ViewState::Rendered);

    let effect = app.on_key(key(KeyCode::Char('2')));
    assert_eq!(app.state.current_view, View::Candidates);
    assert_eq!(app.state.view_state, ViewState::Loading);

    app.perform(effect).await;
    assert_eq!(app.state.view_state, ViewState::Rendered);
}

#[tokio::test]
async fn startup_without_a_data_client_renders_the_error_state() {
    let mut app: App<FakeRepository> = App::new(None);
    assert!(app.notice.is_some());

    let effect = app.start();
    app.perform(effect).await;
    assert_eq!(app.state.view_state, ViewState::Error);
}

#[tokio::test]
async fn creating_a_candidate_refetches_and_renders_the_new_row() {
    let mut app = app_with(FakeRepository::new()).await;
    let effect = app.on_key(key(KeyCode::Char('2')));
    app.perform(effect).await;

    // n opens the creation modal; type name, surname, phone.
    app.on_key(key(KeyCode::Char('n')));
    assert!(app.modal.active().is_some());
    type_text(&mut app, "Ana");
    app.on_key(key(KeyCode::Tab));
    type_text(&mut app, "Diaz");
    app.on_key(key(KeyCode::Tab));
    type_text(&mut app, "555");

    let effect = app.on_key(key(KeyCode::Enter));
    assert!(matches!(effect, Effect::Submit { .. }));
    app.perform(effect).await;

    // Modal converged on the close routine; the view was fully refetched.
    assert!(app.modal.active().unwrap().is_closing());
    app.tick(Instant::now() + MODAL_EXIT_DELAY + Duration::from_millis(1));
    assert!(app.modal.active().is_none());

    assert_eq!(app.state.view_state, ViewState::Rendered);
    assert_eq!(app.state.candidates.len(), 1);
    let row = CandidateRow::from(&app.state.candidates[0]);
    assert_eq!(row.name, "Ana Diaz");
    assert_eq!(row.badge.label, "Nuevo");
    assert_eq!(row.badge.tone, BadgeTone::Pending);
}

#[tokio::test]
async fn failed_submission_keeps_the_modal_open_with_the_input() {
    let repo = FakeRepository::new();
    repo.fail_writes.store(true, Ordering::SeqCst);
    let mut app = app_with(repo).await;
    let effect = app.on_key(key(KeyCode::Char('2')));
    app.perform(effect).await;

    app.on_key(key(KeyCode::Char('n')));
    type_text(&mut app, "Ana");
    app.on_key(key(KeyCode::Tab));
    type_text(&mut app, "Diaz");
    app.on_key(key(KeyCode::Tab));
    type_text(&mut app, "555");

    let effect = app.on_key(key(KeyCode::Enter));
    app.perform(effect).await;

    let modal = app.modal.active().unwrap();
    assert!(!modal.is_closing(), "modal must stay open for a retry");
    assert!(!modal.is_submitting());
    assert!(modal.error().is_some());
    assert_eq!(modal.fields()[0].value, "Ana");
    assert!(app.state.candidates.is_empty());
}

#[tokio::test]
async fn deleting_an_event_removes_exactly_that_row() {
    let repo = FakeRepository::new();
    let mut app = app_with(repo).await;

    // Seed two events through the normal creation flow.
    let effect = app.on_key(key(KeyCode::Char('4')));
    app.perform(effect).await;
    for name in ["Kickoff", "Demo"] {
        app.on_key(key(KeyCode::Char('n')));
        type_text(&mut app, name);
        app.on_key(key(KeyCode::Tab));
        type_text(&mut app, "2026-09-01T10:00");
        let effect = app.on_key(key(KeyCode::Enter));
        app.perform(effect).await;
        // Let the previous modal's exit delay elapse before the next one.
        app.tick(Instant::now() + MODAL_EXIT_DELAY + Duration::from_millis(1));
    }
    assert_eq!(app.state.events.len(), 2);
    let kept = app.state.events[1].id;

    // Delete the first row via the confirmation modal.
    app.on_key(key(KeyCode::Char('d')));
    let modal = app.modal.active().unwrap();
    assert!(modal.danger);
    assert_eq!(modal.submit_label(), "Sí, Eliminar");

    let effect = app.on_key(key(KeyCode::Enter));
    app.perform(effect).await;

    assert_eq!(app.state.events.len(), 1);
    assert_eq!(app.state.events[0].id, kept);
    assert_eq!(app.state.view_state, ViewState::Rendered);
}

#[tokio::test]
async fn editing_prefills_from_the_locally_held_record() {
    let mut app = app_with(FakeRepository::new()).await;
    let effect = app.on_key(key(KeyCode::Char('2')));
    app.perform(effect).await;

    app.on_key(key(KeyCode::Char('n')));
    type_text(&mut app, "Ana");
    app.on_key(key(KeyCode::Tab));
    type_text(&mut app, "Diaz");
    app.on_key(key(KeyCode::Tab));
    type_text(&mut app, "555");
    let effect = app.on_key(key(KeyCode::Enter));
    app.perform(effect).await;
    app.tick(Instant::now() + MODAL_EXIT_DELAY + Duration::from_millis(1));

    app.on_key(key(KeyCode::Char('e')));
    let modal = app.modal.active().unwrap();
    assert_eq!(modal.title, "Editar Candidato");
    assert_eq!(modal.fields()[0].value, "Ana");
    assert_eq!(modal.fields()[1].value, "Diaz");
    assert_eq!(modal.fields()[2].value, "555");
}

#[tokio::test]
async fn webhook_trigger_without_configuration_reenables_the_control() {
    let repo = FakeRepository::new();
    repo.set_flow(FlowBehavior::NotConfigured);
    let mut app = app_with(repo).await;
    let effect = app.on_key(key(KeyCode::Char('5')));
    app.perform(effect).await;

    let effect = app.on_key(key(KeyCode::Char('w')));
    assert_eq!(effect, Effect::TriggerFlow);
    assert!(app.webhook.busy);
    assert_eq!(app.webhook.label(), "Disparando...");

    app.perform(effect).await;
    assert!(!app.webhook.busy, "trigger control must come back");
    assert_eq!(app.webhook.label(), "Iniciar Flujo de Llamadas (N8N)");
    let notice = app.notice.as_ref().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.text.contains("webhook"));
}

#[tokio::test]
async fn webhook_outcomes_surface_distinct_notices() {
    let repo = FakeRepository::new();
    repo.set_flow(FlowBehavior::Started);
    let mut app = app_with(repo).await;
    let effect = app.on_key(key(KeyCode::Char('5')));
    app.perform(effect).await;

    let effect = app.on_key(key(KeyCode::Char('w')));
    app.perform(effect).await;
    assert_eq!(app.notice.as_ref().unwrap().level, NoticeLevel::Success);
    assert!(app.notice.as_ref().unwrap().text.contains("Workflow was started"));

    // An HTML reply gets the specific misconfiguration diagnostic, not the
    // generic failure.
    let repo = FakeRepository::new();
    repo.set_flow(FlowBehavior::HtmlPage);
    let mut app = app_with(repo).await;
    let effect = app.on_key(key(KeyCode::Char('5')));
    app.perform(effect).await;
    let effect = app.on_key(key(KeyCode::Char('w')));
    app.perform(effect).await;
    let notice = app.notice.as_ref().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.text.contains("página principal"));
    assert!(!app.webhook.busy);

    // Any other payload is echoed to the user verbatim.
    let repo = FakeRepository::new();
    repo.set_flow(FlowBehavior::Payload(r#"{"queued": 3}"#.into()));
    let mut app = app_with(repo).await;
    let effect = app.on_key(key(KeyCode::Char('5')));
    app.perform(effect).await;
    let effect = app.on_key(key(KeyCode::Char('w')));
    app.perform(effect).await;
    let notice = app.notice.as_ref().unwrap();
    assert_eq!(notice.level, NoticeLevel::Info);
    assert!(notice.text.contains("Respuesta del Webhook"));
    assert!(notice.text.contains("queued"));
}

#[tokio::test]
async fn mutations_rerender_from_server_state_not_local_patches() {
    let repo = FakeRepository::new();
    let mut app = app_with(repo).await;
    let effect = app.on_key(key(KeyCode::Char('2')));
    app.perform(effect).await;

    // A row inserted behind the controller's back (another client of the
    // shared store) must appear after the next mutation's refetch.
    app.repository()
        .expect("repository configured")
        .candidates
        .lock()
        .unwrap()
        .push(serde_json::from_str(r#"{"id": 900, "nombre": "Luz"}"#).unwrap());

    app.on_key(key(KeyCode::Char('n')));
    type_text(&mut app, "Ana");
    app.on_key(key(KeyCode::Tab));
    type_text(&mut app, "Diaz");
    app.on_key(key(KeyCode::Tab));
    type_text(&mut app, "555");
    let effect = app.on_key(key(KeyCode::Enter));
    app.perform(effect).await;

    assert_eq!(app.state.candidates.len(), 2);
}
