//! Transient overlay form with a single-owner lifecycle.
//!
//! At most one modal exists at any time: `show` replaces whatever is open.
//! Every dismissal path — cancel key, successful submission — converges on
//! [`ModalController::close`], which deactivates immediately and removes the
//! modal from the tree only after a fixed exit delay so the closing frame
//! can still be drawn dimmed.

use std::time::{Duration, Instant};

use crate::domain::types::RecordId;
use crate::forms::{FieldKind, FieldSpec, FieldValues};

/// Exit-transition time between deactivation and removal.
pub const MODAL_EXIT_DELAY: Duration = Duration::from_millis(300);

const DEFAULT_SUBMIT_LABEL: &str = "Guardar";
const SUBMITTING_LABEL: &str = "Procesando...";
const GENERIC_SUBMIT_ERROR: &str = "Ocurrió un error. Revisa el registro.";

/// What a submitted modal asks the application to do. Actions are plain
/// data dispatched by the view controller — there is no handler table.
#[derive(Clone, Debug, PartialEq)]
pub enum ModalAction {
    CreateCandidate,
    UpdateCandidate(RecordId),
    DeleteCandidate(RecordId),
    CreateClient,
    UpdateClient(RecordId),
    DeleteClient(RecordId),
    CreateEvent,
    UpdateEvent(RecordId),
    DeleteEvent(RecordId),
    CreateCall,
    UpdateCall(RecordId),
    DeleteCall(RecordId),
}

/// Everything needed to show a modal.
#[derive(Clone, Debug)]
pub struct ModalSpec {
    pub title: String,
    /// Free-text body shown above the fields (confirmation prompts).
    pub body: Option<String>,
    pub fields: Vec<FieldSpec>,
    pub danger: bool,
    pub submit_label: Option<String>,
    pub action: ModalAction,
}

/// Live state of one input.
#[derive(Clone, Debug)]
pub struct FieldState {
    pub spec: FieldSpec,
    pub value: String,
    /// Index into the options of a select field; unused otherwise.
    pub select_index: usize,
}

impl FieldState {
    fn new(spec: FieldSpec) -> Self {
        let (value, select_index) = match &spec.kind {
            FieldKind::Select(options) => {
                let index = options
                    .iter()
                    .position(|o| o.value == spec.initial)
                    .unwrap_or(0);
                let value = options
                    .get(index)
                    .map(|o| o.value.clone())
                    .unwrap_or_default();
                (value, index)
            }
            _ => (spec.initial.clone(), 0),
        };
        Self {
            spec,
            value,
            select_index,
        }
    }

    /// Label of the currently selected option, for rendering.
    pub fn select_label(&self) -> Option<&str> {
        match &self.spec.kind {
            FieldKind::Select(options) => options
                .get(self.select_index)
                .map(|o| o.label.as_str()),
            _ => None,
        }
    }

    fn cycle(&mut self, step: isize) {
        if let FieldKind::Select(options) = &self.spec.kind {
            if options.is_empty() {
                return;
            }
            let len = options.len() as isize;
            let next = (self.select_index as isize + step).rem_euclid(len) as usize;
            self.select_index = next;
            self.value = options[next].value.clone();
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Active,
    Closing { deadline: Instant },
}

/// One open modal.
#[derive(Clone, Debug)]
pub struct Modal {
    pub title: String,
    pub body: Option<String>,
    pub danger: bool,
    submit_label: String,
    action: ModalAction,
    fields: Vec<FieldState>,
    focus: usize,
    submitting: bool,
    error: Option<String>,
    phase: Phase,
}

impl Modal {
    fn new(spec: ModalSpec) -> Self {
        Self {
            title: spec.title,
            body: spec.body,
            danger: spec.danger,
            submit_label: spec
                .submit_label
                .unwrap_or_else(|| DEFAULT_SUBMIT_LABEL.to_string()),
            action: spec.action,
            fields: spec.fields.into_iter().map(FieldState::new).collect(),
            focus: 0,
            submitting: false,
            error: None,
            phase: Phase::Active,
        }
    }

    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.phase, Phase::Closing { .. })
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Label of the submit control, reflecting the busy indicator.
    pub fn submit_label(&self) -> &str {
        if self.submitting {
            SUBMITTING_LABEL
        } else {
            &self.submit_label
        }
    }

    /// Flat name→value collection of every form field.
    pub fn collect(&self) -> FieldValues {
        self.fields
            .iter()
            .map(|f| (f.spec.name.to_string(), f.value.clone()))
            .collect()
    }

    fn editable(&self) -> bool {
        !self.submitting && matches!(self.phase, Phase::Active)
    }
}

/// Owner of the at-most-one-open modal.
#[derive(Debug, Default)]
pub struct ModalController {
    current: Option<Modal>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a modal, replacing any open one — stacking is not a thing.
    pub fn show(&mut self, spec: ModalSpec) {
        self.current = Some(Modal::new(spec));
    }

    /// Fixed-body confirmation specialization of [`ModalController::show`].
    pub fn confirm_delete(&mut self, entity_label: &str, action: ModalAction) {
        self.show(ModalSpec {
            title: format!("Eliminar {entity_label}"),
            body: Some(format!(
                "¿Estás seguro de que deseas eliminar este {}? Esta acción no se puede deshacer.",
                entity_label.to_lowercase()
            )),
            fields: Vec::new(),
            danger: true,
            submit_label: Some("Sí, Eliminar".to_string()),
            action,
        });
    }

    pub fn active(&self) -> Option<&Modal> {
        self.current.as_ref()
    }

    /// The single close routine. Deactivates now; the modal leaves the tree
    /// once [`ModalController::sweep`] observes the deadline. Closing twice
    /// in quick succession keeps the first deadline.
    pub fn close(&mut self) {
        self.close_at(Instant::now());
    }

    pub(crate) fn close_at(&mut self, now: Instant) {
        if let Some(modal) = self.current.as_mut() {
            if matches!(modal.phase, Phase::Active) {
                modal.phase = Phase::Closing {
                    deadline: now + MODAL_EXIT_DELAY,
                };
            }
        }
    }

    /// Removes a closing modal whose exit delay has elapsed. Called from
    /// the frame tick.
    pub fn sweep(&mut self, now: Instant) {
        if let Some(modal) = self.current.as_ref() {
            if let Phase::Closing { deadline } = modal.phase {
                if now >= deadline {
                    self.current = None;
                }
            }
        }
    }

    /// Starts a submission: disables the submit control and hands back the
    /// action plus the collected fields. Returns `None` when no active
    /// modal can submit (already busy or closing).
    pub fn begin_submit(&mut self) -> Option<(ModalAction, FieldValues)> {
        let modal = self.current.as_mut()?;
        if !modal.editable() {
            return None;
        }
        modal.submitting = true;
        modal.error = None;
        Some((modal.action.clone(), modal.collect()))
    }

    /// Ends a submission: success closes the modal; failure re-enables the
    /// submit control, restores its label and keeps the modal open with a
    /// generic failure notice so the user can retry or cancel.
    pub fn finish_submit(&mut self, result: Result<(), ()>) {
        match result {
            Ok(()) => self.close(),
            Err(()) => {
                if let Some(modal) = self.current.as_mut() {
                    modal.submitting = false;
                    modal.error = Some(GENERIC_SUBMIT_ERROR.to_string());
                }
            }
        }
    }

    pub fn focus_next(&mut self) {
        if let Some(modal) = self.current.as_mut() {
            if modal.editable() && !modal.fields.is_empty() {
                modal.focus = (modal.focus + 1) % modal.fields.len();
            }
        }
    }

    pub fn focus_prev(&mut self) {
        if let Some(modal) = self.current.as_mut() {
            if modal.editable() && !modal.fields.is_empty() {
                modal.focus = (modal.focus + modal.fields.len() - 1) % modal.fields.len();
            }
        }
    }

    /// Types a character into the focused field, or cycles a select.
    pub fn input(&mut self, c: char) {
        if let Some(modal) = self.current.as_mut() {
            if !modal.editable() {
                return;
            }
            if let Some(field) = modal.fields.get_mut(modal.focus) {
                match field.spec.kind {
                    FieldKind::Select(_) => {}
                    _ => field.value.push(c),
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(modal) = self.current.as_mut() {
            if !modal.editable() {
                return;
            }
            if let Some(field) = modal.fields.get_mut(modal.focus) {
                match field.spec.kind {
                    FieldKind::Select(_) => {}
                    _ => {
                        field.value.pop();
                    }
                }
            }
        }
    }

    /// Cycles the focused select field by `step` options.
    pub fn cycle_select(&mut self, step: isize) {
        if let Some(modal) = self.current.as_mut() {
            if !modal.editable() {
                return;
            }
            if let Some(field) = modal.fields.get_mut(modal.focus) {
                field.cycle(step);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{FieldKind, FieldSpec, SelectOption};

    fn spec(action: ModalAction) -> ModalSpec {
        ModalSpec {
            title: "Prueba".into(),
            body: None,
            fields: vec![
                FieldSpec::new("nombre", "Nombre", FieldKind::Text).required(),
                FieldSpec::new(
                    "estado",
                    "Estado",
                    FieldKind::Select(vec![
                        SelectOption::new("a", "A"),
                        SelectOption::new("b", "B"),
                    ]),
                ),
            ],
            danger: false,
            submit_label: None,
            action,
        }
    }

    #[test]
    fn repeated_show_keeps_exactly_one_modal() {
        let mut controller = ModalController::new();
        for _ in 0..5 {
            controller.show(spec(ModalAction::CreateCandidate));
        }
        assert!(controller.active().is_some());
        // A controller owns at most one modal by construction; the freshly
        // shown one is the visible one.
        assert_eq!(controller.active().unwrap().title, "Prueba");
    }

    #[test]
    fn close_delays_removal_and_guards_double_close() {
        let mut controller = ModalController::new();
        controller.show(spec(ModalAction::CreateCandidate));

        let t0 = Instant::now();
        controller.close_at(t0);
        assert!(controller.active().unwrap().is_closing());

        // Second close shortly after must not extend (or panic on) the
        // already-closing modal.
        controller.close_at(t0 + Duration::from_millis(100));

        controller.sweep(t0 + Duration::from_millis(200));
        assert!(controller.active().is_some(), "removed before the delay");

        controller.sweep(t0 + MODAL_EXIT_DELAY);
        assert!(controller.active().is_none());

        // Sweeping with nothing open is a no-op.
        controller.sweep(t0 + MODAL_EXIT_DELAY);
    }

    #[test]
    fn submit_lifecycle_disables_and_restores_the_control() {
        let mut controller = ModalController::new();
        controller.show(spec(ModalAction::CreateCandidate));
        controller.input('A');

        let (action, values) = controller.begin_submit().unwrap();
        assert_eq!(action, ModalAction::CreateCandidate);
        assert_eq!(values.get("nombre").map(String::as_str), Some("A"));
        assert_eq!(controller.active().unwrap().submit_label(), "Procesando...");

        // Busy: a second submit and further edits are ignored.
        assert!(controller.begin_submit().is_none());
        controller.input('B');
        assert_eq!(
            controller.active().unwrap().fields()[0].value,
            "A".to_string()
        );

        controller.finish_submit(Err(()));
        let modal = controller.active().unwrap();
        assert!(!modal.is_submitting());
        assert_eq!(modal.submit_label(), "Guardar");
        assert!(modal.error().is_some());
        assert_eq!(modal.fields()[0].value, "A", "input kept for retry");

        let _ = controller.begin_submit().unwrap();
        controller.finish_submit(Ok(()));
        assert!(controller.active().unwrap().is_closing());
    }

    #[test]
    fn select_fields_cycle_through_their_options() {
        let mut controller = ModalController::new();
        controller.show(spec(ModalAction::CreateCandidate));
        controller.focus_next();

        assert_eq!(controller.active().unwrap().fields()[1].value, "a");
        controller.cycle_select(1);
        assert_eq!(controller.active().unwrap().fields()[1].value, "b");
        controller.cycle_select(1);
        assert_eq!(controller.active().unwrap().fields()[1].value, "a");
        controller.cycle_select(-1);
        assert_eq!(controller.active().unwrap().fields()[1].value, "b");
    }

    #[test]
    fn confirm_delete_builds_the_danger_variant() {
        let mut controller = ModalController::new();
        controller.confirm_delete("Evento", ModalAction::DeleteEvent(RecordId::new(4)));
        let modal = controller.active().unwrap();
        assert_eq!(modal.title, "Eliminar Evento");
        assert!(modal.danger);
        assert_eq!(modal.submit_label(), "Sí, Eliminar");
        assert!(modal.body.as_deref().unwrap().contains("evento"));
        assert!(modal.fields().is_empty());
        assert!(modal.collect().is_empty());
    }
}
