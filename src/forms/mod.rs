//! Modal form definitions and their typed parsing.
//!
//! A form is described as data — a list of [`FieldSpec`]s — so the modal can
//! render any entity without knowing its shape, and submission comes back as
//! a flat name→value map that the per-entity form types parse and validate.

use std::collections::BTreeMap;

use thiserror::Error;

pub mod call;
pub mod candidate;
pub mod client;
pub mod event;

/// Flat field collection produced by a submitted modal.
pub type FieldValues = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("validation failed: {0}")]
    Invalid(String),
    #[error("invalid number in field {0}")]
    InvalidNumber(&'static str),
    #[error("invalid reference in field {0}")]
    InvalidReference(&'static str),
    #[error("malformed form payload: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        FormError::Decode(err.to_string())
    }
}

/// Input kinds a modal knows how to edit.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    Text,
    Tel,
    Email,
    DateTime,
    Number,
    TextArea,
    Select(Vec<SelectOption>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One input of a modal form.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub initial: String,
    pub required: bool,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            initial: String::new(),
            required: false,
        }
    }

    pub fn initial(mut self, value: impl Into<String>) -> Self {
        self.initial = value.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

pub(crate) fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Re-formats a stored timestamp into the editable `YYYY-MM-DDTHH:MM` shape,
/// passing unparseable values through for the user to fix by hand.
pub(crate) fn datetime_initial(stored: Option<&str>) -> String {
    match stored {
        Some(raw) => match crate::domain::types::parse_timestamp(raw) {
            Some(dt) => dt.format("%Y-%m-%dT%H:%M").to_string(),
            None => raw.to_string(),
        },
        None => String::new(),
    }
}
