//! Form state store — field values plus the submit lifecycle flags.

use serde::{Deserialize, Serialize};

use super::model::{FormField, RegistrationForm};
use super::payload::RegistrationPayload;

/// The UI-facing phase of the form, derived from the store flags.
///
/// Editing → Submitting → Success | EditingWithError. Success only leaves
/// through a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    Editing,
    Submitting,
    Success,
    EditingWithError,
}

impl FormPhase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: FormPhase) -> bool {
        use FormPhase::*;
        matches!(
            (self, target),
            (Editing, Submitting)
                | (EditingWithError, Submitting)
                | (Submitting, Success)
                | (Submitting, EditingWithError)
                | (Success, Editing)
                | (EditingWithError, Editing)
                | (Editing, Editing)
        )
    }

    /// Whether the form fields are shown and editable in this phase.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Editing | Self::EditingWithError)
    }
}

impl Default for FormPhase {
    fn default() -> Self {
        Self::Editing
    }
}

impl std::fmt::Display for FormPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Editing => "editing",
            Self::Submitting => "submitting",
            Self::Success => "success",
            Self::EditingWithError => "editing_with_error",
        };
        write!(f, "{s}")
    }
}

/// Result of one submission attempt, as fed back into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Success,
    Failure(String),
}

/// Single owner of the form values and the `loading`/`success`/`error` flags.
#[derive(Debug, Clone, Default)]
pub struct FormStore {
    form: RegistrationForm,
    loading: bool,
    success: bool,
    error: String,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn get(&self, field: FormField) -> &str {
        self.form.get(field)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Message of the last failed attempt, if any.
    pub fn error(&self) -> Option<&str> {
        (!self.error.is_empty()).then_some(self.error.as_str())
    }

    pub fn phase(&self) -> FormPhase {
        if self.loading {
            FormPhase::Submitting
        } else if self.success {
            FormPhase::Success
        } else if !self.error.is_empty() {
            FormPhase::EditingWithError
        } else {
            FormPhase::Editing
        }
    }

    /// Wire payload for the current values.
    pub fn payload(&self) -> RegistrationPayload {
        RegistrationPayload::from(&self.form)
    }

    /// Update exactly one field.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Clear every field and return to a fresh editing state.
    pub fn reset_all(&mut self) {
        self.form = RegistrationForm::default();
        self.error.clear();
        self.success = false;
    }

    /// Mark a submission as in flight.
    ///
    /// Does not guard against re-entry; callers check `is_loading` first.
    pub fn begin_submit(&mut self) {
        self.loading = true;
        self.success = false;
        self.error.clear();
    }

    pub fn complete_submit(&mut self, outcome: SubmitOutcome) {
        self.loading = false;
        match outcome {
            SubmitOutcome::Success => {
                self.success = true;
                self.error.clear();
            }
            SubmitOutcome::Failure(message) => {
                self.success = false;
                self.error = message;
            }
        }
    }
}
