//! Registration form — field model, state store, and wire payload.
//!
//! The store keeps every field as a plain string while it is edited. The
//! empty-string-to-`null` coercion for optional fields lives only in
//! `RegistrationPayload`, applied right before a submission.

pub mod model;
pub mod payload;
pub mod state;

pub use model::{EXTRACURRICULARS, FieldKind, FormField, RegistrationForm, SCHEDULE_DAYS};
pub use payload::RegistrationPayload;
pub use state::{FormPhase, FormStore, SubmitOutcome};
