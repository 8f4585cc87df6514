//! Submission — backends and the workflow that drives them.

pub mod backend;
pub mod workflow;

pub use backend::{HttpBackend, RegistrationBackend};
pub use workflow::{FAILURE_MESSAGE, Registrar, SubmissionResult};
