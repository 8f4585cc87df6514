//! Submission workflow — guards re-entry, sends one request, records the result.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::backend::{HttpBackend, RegistrationBackend};
use crate::config::ClientConfig;
use crate::error;
use crate::form::{FormField, FormPhase, FormStore, SubmitOutcome};

/// Message shown to the user whenever a submission fails, whatever the cause.
pub const FAILURE_MESSAGE: &str = "Failed to save, try again.";

/// What a call to [`Registrar::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// The backend confirmed the registration.
    Saved,
    /// The attempt failed; the store now carries `message`.
    Failed { message: String },
    /// Another submission was already in flight; nothing was sent.
    InFlight,
    /// The form already shows its success view; nothing was sent.
    AlreadySubmitted,
}

/// Owns the form store and drives submissions against a backend.
pub struct Registrar {
    store: Arc<RwLock<FormStore>>,
    backend: Arc<dyn RegistrationBackend>,
}

impl Registrar {
    pub fn new(backend: Arc<dyn RegistrationBackend>) -> Arc<Self> {
        Arc::new(Self {
            store: Arc::new(RwLock::new(FormStore::new())),
            backend,
        })
    }

    /// Registrar posting to the HTTP backend described by `config`.
    pub fn from_config(config: &ClientConfig) -> error::Result<Arc<Self>> {
        let backend = HttpBackend::new(config)?;
        Ok(Self::new(Arc::new(backend)))
    }

    /// A copy of the current store, for rendering.
    pub async fn snapshot(&self) -> FormStore {
        self.store.read().await.clone()
    }

    pub async fn set_field(&self, field: FormField, value: impl Into<String>) {
        self.store.write().await.set_field(field, value);
    }

    pub async fn reset(&self) {
        self.store.write().await.reset_all();
        debug!("Form reset");
    }

    /// Submit the current values.
    ///
    /// The request runs on its own task, so the store always records the
    /// outcome even if the caller stops waiting. The store lock is released
    /// while the request is in flight; a concurrent call in that window
    /// returns [`SubmissionResult::InFlight`].
    pub async fn submit(&self) -> SubmissionResult {
        let payload = {
            let mut store = self.store.write().await;
            let phase = store.phase();
            if !phase.can_transition_to(FormPhase::Submitting) {
                debug!(%phase, "Submit ignored");
                return match phase {
                    FormPhase::Submitting => SubmissionResult::InFlight,
                    _ => SubmissionResult::AlreadySubmitted,
                };
            }
            store.begin_submit();
            store.payload()
        };

        info!(
            backend = self.backend.name(),
            extracurricular = %payload.extracurricular,
            "Submitting registration"
        );
        if let Ok(body) = serde_json::to_string(&payload) {
            debug!(%body, "Registration payload");
        }

        let store = Arc::clone(&self.store);
        let backend = Arc::clone(&self.backend);
        let request = tokio::spawn(async move {
            let outcome = match backend.submit(&payload).await {
                Ok(()) => {
                    info!(backend = backend.name(), "Registration saved");
                    SubmitOutcome::Success
                }
                Err(e) => {
                    warn!(backend = backend.name(), error = %e, "Registration failed");
                    SubmitOutcome::Failure(FAILURE_MESSAGE.to_string())
                }
            };
            store.write().await.complete_submit(outcome.clone());
            outcome
        });

        let outcome = match request.await {
            Ok(outcome) => outcome,
            Err(e) => {
                // The task panicked before recording anything.
                warn!(error = %e, "Registration task failed");
                let outcome = SubmitOutcome::Failure(FAILURE_MESSAGE.to_string());
                self.store.write().await.complete_submit(outcome.clone());
                outcome
            }
        };

        match outcome {
            SubmitOutcome::Success => SubmissionResult::Saved,
            SubmitOutcome::Failure(message) => SubmissionResult::Failed { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::error::SubmitError;
    use crate::form::RegistrationPayload;

    /// Records every payload and answers with a fixed result.
    struct StubBackend {
        fail: bool,
        received: Mutex<Vec<RegistrationPayload>>,
    }

    impl StubBackend {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                received: Mutex::new(Vec::new()),
            })
        }

        fn received(&self) -> Vec<RegistrationPayload> {
            self.received.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RegistrationBackend for StubBackend {
        fn name(&self) -> &str {
            "stub"
        }

        async fn submit(&self, payload: &RegistrationPayload) -> Result<(), SubmitError> {
            self.received.lock().unwrap().push(payload.clone());
            if self.fail {
                Err(SubmitError::Status { status: 500 })
            } else {
                Ok(())
            }
        }
    }

    /// Holds every request until released.
    struct GatedBackend {
        gate: Notify,
        calls: Mutex<u32>,
    }

    #[async_trait]
    impl RegistrationBackend for GatedBackend {
        fn name(&self) -> &str {
            "gated"
        }

        async fn submit(&self, _payload: &RegistrationPayload) -> Result<(), SubmitError> {
            *self.calls.lock().unwrap() += 1;
            self.gate.notified().await;
            Ok(())
        }
    }

    async fn fill_required(registrar: &Registrar) {
        registrar.set_field(FormField::StudentName, "Budi Santoso").await;
        registrar.set_field(FormField::StudentId, "1234567890").await;
        registrar.set_field(FormField::Grade, "10").await;
        registrar.set_field(FormField::ClassName, "10 IPA 2").await;
        registrar.set_field(FormField::Phone, "081234567890").await;
        registrar.set_field(FormField::Extracurricular, "Pramuka").await;
    }

    #[tokio::test]
    async fn successful_submission_sends_nulls_for_empty_optionals() {
        let backend = StubBackend::new(false);
        let registrar = Registrar::new(backend.clone());
        fill_required(&registrar).await;

        assert_eq!(registrar.submit().await, SubmissionResult::Saved);

        let store = registrar.snapshot().await;
        assert!(store.is_success());
        assert!(!store.is_loading());
        assert_eq!(store.error(), None);
        assert_eq!(store.phase(), FormPhase::Success);

        let sent = backend.received();
        assert_eq!(sent.len(), 1);
        let body = serde_json::to_value(&sent[0]).unwrap();
        assert_eq!(body["student_name"], "Budi Santoso");
        assert_eq!(body["student_id"], "1234567890");
        assert_eq!(body["grade"], "10");
        assert_eq!(body["class_name"], "10 IPA 2");
        assert_eq!(body["phone"], "081234567890");
        assert_eq!(body["extracurricular"], "Pramuka");
        for key in [
            "email",
            "parent_name",
            "parent_phone",
            "motivation",
            "experience",
            "preferred_schedule",
        ] {
            assert!(body[key].is_null(), "{key} should be null");
        }
    }

    #[tokio::test]
    async fn failed_submission_keeps_values_and_sets_message() {
        let backend = StubBackend::new(true);
        let registrar = Registrar::new(backend.clone());
        fill_required(&registrar).await;
        let before = registrar.snapshot().await.form().clone();

        let result = registrar.submit().await;
        assert_eq!(
            result,
            SubmissionResult::Failed {
                message: FAILURE_MESSAGE.to_string()
            }
        );

        let store = registrar.snapshot().await;
        assert!(!store.is_success());
        assert!(!store.is_loading());
        assert_eq!(store.error(), Some("Failed to save, try again."));
        assert_eq!(store.form(), &before);
        assert_eq!(store.phase(), FormPhase::EditingWithError);
    }

    #[tokio::test]
    async fn manual_resubmission_after_failure_is_allowed() {
        let backend = StubBackend::new(true);
        let registrar = Registrar::new(backend.clone());
        fill_required(&registrar).await;

        registrar.submit().await;
        registrar.submit().await;

        assert_eq!(backend.received().len(), 2);
    }

    #[tokio::test]
    async fn submit_after_success_is_refused_until_reset() {
        let backend = StubBackend::new(false);
        let registrar = Registrar::new(backend.clone());
        fill_required(&registrar).await;

        assert_eq!(registrar.submit().await, SubmissionResult::Saved);
        assert_eq!(registrar.submit().await, SubmissionResult::AlreadySubmitted);
        assert_eq!(backend.received().len(), 1);

        registrar.reset().await;
        let store = registrar.snapshot().await;
        assert_eq!(store.phase(), FormPhase::Editing);
        assert!(store.form().is_blank());
    }

    #[tokio::test]
    async fn second_submit_while_in_flight_is_ignored() {
        let backend = Arc::new(GatedBackend {
            gate: Notify::new(),
            calls: Mutex::new(0),
        });
        let registrar = Registrar::new(backend.clone());
        fill_required(&registrar).await;

        let first = tokio::spawn({
            let registrar = Arc::clone(&registrar);
            async move { registrar.submit().await }
        });

        // Wait until the first request is parked inside the backend.
        while *backend.calls.lock().unwrap() == 0 {
            tokio::task::yield_now().await;
        }
        let store = registrar.snapshot().await;
        assert!(store.is_loading());
        assert_eq!(store.phase(), FormPhase::Submitting);

        assert_eq!(registrar.submit().await, SubmissionResult::InFlight);

        backend.gate.notify_one();
        assert_eq!(first.await.unwrap(), SubmissionResult::Saved);
        assert_eq!(*backend.calls.lock().unwrap(), 1);
        assert!(registrar.snapshot().await.is_success());
    }

    #[tokio::test]
    async fn abandoned_submit_still_records_the_outcome() {
        let backend = Arc::new(GatedBackend {
            gate: Notify::new(),
            calls: Mutex::new(0),
        });
        let registrar = Registrar::new(backend.clone());
        fill_required(&registrar).await;

        // Stop waiting while the request is parked inside the backend.
        let waited = tokio::time::timeout(Duration::from_millis(50), registrar.submit()).await;
        assert!(waited.is_err());
        assert_eq!(registrar.snapshot().await.phase(), FormPhase::Submitting);

        backend.gate.notify_one();
        while registrar.snapshot().await.is_loading() {
            tokio::task::yield_now().await;
        }

        let store = registrar.snapshot().await;
        assert_eq!(store.phase(), FormPhase::Success);
        assert_eq!(*backend.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn abandoned_failing_submit_allows_a_new_attempt() {
        let backend = StubBackend::new(true);
        let registrar = Registrar::new(backend.clone());
        fill_required(&registrar).await;

        // Polled once, then dropped before the request task has run.
        let abandoned = tokio::time::timeout(Duration::ZERO, registrar.submit()).await;
        assert!(abandoned.is_err());

        while registrar.snapshot().await.is_loading() {
            tokio::task::yield_now().await;
        }
        assert_eq!(
            registrar.snapshot().await.phase(),
            FormPhase::EditingWithError
        );
        assert!(matches!(
            registrar.submit().await,
            SubmissionResult::Failed { .. }
        ));
        assert_eq!(backend.received().len(), 2);
    }

    #[tokio::test]
    async fn from_config_builds_an_http_registrar() {
        let registrar = Registrar::from_config(&ClientConfig::default()).unwrap();
        assert_eq!(registrar.backend.name(), "http");
        assert_eq!(registrar.snapshot().await.phase(), FormPhase::Editing);
    }
}
