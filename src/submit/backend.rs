//! Registration backends — where a payload goes when the form is submitted.

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::error::{ConfigError, SubmitError};
use crate::form::RegistrationPayload;

/// A destination for registration payloads.
///
/// Implementations perform exactly one attempt per call. Any `Ok` is a
/// confirmed registration; the response body is not inspected.
#[async_trait]
pub trait RegistrationBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    async fn submit(&self, payload: &RegistrationPayload) -> Result<(), SubmitError>;
}

/// Backend that POSTs the payload as JSON to `<base>/api/registrations`.
pub struct HttpBackend {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            endpoint: config.registrations_url(),
            client,
        })
    }
}

#[async_trait]
impl RegistrationBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn submit(&self, payload: &RegistrationPayload) -> Result<(), SubmitError> {
        // `.json()` sets `Content-Type: application/json`.
        let resp = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            tracing::debug!(status = %status, endpoint = %self.endpoint, "Registration accepted");
            return Ok(());
        }

        Err(SubmitError::Status {
            status: status.as_u16(),
        })
    }
}
