//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Backend used when `BACKEND_URL` is unset.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Path of the registration endpoint, relative to the backend base.
pub const REGISTRATIONS_PATH: &str = "/api/registrations";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub backend_url: String,
    /// Request timeout. `None` leaves the transport defaults in place.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("BACKEND_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        reqwest::Url::parse(&raw_url).map_err(|e| ConfigError::InvalidValue {
            key: "BACKEND_URL".into(),
            message: format!("{raw_url:?} is not an absolute URL ({e})"),
        })?;

        let request_timeout = match lookup("REGISTRATION_TIMEOUT_SECS") {
            Some(raw) if !raw.trim().is_empty() => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: "REGISTRATION_TIMEOUT_SECS".into(),
                    message: format!("{raw:?} is not a whole number of seconds"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "REGISTRATION_TIMEOUT_SECS".into(),
                        message: "must be greater than zero".into(),
                    });
                }
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        Ok(Self {
            backend_url: raw_url.trim_end_matches('/').to_string(),
            request_timeout,
        })
    }

    /// Full URL of the registration endpoint.
    pub fn registrations_url(&self) -> String {
        format!("{}{}", self.backend_url, REGISTRATIONS_PATH)
    }
}
