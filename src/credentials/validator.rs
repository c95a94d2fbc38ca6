//! API key validation against upstream platforms
//!
//! Each validation is one probe of the platform's cheapest authenticated
//! endpoint. Only "no response" failures are retried; any HTTP status is a
//! deterministic answer and is classified straight away.

use crate::config::schema::ValidatorConfig;
use crate::credentials::http::{HttpClient, HttpResponse, ProbeRequest, TransportError, UreqClient};
use crate::credentials::outcome::{ErrorKind, ValidationOutcome};
use crate::credentials::retry::{with_retry, RetryPolicy};
use crate::credentials::secrets::key_fingerprint;
use crate::platform::PlatformId;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Validates API keys by probing the owning platform
pub struct CredentialValidator {
    http: Arc<dyn HttpClient>,
    retry: RetryPolicy,
    timeout: Duration,
    forbidden_as_unauthorized: bool,
}

impl CredentialValidator {
    /// Create a validator over an HTTP client with settings from config
    pub fn new(http: Arc<dyn HttpClient>, config: &ValidatorConfig) -> Self {
        Self {
            http,
            retry: RetryPolicy::from_config(config),
            timeout: Duration::from_secs(config.timeout_secs),
            forbidden_as_unauthorized: config.forbidden_as_unauthorized,
        }
    }

    /// Create a validator using the default ureq client
    pub fn with_config(config: &ValidatorConfig) -> Self {
        Self::new(Arc::new(UreqClient::new()), config)
    }

    /// Replace the retry policy
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Validate a key for a platform given by its string id
    pub async fn validate_for_platform(&self, platform: &str, key: &str) -> ValidationOutcome {
        match platform.parse::<PlatformId>() {
            Ok(platform) => self.validate(platform, key).await,
            Err(_) => {
                debug!("Rejecting validation for unknown platform {:?}", platform);
                ValidationOutcome::failure(
                    ErrorKind::Unknown,
                    format!("unknown platform: {}", platform.trim()),
                )
            }
        }
    }

    /// Validate `key` against `platform`
    pub async fn validate(&self, platform: PlatformId, key: &str) -> ValidationOutcome {
        let key = key.trim();
        if key.is_empty() {
            return ValidationOutcome::from_kind(ErrorKind::Validation, platform);
        }

        info!(
            "Validating key {} against {}",
            key_fingerprint(key),
            platform
        );

        let request = self.probe_request(platform, key);
        let operation = format!("probe {}", platform);

        match with_retry(&self.retry, &operation, || self.http.get(&request)).await {
            Ok(response) => self.classify_response(platform, &response),
            Err(e) => classify_transport_error(platform, &e),
        }
    }

    fn probe_request(&self, platform: PlatformId, key: &str) -> ProbeRequest {
        let (name, value) = platform.auth_header(key);
        ProbeRequest {
            url: platform.probe_url(),
            headers: vec![
                (name, value),
                ("Accept".to_string(), "application/json".to_string()),
            ],
            timeout: self.timeout,
        }
    }

    fn classify_response(&self, platform: PlatformId, response: &HttpResponse) -> ValidationOutcome {
        debug!("{} probe returned HTTP {}", platform, response.status);

        match response.status {
            200..=299 => {
                if serde_json::from_str::<serde_json::Value>(&response.body).is_ok() {
                    info!("Key accepted by {}", platform);
                    ValidationOutcome::success(format!("API key for {} is valid.", platform))
                } else {
                    warn!("{} returned HTTP {} with an unreadable body", platform, response.status);
                    ValidationOutcome::failure(
                        ErrorKind::Unknown,
                        format!("{} sent an unexpected response. Try again later.", platform),
                    )
                }
            }
            401 => ValidationOutcome::from_kind(ErrorKind::KeyInvalid, platform),
            403 if self.forbidden_as_unauthorized => {
                ValidationOutcome::from_kind(ErrorKind::Unauthorized, platform)
            }
            403 => ValidationOutcome::from_kind(ErrorKind::KeyInvalid, platform),
            429 => ValidationOutcome::from_kind(ErrorKind::RateLimited, platform),
            500..=599 => ValidationOutcome::from_kind(ErrorKind::ServerError, platform),
            status => ValidationOutcome::failure(
                ErrorKind::Unknown,
                format!("{} returned an unexpected status (HTTP {}).", platform, status),
            ),
        }
    }
}

fn classify_transport_error(platform: PlatformId, err: &TransportError) -> ValidationOutcome {
    match err {
        TransportError::Timeout(_) => ValidationOutcome::from_kind(ErrorKind::Timeout, platform),
        TransportError::Connect(_) => ValidationOutcome::from_kind(ErrorKind::Network, platform),
        TransportError::Other(detail) => {
            warn!("{} probe could not be sent: {}", platform, detail);
            ValidationOutcome::from_kind(ErrorKind::Unknown, platform)
        }
    }
}
