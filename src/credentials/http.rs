//! HTTP collaborator used for key probes
//!
//! The validator only needs to know whether a response arrived, its status
//! and body, or why nothing arrived. `TransportError` keeps "no response"
//! apart from everything else so the retry policy can tell them apart.

use crate::credentials::retry::Retryable;
use async_trait::async_trait;
use std::io::ErrorKind as IoErrorKind;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Extra time granted to the blocking client before the async side gives up
const TIMEOUT_GRACE: Duration = Duration::from_secs(2);

/// A single authenticated GET
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

/// Response received from the server, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// No HTTP response was obtained
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Nothing arrived within the timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// DNS failure, refused or reset connection
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The request could not be issued at all (bad header, TLS setup, ...)
    #[error("Request failed: {0}")]
    Other(String),
}

impl Retryable for TransportError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Connect(_))
    }
}

/// Abstract HTTP client
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a GET. Non-2xx statuses are `Ok` responses, not errors.
    async fn get(&self, request: &ProbeRequest) -> Result<HttpResponse, TransportError>;
}

/// `HttpClient` backed by ureq, run on the blocking pool
#[derive(Clone)]
pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    pub fn new() -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .user_agent(concat!("avakit/", env!("CARGO_PKG_VERSION")))
            .build()
            .into();
        Self { agent }
    }
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for UreqClient {
    async fn get(&self, request: &ProbeRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent.clone();
        let owned = request.clone();
        let call = tokio::task::spawn_blocking(move || blocking_get(&agent, &owned));

        match tokio::time::timeout(request.timeout + TIMEOUT_GRACE, call).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(TransportError::Other(format!("request task failed: {}", e))),
            Err(_) => Err(TransportError::Timeout(format!(
                "no response after {:?}",
                request.timeout
            ))),
        }
    }
}

fn blocking_get(agent: &ureq::Agent, request: &ProbeRequest) -> Result<HttpResponse, TransportError> {
    debug!("GET {}", request.url);

    let mut builder = agent.get(&request.url);
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let mut response = builder
        .config()
        .timeout_global(Some(request.timeout))
        .build()
        .call()
        .map_err(classify_ureq_error)?;

    // The status line arrived, so nothing below is a "no response" failure
    let status = response.status().as_u16();
    match response.body_mut().read_to_string() {
        Ok(body) => Ok(HttpResponse { status, body }),
        Err(e) if (200..300).contains(&status) => Err(TransportError::Other(format!(
            "HTTP {} body unreadable: {}",
            status, e
        ))),
        Err(e) => {
            debug!("Ignoring unreadable body of HTTP {}: {}", status, e);
            Ok(HttpResponse {
                status,
                body: String::new(),
            })
        }
    }
}

fn classify_ureq_error(err: ureq::Error) -> TransportError {
    match &err {
        ureq::Error::Timeout(_) => TransportError::Timeout(err.to_string()),
        ureq::Error::Io(io) if io.kind() == IoErrorKind::TimedOut => {
            TransportError::Timeout(err.to_string())
        }
        ureq::Error::Io(_) | ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
            TransportError::Connect(err.to_string())
        }
        _ => TransportError::Other(err.to_string()),
    }
}
