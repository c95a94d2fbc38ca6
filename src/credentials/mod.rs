//! API key validation and storage
//!
//! `CredentialValidator` answers "does this platform accept this key?"
//! with a `ValidationOutcome`; it never stores keys. Persisting an accepted
//! key goes through a `SecretStore`.

pub mod http;
pub mod outcome;
pub mod retry;
pub mod secrets;
pub mod validator;

pub use http::{HttpClient, HttpResponse, ProbeRequest, TransportError, UreqClient};
pub use outcome::{ErrorKind, ValidationOutcome};
pub use retry::RetryPolicy;
pub use secrets::{key_fingerprint, mask_key, FileSecretStore, SecretStore};
pub use validator::CredentialValidator;
