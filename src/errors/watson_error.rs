//! Error type shared by every Watson service client.
//!
//! Required-argument checks fail with [`WatsonError::MissingArgument`] before
//! any network activity. Everything that comes back from the wire is surfaced
//! as-is: no retry, no transient/permanent classification.

use std::fmt;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde_json::Value;
use thiserror::Error;

/// Header IBM Cloud uses to correlate a request with server-side logs.
pub const TRANSACTION_ID_HEADER: &str = "x-global-transaction-id";

/// Legacy transaction header still returned by some Watson deployments.
pub const LEGACY_TRANSACTION_ID_HEADER: &str = "x-dp-watson-tran-id";

pub type WatsonResult<T> = Result<T, WatsonError>;

#[derive(Debug, Error)]
pub enum WatsonError {
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{0}")]
    Service(ServiceError),

    #[error("Failed to parse response: {0}")]
    Deserialization(String),
}

impl WatsonError {
    /// HTTP status of a service error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service(err) => Some(err.status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn as_service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Service(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WatsonError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Deserialization(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for WatsonError {
    fn from(err: serde_json::Error) -> Self {
        Self::Deserialization(err.to_string())
    }
}

impl From<url::ParseError> for WatsonError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidConfiguration(format!("Invalid service URL: {err}"))
    }
}

/// Non-2xx response returned by a Watson service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceError {
    /// HTTP status code.
    pub status: u16,
    /// Human readable message extracted from the error body.
    pub message: String,
    /// Service-specific error code when the body carries one.
    pub code: Option<i64>,
    /// Value of the global transaction header, if present.
    pub transaction_id: Option<String>,
    /// Parsed JSON body, when the body was JSON.
    pub body: Option<Value>,
}

impl ServiceError {
    /// Build a service error from a response status, headers and raw body.
    pub fn from_parts(status: StatusCode, headers: &HeaderMap, raw_body: &str) -> Self {
        let body: Option<Value> = serde_json::from_str(raw_body).ok();

        let message = body
            .as_ref()
            .and_then(extract_message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        let code = body
            .as_ref()
            .and_then(|b| b.get("code"))
            .and_then(Value::as_i64);

        let transaction_id = [TRANSACTION_ID_HEADER, LEGACY_TRANSACTION_ID_HEADER]
            .iter()
            .find_map(|name| headers.get(*name))
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self {
            status: status.as_u16(),
            message,
            code,
            transaction_id,
            body,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Service error ({}): {}", self.status, self.message)?;
        if let Some(ref tid) = self.transaction_id {
            write!(f, " [transaction id: {tid}]")?;
        }
        Ok(())
    }
}

/// Watson services do not agree on an error body shape; check the known ones.
fn extract_message(body: &Value) -> Option<String> {
    if let Some(msg) = body
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(|first| first.get("message"))
        .and_then(Value::as_str)
    {
        return Some(msg.to_string());
    }

    ["error", "message", "errorMessage"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
