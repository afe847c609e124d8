//! Validation for callback URLs registered with asynchronous recognition.
//!
//! Speech to Text calls these URLs from the public internet, so they must be
//! absolute `http`/`https` URLs with a host. Plain `http` is accepted but
//! logged, since the service only signs callbacks when a user secret is set.

use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::errors::WatsonError;

/// Errors that can occur during URL validation
#[derive(Debug, Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("URL scheme must be http or https, got: {0}")]
    UnsupportedScheme(String),

    #[error("URL must have a host")]
    MissingHost,

    #[error("URL must not embed credentials")]
    EmbeddedCredentials,
}

impl From<UrlValidationError> for WatsonError {
    fn from(err: UrlValidationError) -> Self {
        WatsonError::InvalidArgument(format!("callback_url: {err}"))
    }
}

/// Validates a callback URL and returns it parsed.
///
/// # Example
/// ```
/// use watson_sdk::utils::validate_callback_url;
///
/// assert!(validate_callback_url("https://example.com/results").is_ok());
/// assert!(validate_callback_url("ftp://example.com/results").is_err());
/// assert!(validate_callback_url("/relative/path").is_err());
/// ```
pub fn validate_callback_url(url: &str) -> Result<Url, UrlValidationError> {
    let parsed = Url::parse(url.trim())?;

    match parsed.scheme() {
        "https" => {}
        "http" => warn!(url = %parsed, "Callback URL does not use HTTPS"),
        other => return Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }

    // Use parsed.host() which correctly identifies IPv4 and IPv6 addresses
    match parsed.host() {
        Some(url::Host::Domain(d)) if d.is_empty() => return Err(UrlValidationError::MissingHost),
        Some(_) => {}
        None => return Err(UrlValidationError::MissingHost),
    }

    if !parsed.username().is_empty() || parsed.password().is_some() {
        return Err(UrlValidationError::EmbeddedCredentials);
    }

    Ok(parsed)
}
