//! Static-credential authenticators.

use std::fmt;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tokio::sync::RwLock;
use zeroize::Zeroizing;

use super::{AuthType, Authenticator, validate_credential};
use crate::errors::{WatsonError, WatsonResult};

fn authorization_value(value: &str) -> WatsonResult<HeaderValue> {
    let mut header = HeaderValue::from_str(value).map_err(|e| {
        WatsonError::InvalidConfiguration(format!("Credentials are not a valid header value: {e}"))
    })?;
    header.set_sensitive(true);
    Ok(header)
}

/// Sends no credentials at all (e.g. for a local or proxied deployment).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuthAuthenticator;

#[async_trait]
impl Authenticator for NoAuthAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::NoAuth
    }

    fn validate(&self) -> WatsonResult<()> {
        Ok(())
    }

    async fn authenticate(&self, _headers: &mut HeaderMap) -> WatsonResult<()> {
        Ok(())
    }
}

/// HTTP basic authentication with a username and password.
pub struct BasicAuthenticator {
    username: String,
    password: Zeroizing<String>,
}

impl BasicAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> WatsonResult<Self> {
        let authenticator = Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        };
        authenticator.validate()?;
        Ok(authenticator)
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for BasicAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuthenticator")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Authenticator for BasicAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::Basic
    }

    fn validate(&self) -> WatsonResult<()> {
        validate_credential("username", &self.username)?;
        validate_credential("password", &self.password)
    }

    async fn authenticate(&self, headers: &mut HeaderMap) -> WatsonResult<()> {
        let encoded = Zeroizing::new(STANDARD.encode(format!(
            "{}:{}",
            self.username,
            self.password.as_str()
        )));
        headers.insert(AUTHORIZATION, authorization_value(&format!("Basic {}", *encoded))?);
        Ok(())
    }
}

/// Sends a caller-managed bearer token.
///
/// The SDK never refreshes this token; call [`set_token`](Self::set_token)
/// when it is rotated.
pub struct BearerTokenAuthenticator {
    token: RwLock<Zeroizing<String>>,
}

impl BearerTokenAuthenticator {
    pub fn new(token: impl Into<String>) -> WatsonResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(WatsonError::MissingArgument("bearer_token"));
        }
        Ok(Self {
            token: RwLock::new(Zeroizing::new(token)),
        })
    }

    /// Replace the token used for subsequent requests.
    pub async fn set_token(&self, token: impl Into<String>) -> WatsonResult<()> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(WatsonError::MissingArgument("bearer_token"));
        }
        *self.token.write().await = Zeroizing::new(token);
        Ok(())
    }
}

impl fmt::Debug for BearerTokenAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerTokenAuthenticator")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Authenticator for BearerTokenAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::BearerToken
    }

    fn validate(&self) -> WatsonResult<()> {
        Ok(())
    }

    async fn authenticate(&self, headers: &mut HeaderMap) -> WatsonResult<()> {
        let token = self.token.read().await;
        headers.insert(
            AUTHORIZATION,
            authorization_value(&format!("Bearer {}", token.as_str()))?,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_header() {
        let auth = BasicAuthenticator::new("apikey", "secret").unwrap();
        let mut headers = HeaderMap::new();
        auth.authenticate(&mut headers).await.unwrap();

        // base64("apikey:secret")
        assert_eq!(
            headers.get(AUTHORIZATION).unwrap(),
            "Basic YXBpa2V5OnNlY3JldA=="
        );
        assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
    }

    #[test]
    fn test_basic_rejects_empty_and_wrapped() {
        assert!(matches!(
            BasicAuthenticator::new("", "secret"),
            Err(WatsonError::MissingArgument("username"))
        ));
        assert!(matches!(
            BasicAuthenticator::new("user", ""),
            Err(WatsonError::MissingArgument("password"))
        ));
        assert!(matches!(
            BasicAuthenticator::new("{user}", "secret"),
            Err(WatsonError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_basic_debug_redacts_password() {
        let auth = BasicAuthenticator::new("user", "hunter2").unwrap();
        let debug = format!("{auth:?}");
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_bearer_header_and_rotation() {
        let auth = BearerTokenAuthenticator::new("first").unwrap();
        let mut headers = HeaderMap::new();
        auth.authenticate(&mut headers).await.unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer first");

        auth.set_token("second").await.unwrap();
        auth.authenticate(&mut headers).await.unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer second");

        assert!(auth.set_token("").await.is_err());
    }

    #[tokio::test]
    async fn test_noauth_adds_nothing() {
        let mut headers = HeaderMap::new();
        NoAuthAuthenticator.authenticate(&mut headers).await.unwrap();
        assert!(headers.is_empty());
    }
}
