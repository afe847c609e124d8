//! Request authentication for Watson services.
//!
//! Every service client holds an `Arc<dyn Authenticator>` that decorates each
//! outgoing request with credentials. Four schemes are supported:
//!
//! | Scheme | Type | Header |
//! |--------|------|--------|
//! | IAM API key | [`IamAuthenticator`] | `Authorization: Bearer <iam token>` |
//! | Basic | [`BasicAuthenticator`] | `Authorization: Basic <base64>` |
//! | Bearer token | [`BearerTokenAuthenticator`] | `Authorization: Bearer <token>` |
//! | None | [`NoAuthAuthenticator`] | - |
//!
//! IAM tokens are exchanged from the API key on first use, cached, and
//! refreshed shortly before they expire.

use std::fmt::Debug;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::config::ServiceConfig;
use crate::errors::{WatsonError, WatsonResult};

mod basic;
mod iam;

pub use basic::{BasicAuthenticator, BearerTokenAuthenticator, NoAuthAuthenticator};
pub use iam::{DEFAULT_IAM_URL, IamAuthenticator, IamAuthenticatorBuilder};

/// Authentication scheme identifiers as used in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    Iam,
    Basic,
    BearerToken,
    NoAuth,
}

impl AuthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Iam => "iam",
            Self::Basic => "basic",
            Self::BearerToken => "bearerToken",
            Self::NoAuth => "noAuth",
        }
    }
}

impl std::fmt::Display for AuthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = WatsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "iam" => Ok(Self::Iam),
            "basic" => Ok(Self::Basic),
            "bearertoken" | "bearer_token" | "bearer" => Ok(Self::BearerToken),
            "noauth" | "no_auth" | "none" => Ok(Self::NoAuth),
            _ => Err(WatsonError::InvalidConfiguration(format!(
                "Unsupported auth type: {s}. Supported types: iam, basic, bearerToken, noAuth"
            ))),
        }
    }
}

/// Decorates outgoing requests with credentials.
#[async_trait]
pub trait Authenticator: Send + Sync + Debug {
    /// The scheme implemented by this authenticator.
    fn auth_type(&self) -> AuthType;

    /// Check the stored credentials without touching the network.
    fn validate(&self) -> WatsonResult<()>;

    /// Add authentication headers to a request.
    async fn authenticate(&self, headers: &mut HeaderMap) -> WatsonResult<()>;
}

/// Build an authenticator from a [`ServiceConfig`].
///
/// When `auth_type` is not set it is inferred: an API key selects IAM, a
/// username/password pair selects basic auth, and a bearer token selects
/// bearer auth.
pub fn authenticator_from_config(config: &ServiceConfig) -> WatsonResult<Arc<dyn Authenticator>> {
    let auth_type = match config.auth_type {
        Some(auth_type) => auth_type,
        None => infer_auth_type(config).ok_or_else(|| {
            WatsonError::InvalidConfiguration(
                "No credentials configured: set an API key, username/password or bearer token"
                    .to_string(),
            )
        })?,
    };

    let authenticator: Arc<dyn Authenticator> = match auth_type {
        AuthType::Iam => {
            let apikey = config.apikey.as_ref().ok_or_else(|| {
                WatsonError::InvalidConfiguration("IAM authentication requires an API key".into())
            })?;

            let mut builder = IamAuthenticator::builder(apikey.as_str())
                .disable_ssl_verification(config.auth_disable_ssl());
            if let Some(ref url) = config.auth_url {
                builder = builder.url(url);
            }
            if let Some(ref scope) = config.auth_scope {
                builder = builder.scope(scope);
            }
            if config.auth_client_id.is_some() || config.auth_client_secret.is_some() {
                builder = builder.client_credentials(
                    config.auth_client_id.clone().unwrap_or_default(),
                    config
                        .auth_client_secret
                        .as_ref()
                        .map(|s| s.as_str().to_string())
                        .unwrap_or_default(),
                );
            }
            Arc::new(builder.build()?)
        }
        AuthType::Basic => {
            let username = config.username.clone().unwrap_or_default();
            let password = config
                .password
                .as_ref()
                .map(|p| p.as_str().to_string())
                .unwrap_or_default();
            Arc::new(BasicAuthenticator::new(username, password)?)
        }
        AuthType::BearerToken => {
            let token = config
                .bearer_token
                .as_ref()
                .map(|t| t.as_str().to_string())
                .unwrap_or_default();
            Arc::new(BearerTokenAuthenticator::new(token)?)
        }
        AuthType::NoAuth => Arc::new(NoAuthAuthenticator),
    };

    Ok(authenticator)
}

fn infer_auth_type(config: &ServiceConfig) -> Option<AuthType> {
    if config.apikey.is_some() {
        Some(AuthType::Iam)
    } else if config.username.is_some() && config.password.is_some() {
        Some(AuthType::Basic)
    } else if config.bearer_token.is_some() {
        Some(AuthType::BearerToken)
    } else {
        None
    }
}

/// Reject credential values that were pasted with surrounding braces or quotes.
pub(crate) fn validate_credential(name: &'static str, value: &str) -> WatsonResult<()> {
    if value.trim().is_empty() {
        return Err(WatsonError::MissingArgument(name));
    }

    let has_wrapping = |open: char, close: char| value.starts_with(open) || value.ends_with(close);
    if has_wrapping('{', '}') || has_wrapping('"', '"') {
        return Err(WatsonError::InvalidConfiguration(format!(
            "The {name} shouldn't start or end with curly brackets or quotes. Remove any surrounding {{, }}, or \" characters."
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zeroize::Zeroizing;

    #[test]
    fn test_auth_type_parsing() {
        assert_eq!("IAM".parse::<AuthType>().unwrap(), AuthType::Iam);
        assert_eq!("basic".parse::<AuthType>().unwrap(), AuthType::Basic);
        assert_eq!(
            "bearerToken".parse::<AuthType>().unwrap(),
            AuthType::BearerToken
        );
        assert_eq!("noauth".parse::<AuthType>().unwrap(), AuthType::NoAuth);
        assert!("digest".parse::<AuthType>().is_err());
    }

    #[test]
    fn test_validate_credential() {
        assert!(validate_credential("apikey", "abc-123").is_ok());
        assert!(matches!(
            validate_credential("apikey", "  "),
            Err(WatsonError::MissingArgument("apikey"))
        ));
        assert!(validate_credential("apikey", "{abc}").is_err());
        assert!(validate_credential("apikey", "\"abc\"").is_err());
    }

    #[test]
    fn test_infer_iam_from_apikey() {
        let config = ServiceConfig {
            apikey: Some(Zeroizing::new("key".to_string())),
            ..Default::default()
        };
        let auth = authenticator_from_config(&config).unwrap();
        assert_eq!(auth.auth_type(), AuthType::Iam);
    }

    #[test]
    fn test_infer_basic_from_username_password() {
        let config = ServiceConfig {
            username: Some("user".to_string()),
            password: Some(Zeroizing::new("pass".to_string())),
            ..Default::default()
        };
        let auth = authenticator_from_config(&config).unwrap();
        assert_eq!(auth.auth_type(), AuthType::Basic);
    }

    #[test]
    fn test_infer_bearer() {
        let config = ServiceConfig {
            bearer_token: Some(Zeroizing::new("token".to_string())),
            ..Default::default()
        };
        let auth = authenticator_from_config(&config).unwrap();
        assert_eq!(auth.auth_type(), AuthType::BearerToken);
    }

    #[test]
    fn test_explicit_noauth() {
        let config = ServiceConfig {
            auth_type: Some(AuthType::NoAuth),
            ..Default::default()
        };
        let auth = authenticator_from_config(&config).unwrap();
        assert_eq!(auth.auth_type(), AuthType::NoAuth);
    }

    #[test]
    fn test_no_credentials_is_error() {
        let result = authenticator_from_config(&ServiceConfig::default());
        assert!(matches!(result, Err(WatsonError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_explicit_iam_without_apikey_is_error() {
        let config = ServiceConfig {
            auth_type: Some(AuthType::Iam),
            username: Some("user".to_string()),
            ..Default::default()
        };
        let result = authenticator_from_config(&config);
        assert!(matches!(result, Err(WatsonError::InvalidConfiguration(msg)) if msg.contains("API key")));
    }

    #[test]
    fn test_iam_half_client_credentials_is_error() {
        let config = ServiceConfig {
            apikey: Some(Zeroizing::new("key".to_string())),
            auth_client_id: Some("bx".to_string()),
            ..Default::default()
        };
        let result = authenticator_from_config(&config);
        assert!(matches!(result, Err(WatsonError::InvalidConfiguration(_))));
    }
}
