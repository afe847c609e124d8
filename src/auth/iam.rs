//! IBM Cloud IAM API key authentication.
//!
//! The API key is exchanged for a short-lived bearer token:
//! 1. API key is POSTed to `{iam_url}/identity/token`
//! 2. Token is cached and refreshed when it gets within 60s of expiry
//! 3. Token is included in the `Authorization` header of every request

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tokio::sync::RwLock;
use tracing::{debug, error};
use url::form_urlencoded;
use zeroize::Zeroizing;

use super::{AuthType, Authenticator, validate_credential};
use crate::errors::{WatsonError, WatsonResult};

/// IBM Cloud IAM service URL.
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

const IAM_TOKEN_PATH: &str = "/identity/token";
const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Refresh tokens this long before they expire.
const TOKEN_REFRESH_WINDOW: Duration = Duration::from_secs(60);

/// Assumed token lifetime when IAM omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

/// Upper bound on the lifetime taken from `expires_in`.
const MAX_TOKEN_LIFETIME_SECS: u64 = 24 * 3600;

// =============================================================================
// IAM Token Management
// =============================================================================

/// IAM access token with expiration tracking.
#[derive(Clone)]
struct IamToken {
    /// The bearer token string.
    access_token: Zeroizing<String>,
    /// When the token expires.
    expires_at: Instant,
}

impl IamToken {
    /// Check if the token is expired or about to expire (within 60 seconds).
    fn is_expired(&self) -> bool {
        self.expires_at <= Instant::now() + TOKEN_REFRESH_WINDOW
    }
}

/// IAM token response from IBM Cloud.
#[derive(serde::Deserialize)]
struct IamTokenResponse {
    access_token: String,
    /// Token lifetime in seconds.
    #[serde(default)]
    expires_in: u64,
}

// =============================================================================
// Authenticator
// =============================================================================

/// Exchanges an IBM Cloud API key for IAM bearer tokens.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use watson_sdk::auth::IamAuthenticator;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let authenticator = Arc::new(IamAuthenticator::new("my-api-key")?);
/// # Ok(())
/// # }
/// ```
pub struct IamAuthenticator {
    apikey: Zeroizing<String>,
    url: String,
    client_id: Option<String>,
    client_secret: Option<Zeroizing<String>>,
    scope: Option<String>,
    client: Client,
    token: RwLock<Option<IamToken>>,
}

impl IamAuthenticator {
    /// Create an authenticator against the public IAM endpoint.
    pub fn new(apikey: impl Into<String>) -> WatsonResult<Self> {
        Self::builder(apikey).build()
    }

    pub fn builder(apikey: impl Into<String>) -> IamAuthenticatorBuilder {
        IamAuthenticatorBuilder {
            apikey: Zeroizing::new(apikey.into()),
            url: DEFAULT_IAM_URL.to_string(),
            client_id: None,
            client_secret: None,
            scope: None,
            disable_ssl_verification: false,
        }
    }

    /// Full URL of the token endpoint.
    pub fn token_url(&self) -> String {
        let base = self.url.trim_end_matches('/');
        if base.ends_with(IAM_TOKEN_PATH) {
            base.to_string()
        } else {
            format!("{base}{IAM_TOKEN_PATH}")
        }
    }

    /// Get a valid access token, fetching a new one if needed.
    pub async fn access_token(&self) -> WatsonResult<String> {
        {
            let token_guard = self.token.read().await;
            if let Some(ref token) = *token_guard
                && !token.is_expired()
            {
                return Ok(token.access_token.as_str().to_string());
            }
        }

        let mut token_guard = self.token.write().await;
        // Another task may have refreshed while we waited for the write lock.
        if let Some(ref token) = *token_guard
            && !token.is_expired()
        {
            return Ok(token.access_token.as_str().to_string());
        }

        debug!("Fetching new IAM token...");
        let new_token = self.fetch_token().await?;
        let access_token = new_token.access_token.as_str().to_string();
        *token_guard = Some(new_token);

        Ok(access_token)
    }

    /// Drop the cached token so the next request fetches a fresh one.
    pub async fn invalidate_token(&self) {
        *self.token.write().await = None;
    }

    async fn fetch_token(&self) -> WatsonResult<IamToken> {
        // The serializer is not Send, so it must be gone before the first await.
        let body = Zeroizing::new({
            let mut form = form_urlencoded::Serializer::new(String::new());
            form.append_pair("grant_type", IAM_GRANT_TYPE)
                .append_pair("apikey", &self.apikey)
                .append_pair("response_type", "cloud_iam");
            if let Some(ref scope) = self.scope {
                form.append_pair("scope", scope);
            }
            form.finish()
        });

        let mut request = self
            .client
            .post(self.token_url())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(ACCEPT, "application/json")
            .body(body.as_str().to_string());

        if let (Some(id), Some(secret)) = (&self.client_id, &self.client_secret) {
            request = request.basic_auth(id, Some(secret.as_str()));
        }

        let response = request.send().await.map_err(|e| {
            WatsonError::AuthenticationFailed(format!("Failed to fetch IAM token: {e}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "IAM token request failed");
            return Err(WatsonError::AuthenticationFailed(format!(
                "IAM token request failed with status {status}: {body}"
            )));
        }

        let token_response: IamTokenResponse = response.json().await.map_err(|e| {
            WatsonError::AuthenticationFailed(format!("Failed to parse IAM token: {e}"))
        })?;

        let expires_in = token_lifetime_secs(token_response.expires_in);

        debug!(
            "IAM token fetched successfully, expires in {} seconds",
            expires_in
        );

        Ok(IamToken {
            access_token: Zeroizing::new(token_response.access_token),
            expires_at: expiry_instant(expires_in),
        })
    }
}

/// Lifetime to trust for a token: 1 hour when IAM omits `expires_in`,
/// and never more than a day.
fn token_lifetime_secs(expires_in: u64) -> u64 {
    if expires_in == 0 {
        DEFAULT_TOKEN_LIFETIME_SECS
    } else {
        expires_in.min(MAX_TOKEN_LIFETIME_SECS)
    }
}

fn expiry_instant(expires_in: u64) -> Instant {
    let now = Instant::now();
    now.checked_add(Duration::from_secs(expires_in))
        .unwrap_or_else(|| now + Duration::from_secs(DEFAULT_TOKEN_LIFETIME_SECS))
}

impl fmt::Debug for IamAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IamAuthenticator")
            .field("url", &self.url)
            .field("client_id", &self.client_id)
            .field("scope", &self.scope)
            .field("apikey", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Authenticator for IamAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::Iam
    }

    fn validate(&self) -> WatsonResult<()> {
        validate_credential("apikey", &self.apikey)?;

        match (&self.client_id, &self.client_secret) {
            (Some(_), None) | (None, Some(_)) => Err(WatsonError::InvalidConfiguration(
                "IAM client_id and client_secret must be provided together".to_string(),
            )),
            _ => Ok(()),
        }
    }

    async fn authenticate(&self, headers: &mut HeaderMap) -> WatsonResult<()> {
        let token = Zeroizing::new(self.access_token().await?);
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|e| WatsonError::AuthenticationFailed(format!("Invalid IAM token: {e}")))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

/// Builder for [`IamAuthenticator`].
pub struct IamAuthenticatorBuilder {
    apikey: Zeroizing<String>,
    url: String,
    client_id: Option<String>,
    client_secret: Option<Zeroizing<String>>,
    scope: Option<String>,
    disable_ssl_verification: bool,
}

impl IamAuthenticatorBuilder {
    /// Override the IAM URL (e.g. `https://iam.test.cloud.ibm.com`).
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Authenticate the token request itself with a client ID and secret.
    pub fn client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        let id = client_id.into();
        let secret = client_secret.into();
        self.client_id = (!id.is_empty()).then_some(id);
        self.client_secret = (!secret.is_empty()).then(|| Zeroizing::new(secret));
        self
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn disable_ssl_verification(mut self, disable: bool) -> Self {
        self.disable_ssl_verification = disable;
        self
    }

    pub fn build(self) -> WatsonResult<IamAuthenticator> {
        // Create client with explicit timeouts to prevent indefinite hangs
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .danger_accept_invalid_certs(self.disable_ssl_verification)
            .build()
            .map_err(|e| {
                WatsonError::InvalidConfiguration(format!("Failed to create HTTP client: {e}"))
            })?;

        let authenticator = IamAuthenticator {
            apikey: self.apikey,
            url: self.url,
            client_id: self.client_id,
            client_secret: self.client_secret,
            scope: self.scope,
            client,
            token: RwLock::new(None),
        };
        authenticator.validate()?;
        Ok(authenticator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_expiry_window() {
        let fresh = IamToken {
            access_token: Zeroizing::new("t".to_string()),
            expires_at: Instant::now() + Duration::from_secs(3600),
        };
        assert!(!fresh.is_expired());

        let almost = IamToken {
            access_token: Zeroizing::new("t".to_string()),
            expires_at: Instant::now() + Duration::from_secs(30),
        };
        assert!(almost.is_expired());
    }

    #[test]
    fn test_token_lifetime_is_clamped() {
        assert_eq!(token_lifetime_secs(0), DEFAULT_TOKEN_LIFETIME_SECS);
        assert_eq!(token_lifetime_secs(1200), 1200);
        assert_eq!(token_lifetime_secs(u64::MAX), MAX_TOKEN_LIFETIME_SECS);

        let token = IamToken {
            access_token: Zeroizing::new("t".to_string()),
            expires_at: expiry_instant(token_lifetime_secs(u64::MAX)),
        };
        assert!(!token.is_expired());
    }

    #[test]
    fn test_token_url() {
        let auth = IamAuthenticator::new("key").unwrap();
        assert_eq!(auth.token_url(), "https://iam.cloud.ibm.com/identity/token");

        let auth = IamAuthenticator::builder("key")
            .url("https://iam.test.cloud.ibm.com/")
            .build()
            .unwrap();
        assert_eq!(
            auth.token_url(),
            "https://iam.test.cloud.ibm.com/identity/token"
        );

        let auth = IamAuthenticator::builder("key")
            .url("http://localhost:8080/identity/token")
            .build()
            .unwrap();
        assert_eq!(auth.token_url(), "http://localhost:8080/identity/token");
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            IamAuthenticator::new(""),
            Err(WatsonError::MissingArgument("apikey"))
        ));
        assert!(IamAuthenticator::new("{apikey}").is_err());
        assert!(
            IamAuthenticator::builder("key")
                .client_credentials("bx", "")
                .build()
                .is_err()
        );
        assert!(
            IamAuthenticator::builder("key")
                .client_credentials("bx", "bx")
                .build()
                .is_ok()
        );
    }

    #[test]
    fn test_debug_redacts_apikey() {
        let auth = IamAuthenticator::new("very-secret-key").unwrap();
        assert!(!format!("{auth:?}").contains("very-secret-key"));
    }
}
