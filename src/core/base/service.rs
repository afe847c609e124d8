use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use tracing::debug;
use url::Url;

use super::request::ServiceRequest;
use crate::auth::{Authenticator, authenticator_from_config};
use crate::config::ServiceConfig;
use crate::errors::{WatsonError, WatsonResult};

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("watson-sdk-rust/", env!("CARGO_PKG_VERSION"));

/// Request timeout used when [`ServiceOptions::timeout`] is not set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Construction options shared by every service client.
#[derive(Clone)]
pub struct ServiceOptions {
    /// Service endpoint; the service default is used when `None`.
    pub service_url: Option<String>,
    pub authenticator: Arc<dyn Authenticator>,
    /// Accept invalid TLS certificates from the service endpoint.
    pub disable_ssl_verification: bool,
    /// Whole-request timeout.
    pub timeout: Option<Duration>,
    /// Headers added to every request.
    pub default_headers: HeaderMap,
}

impl ServiceOptions {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            service_url: None,
            authenticator,
            disable_ssl_verification: false,
            timeout: None,
            default_headers: HeaderMap::new(),
        }
    }

    /// Resolve options from a [`ServiceConfig`].
    pub fn from_config(
        config: &ServiceConfig,
        default_url: &str,
        service_host: &str,
    ) -> WatsonResult<Self> {
        Ok(Self {
            service_url: Some(config.effective_url(default_url, service_host)),
            disable_ssl_verification: config.disable_ssl(),
            ..Self::new(authenticator_from_config(config)?)
        })
    }

    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_disable_ssl_verification(mut self, disable: bool) -> Self {
        self.disable_ssl_verification = disable;
        self
    }
}

impl fmt::Debug for ServiceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceOptions")
            .field("service_url", &self.service_url)
            .field("authenticator", &self.authenticator)
            .field("disable_ssl_verification", &self.disable_ssl_verification)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// State shared by all operations of one service client.
#[derive(Clone)]
pub struct BaseService {
    service_name: &'static str,
    service_url: Url,
    version: Option<String>,
    authenticator: Arc<dyn Authenticator>,
    client: Client,
    default_headers: HeaderMap,
}

impl BaseService {
    pub fn new(
        service_name: &'static str,
        default_url: &str,
        options: ServiceOptions,
    ) -> WatsonResult<Self> {
        options.authenticator.validate()?;

        let service_url = parse_service_url(options.service_url.as_deref().unwrap_or(default_url))?;

        // Create client with explicit timeouts to prevent indefinite hangs
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(options.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .danger_accept_invalid_certs(options.disable_ssl_verification)
            .build()
            .map_err(|e| {
                WatsonError::InvalidConfiguration(format!("Failed to create HTTP client: {e}"))
            })?;

        debug!(
            service = service_name,
            url = %service_url,
            auth_type = %options.authenticator.auth_type(),
            "Initialized Watson service client"
        );

        Ok(Self {
            service_name,
            service_url,
            version: None,
            authenticator: options.authenticator,
            client,
            default_headers: options.default_headers,
        })
    }

    /// Pin the API version date sent as the `version` query argument.
    pub fn with_version(mut self, version: impl Into<String>) -> WatsonResult<Self> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(WatsonError::MissingArgument("version"));
        }
        self.version = Some(version);
        Ok(self)
    }

    pub fn service_name(&self) -> &'static str {
        self.service_name
    }

    pub fn service_url(&self) -> &str {
        self.service_url.as_str().trim_end_matches('/')
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.authenticator
    }

    pub fn set_service_url(&mut self, url: &str) -> WatsonResult<()> {
        self.service_url = parse_service_url(url)?;
        Ok(())
    }

    /// Add a header to every subsequent request (e.g. `X-Watson-Learning-Opt-Out`).
    pub fn set_default_header(&mut self, name: &str, value: &str) -> WatsonResult<()> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| WatsonError::InvalidArgument(format!("Invalid header name: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| WatsonError::InvalidArgument(format!("Invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(())
    }

    pub(crate) fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    /// Start a request to `service_url` + percent-encoded `segments`.
    pub fn request(&self, method: Method, segments: &[&str]) -> ServiceRequest<'_> {
        ServiceRequest::new(self, method, segments)
    }

    /// `.` and `..` are rejected: the URL parser would resolve them and
    /// address a different resource.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> WatsonResult<Url> {
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(WatsonError::InvalidArgument(format!(
                "Path parameter '{segment}' is not a valid identifier"
            )));
        }

        let mut url = self.service_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                WatsonError::InvalidConfiguration(format!(
                    "Service URL cannot be a base: {}",
                    self.service_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl fmt::Debug for BaseService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseService")
            .field("service_name", &self.service_name)
            .field("service_url", &self.service_url.as_str())
            .field("version", &self.version)
            .field("authenticator", &self.authenticator)
            .finish()
    }
}

fn parse_service_url(url: &str) -> WatsonResult<Url> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(WatsonError::InvalidConfiguration(
            "Service URL must not be empty".to_string(),
        ));
    }
    if trimmed.starts_with('{') || trimmed.ends_with('}') || trimmed.starts_with('"') {
        return Err(WatsonError::InvalidConfiguration(format!(
            "The service URL shouldn't start or end with curly brackets or quotes: {trimmed}"
        )));
    }

    let parsed = Url::parse(trimmed)?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(WatsonError::InvalidConfiguration(format!(
            "Unsupported service URL scheme: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::NoAuthAuthenticator;

    fn service(url: &str) -> BaseService {
        BaseService::new(
            "assistant",
            url,
            ServiceOptions::new(Arc::new(NoAuthAuthenticator)),
        )
        .unwrap()
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let mut base = service("https://api.us-south.assistant.watson.cloud.ibm.com/");
        assert_eq!(
            base.service_url(),
            "https://api.us-south.assistant.watson.cloud.ibm.com"
        );

        base.set_service_url("https://example.com/instances/abc/")
            .unwrap();
        assert_eq!(base.service_url(), "https://example.com/instances/abc");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let base = service("https://example.com/instances/abc");
        let url = base
            .endpoint(&["v1", "workspaces", "a/b c", "intents"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/instances/abc/v1/workspaces/a%2Fb%20c/intents"
        );
    }

    #[test]
    fn test_endpoint_rejects_dot_segments() {
        let base = service("https://example.com");
        for id in [".", ".."] {
            let result = base.endpoint(&[
                "v1", "workspaces", "ws1", "intents", "greet", "examples", id,
            ]);
            assert!(
                matches!(result, Err(WatsonError::InvalidArgument(_))),
                "{id} should be rejected"
            );
        }

        let url = base.endpoint(&["v1", "workspaces", "...", "a.b"]).unwrap();
        assert_eq!(url.path(), "/v1/workspaces/.../a.b");
    }

    #[test]
    fn test_invalid_urls_rejected() {
        let auth: Arc<dyn Authenticator> = Arc::new(NoAuthAuthenticator);
        for url in ["", "{https://example.com}", "not a url", "ftp://example.com"] {
            let result = BaseService::new("assistant", url, ServiceOptions::new(auth.clone()));
            assert!(
                matches!(result, Err(WatsonError::InvalidConfiguration(_))),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_version_rejected() {
        let result = service("https://example.com").with_version(" ");
        assert!(matches!(result, Err(WatsonError::MissingArgument("version"))));
    }

    #[test]
    fn test_default_header_validation() {
        let mut base = service("https://example.com");
        base.set_default_header("X-Watson-Learning-Opt-Out", "true")
            .unwrap();
        assert_eq!(
            base.default_headers().get("x-watson-learning-opt-out").unwrap(),
            "true"
        );
        assert!(base.set_default_header("bad header", "x").is_err());
    }

    #[test]
    fn test_user_agent() {
        assert!(USER_AGENT.starts_with("watson-sdk-rust/"));
    }
}
