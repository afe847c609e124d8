//! Credential and endpoint configuration for Watson services.
//!
//! A [`ServiceConfig`] holds everything needed to construct a service client:
//! the service URL (or region) and the authentication settings. It can be
//! loaded from several sources:
//!
//! - `credentials`: an `ibm-credentials.env` file (`KEY=value` lines)
//! - process environment variables
//! - `yaml`: a YAML document keyed by service name
//!
//! Keys are prefixed with the upper-cased service name, e.g. for
//! `speech_to_text`:
//!
//! ```text
//! SPEECH_TO_TEXT_APIKEY=...
//! SPEECH_TO_TEXT_URL=https://api.eu-de.speech-to-text.watson.cloud.ibm.com
//! SPEECH_TO_TEXT_AUTH_TYPE=iam
//! ```
//!
//! [`ServiceConfig::load`] merges the credentials file (lowest priority) with
//! environment variables (highest priority).
//!
//! # Example
//! ```rust,no_run
//! use watson_sdk::config::ServiceConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceConfig::load("text_to_speech")?;
//! println!("Using {}", config.effective_url("https://api.us-south.text-to-speech.watson.cloud.ibm.com", "text-to-speech"));
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;
use zeroize::Zeroizing;

use crate::auth::AuthType;
use crate::core::base::IbmRegion;
use crate::errors::{WatsonError, WatsonResult};

mod credentials;
mod yaml;

pub use credentials::{DEFAULT_CREDENTIALS_FILE, IBM_CREDENTIALS_FILE_ENV};
pub use yaml::{ServiceYaml, YamlConfig};

/// String whose contents are wiped from memory when dropped.
pub type SecretString = Zeroizing<String>;

/// Connection and authentication settings for one Watson service.
#[derive(Clone, Default, PartialEq)]
pub struct ServiceConfig {
    /// Explicit service URL (wins over `region`).
    pub url: Option<String>,
    /// Region used to derive the service URL when `url` is not set.
    pub region: Option<IbmRegion>,
    /// Authentication scheme; inferred from the credentials when `None`.
    pub auth_type: Option<AuthType>,
    /// IAM API key.
    pub apikey: Option<SecretString>,
    /// Basic auth username.
    pub username: Option<String>,
    /// Basic auth password.
    pub password: Option<SecretString>,
    /// Pre-acquired bearer token.
    pub bearer_token: Option<SecretString>,
    /// IAM token service URL override.
    pub auth_url: Option<String>,
    /// IAM client ID (paired with `auth_client_secret`).
    pub auth_client_id: Option<String>,
    /// IAM client secret.
    pub auth_client_secret: Option<SecretString>,
    /// IAM scope.
    pub auth_scope: Option<String>,
    /// Skip TLS verification for the IAM token endpoint.
    pub auth_disable_ssl: Option<bool>,
    /// Skip TLS verification for the service endpoint.
    pub disable_ssl: Option<bool>,
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(v: &Option<SecretString>) -> Option<&'static str> {
            v.as_ref().map(|_| "<redacted>")
        }

        f.debug_struct("ServiceConfig")
            .field("url", &self.url)
            .field("region", &self.region)
            .field("auth_type", &self.auth_type)
            .field("apikey", &redact(&self.apikey))
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("bearer_token", &redact(&self.bearer_token))
            .field("auth_url", &self.auth_url)
            .field("auth_client_id", &self.auth_client_id)
            .field("auth_client_secret", &redact(&self.auth_client_secret))
            .field("auth_scope", &self.auth_scope)
            .field("auth_disable_ssl", &self.auth_disable_ssl)
            .field("disable_ssl", &self.disable_ssl)
            .finish()
    }
}

impl ServiceConfig {
    /// Load configuration from process environment variables only.
    pub fn from_env(service_name: &str) -> WatsonResult<Self> {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// Load configuration from an IBM credentials file without touching the
    /// process environment.
    pub fn from_credentials_file(path: &Path, service_name: &str) -> WatsonResult<Self> {
        let entries = credentials::read_credentials_file(path)?;
        Self::from_lookup(service_name, |key| entries.get(key).cloned())
    }

    /// Load configuration from a YAML file keyed by service name.
    pub fn from_yaml_file(path: &Path, service_name: &str) -> WatsonResult<Self> {
        let yaml = YamlConfig::from_file(path)?;
        yaml.service(service_name)
            .ok_or_else(|| {
                WatsonError::InvalidConfiguration(format!(
                    "No '{service_name}' section in {}",
                    path.display()
                ))
            })?
            .to_service_config()
    }

    /// Load configuration from all default sources.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Credentials file (`$IBM_CREDENTIALS_FILE` or `./ibm-credentials.env`)
    pub fn load(service_name: &str) -> WatsonResult<Self> {
        let base = match credentials::credentials_file_path()? {
            Some(path) => {
                debug!(
                    service = service_name,
                    path = %path.display(),
                    "Loading IBM credentials file"
                );
                Self::from_credentials_file(&path, service_name)?
            }
            None => Self::default(),
        };

        Ok(base.merge(Self::from_env(service_name)?))
    }

    /// Build a configuration from any key/value source.
    pub fn from_lookup<F>(service_name: &str, lookup: F) -> WatsonResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = env_prefix(service_name);
        let get = |suffix: &str| {
            lookup(&format!("{prefix}_{suffix}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let get_bool = |suffix: &str| -> WatsonResult<Option<bool>> {
            get(suffix)
                .map(|v| parse_bool(&format!("{prefix}_{suffix}"), &v))
                .transpose()
        };

        let auth_type = get("AUTH_TYPE").map(|v| v.parse::<AuthType>()).transpose()?;
        let region = get("REGION").map(|v| v.parse::<IbmRegion>()).transpose()?;

        Ok(Self {
            url: get("URL"),
            region,
            auth_type,
            apikey: get("APIKEY").or_else(|| get("IAM_APIKEY")).map(Zeroizing::new),
            username: get("USERNAME"),
            password: get("PASSWORD").map(Zeroizing::new),
            bearer_token: get("BEARER_TOKEN").map(Zeroizing::new),
            auth_url: get("AUTH_URL").or_else(|| get("IAM_URL")),
            auth_client_id: get("CLIENT_ID"),
            auth_client_secret: get("CLIENT_SECRET").map(Zeroizing::new),
            auth_scope: get("SCOPE"),
            auth_disable_ssl: get_bool("AUTH_DISABLE_SSL")?,
            disable_ssl: get_bool("DISABLE_SSL")?,
        })
    }

    /// Overlay `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: ServiceConfig) -> ServiceConfig {
        ServiceConfig {
            url: overrides.url.or(self.url),
            region: overrides.region.or(self.region),
            auth_type: overrides.auth_type.or(self.auth_type),
            apikey: overrides.apikey.or(self.apikey),
            username: overrides.username.or(self.username),
            password: overrides.password.or(self.password),
            bearer_token: overrides.bearer_token.or(self.bearer_token),
            auth_url: overrides.auth_url.or(self.auth_url),
            auth_client_id: overrides.auth_client_id.or(self.auth_client_id),
            auth_client_secret: overrides.auth_client_secret.or(self.auth_client_secret),
            auth_scope: overrides.auth_scope.or(self.auth_scope),
            auth_disable_ssl: overrides.auth_disable_ssl.or(self.auth_disable_ssl),
            disable_ssl: overrides.disable_ssl.or(self.disable_ssl),
        }
    }

    /// Resolve the service URL: explicit URL, then region, then `default_url`.
    pub fn effective_url(&self, default_url: &str, service_host: &str) -> String {
        if let Some(ref url) = self.url {
            return url.clone();
        }
        match self.region {
            Some(region) => region.service_url(service_host),
            None => default_url.to_string(),
        }
    }

    pub fn disable_ssl(&self) -> bool {
        self.disable_ssl.unwrap_or(false)
    }

    pub fn auth_disable_ssl(&self) -> bool {
        self.auth_disable_ssl.unwrap_or(false)
    }

    /// True if no credential of any kind is configured.
    pub fn has_credentials(&self) -> bool {
        self.apikey.is_some()
            || self.bearer_token.is_some()
            || (self.username.is_some() && self.password.is_some())
            || self.auth_type == Some(AuthType::NoAuth)
    }
}

/// `speech-to-text` -> `SPEECH_TO_TEXT`
pub fn env_prefix(service_name: &str) -> String {
    service_name.trim().to_uppercase().replace('-', "_")
}

fn parse_bool(key: &str, value: &str) -> WatsonResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(WatsonError::InvalidConfiguration(format!(
            "{key} must be a boolean (true/false), got '{value}'"
        ))),
    }
}

/// Default location searched for credentials when nothing is configured.
pub fn default_credentials_path() -> PathBuf {
    PathBuf::from(DEFAULT_CREDENTIALS_FILE)
}
