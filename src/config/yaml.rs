use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use zeroize::Zeroizing;

use super::ServiceConfig;
use crate::auth::AuthType;
use crate::core::base::IbmRegion;
use crate::errors::{WatsonError, WatsonResult};

/// YAML configuration keyed by service name.
///
/// All fields are optional to allow partial configuration.
///
/// # Example YAML structure
/// ```yaml
/// assistant:
///   apikey: "your-assistant-apikey"
///   url: "https://api.eu-gb.assistant.watson.cloud.ibm.com/instances/xyz"
///
/// speech_to_text:
///   auth_type: "iam"
///   apikey: "your-stt-apikey"
///   region: "eu-de"
///
/// text_to_speech:
///   auth_type: "bearertoken"
///   bearer_token: "eyJraWQiOi..."
///
/// discovery:
///   auth_type: "basic"
///   username: "admin"
///   password: "secret"
///   disable_ssl: true
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(transparent)]
pub struct YamlConfig {
    pub services: HashMap<String, ServiceYaml>,
}

/// One service section of the YAML file.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServiceYaml {
    pub url: Option<String>,
    pub region: Option<String>,
    pub auth_type: Option<String>,
    pub apikey: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub bearer_token: Option<String>,
    pub auth_url: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub scope: Option<String>,
    pub auth_disable_ssl: Option<bool>,
    pub disable_ssl: Option<bool>,
}

impl YamlConfig {
    pub fn from_file(path: &Path) -> WatsonResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            WatsonError::InvalidConfiguration(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> WatsonResult<Self> {
        serde_yaml::from_str(contents).map_err(|e| {
            WatsonError::InvalidConfiguration(format!("Failed to parse YAML config: {e}"))
        })
    }

    /// Look up a service section; `speech-to-text` and `speech_to_text` are equivalent.
    pub fn service(&self, service_name: &str) -> Option<&ServiceYaml> {
        self.services.get(service_name).or_else(|| {
            let alt = if service_name.contains('-') {
                service_name.replace('-', "_")
            } else {
                service_name.replace('_', "-")
            };
            self.services.get(&alt)
        })
    }
}

impl ServiceYaml {
    pub fn to_service_config(&self) -> WatsonResult<ServiceConfig> {
        let auth_type = self
            .auth_type
            .as_deref()
            .map(str::parse::<AuthType>)
            .transpose()?;
        let region = self
            .region
            .as_deref()
            .map(str::parse::<IbmRegion>)
            .transpose()?;

        Ok(ServiceConfig {
            url: self.url.clone(),
            region,
            auth_type,
            apikey: self.apikey.clone().map(Zeroizing::new),
            username: self.username.clone(),
            password: self.password.clone().map(Zeroizing::new),
            bearer_token: self.bearer_token.clone().map(Zeroizing::new),
            auth_url: self.auth_url.clone(),
            auth_client_id: self.client_id.clone(),
            auth_client_secret: self.client_secret.clone().map(Zeroizing::new),
            auth_scope: self.scope.clone(),
            auth_disable_ssl: self.auth_disable_ssl,
            disable_ssl: self.disable_ssl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_config_full() {
        let yaml = r#"
speech-to-text:
  auth_type: "iam"
  apikey: "stt-key"
  auth_url: "https://iam.test.cloud.ibm.com"
  client_id: "bx"
  client_secret: "bx"
  scope: "openid"
  disable_ssl: false
  auth_disable_ssl: true
"#;
        let config = YamlConfig::parse(yaml).unwrap();
        let stt = config.service("speech_to_text").unwrap();
        assert_eq!(stt.apikey.as_deref(), Some("stt-key"));

        let service_config = stt.to_service_config().unwrap();
        assert_eq!(service_config.auth_type, Some(AuthType::Iam));
        assert_eq!(service_config.auth_client_id.as_deref(), Some("bx"));
        assert_eq!(service_config.auth_scope.as_deref(), Some("openid"));
        assert!(service_config.auth_disable_ssl());
        assert!(!service_config.disable_ssl());
    }

    #[test]
    fn test_yaml_invalid_region() {
        let config = YamlConfig::parse("discovery:\n  region: \"moon-1\"\n").unwrap();
        let result = config.service("discovery").unwrap().to_service_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_yaml_malformed() {
        let result = YamlConfig::parse("assistant: [unterminated");
        assert!(matches!(result, Err(WatsonError::InvalidConfiguration(_))));
    }
}
