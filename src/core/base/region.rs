//! IBM Cloud regions hosting the Watson services.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::WatsonError;

/// IBM Watson service regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IbmRegion {
    /// Dallas, Texas (US South)
    #[default]
    UsSouth,
    /// Washington, D.C. (US East)
    UsEast,
    /// Frankfurt, Germany (EU Central)
    EuDe,
    /// London, UK (EU GB)
    EuGb,
    /// Sydney, Australia (AU SYD)
    AuSyd,
    /// Tokyo, Japan (JP TOK)
    JpTok,
    /// Seoul, South Korea (KR SEO)
    KrSeo,
}

impl IbmRegion {
    pub const ALL: [IbmRegion; 7] = [
        Self::UsSouth,
        Self::UsEast,
        Self::EuDe,
        Self::EuGb,
        Self::AuSyd,
        Self::JpTok,
        Self::KrSeo,
    ];

    /// Get the region code string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UsSouth => "us-south",
            Self::UsEast => "us-east",
            Self::EuDe => "eu-de",
            Self::EuGb => "eu-gb",
            Self::AuSyd => "au-syd",
            Self::JpTok => "jp-tok",
            Self::KrSeo => "kr-seo",
        }
    }

    /// Hostname of a service in this region, e.g. `api.eu-de.speech-to-text.watson.cloud.ibm.com`.
    ///
    /// `service_host` is the DNS label of the service (`assistant`,
    /// `speech-to-text`, `text-to-speech`, `discovery`).
    pub fn hostname(&self, service_host: &str) -> String {
        format!("api.{}.{}.watson.cloud.ibm.com", self.as_str(), service_host)
    }

    /// Base URL of a service in this region.
    pub fn service_url(&self, service_host: &str) -> String {
        format!("https://{}", self.hostname(service_host))
    }
}

impl std::fmt::Display for IbmRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IbmRegion {
    type Err = WatsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == normalized)
            .ok_or_else(|| {
                WatsonError::InvalidConfiguration(format!(
                    "Unknown IBM Cloud region '{s}'. Supported regions: us-south, us-east, eu-de, eu-gb, au-syd, jp-tok, kr-seo"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_hostnames() {
        assert_eq!(
            IbmRegion::UsSouth.hostname("speech-to-text"),
            "api.us-south.speech-to-text.watson.cloud.ibm.com"
        );
        assert_eq!(
            IbmRegion::EuDe.hostname("assistant"),
            "api.eu-de.assistant.watson.cloud.ibm.com"
        );
        assert_eq!(
            IbmRegion::JpTok.service_url("text-to-speech"),
            "https://api.jp-tok.text-to-speech.watson.cloud.ibm.com"
        );
    }

    #[test]
    fn test_region_parsing() {
        assert_eq!("eu-gb".parse::<IbmRegion>().unwrap(), IbmRegion::EuGb);
        assert_eq!("AU_SYD".parse::<IbmRegion>().unwrap(), IbmRegion::AuSyd);
        assert!("mars-north".parse::<IbmRegion>().is_err());
    }

    #[test]
    fn test_region_default_and_display() {
        assert_eq!(IbmRegion::default(), IbmRegion::UsSouth);
        assert_eq!(format!("{}", IbmRegion::KrSeo), "kr-seo");
    }
}
