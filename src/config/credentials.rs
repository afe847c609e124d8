//! IBM credentials file (`ibm-credentials.env`) support.
//!
//! The file is a dotenv-style list of `KEY=value` pairs as downloaded from
//! the IBM Cloud console. It is parsed with `dotenvy` but never applied to
//! the process environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::errors::{WatsonError, WatsonResult};

/// Environment variable pointing at a credentials file.
pub const IBM_CREDENTIALS_FILE_ENV: &str = "IBM_CREDENTIALS_FILE";

/// File name looked up in the working directory when no path is configured.
pub const DEFAULT_CREDENTIALS_FILE: &str = "ibm-credentials.env";

/// Parse a credentials file into a key/value map.
pub(crate) fn read_credentials_file(path: &Path) -> WatsonResult<HashMap<String, String>> {
    let iter = dotenvy::from_path_iter(path).map_err(|e| {
        WatsonError::InvalidConfiguration(format!(
            "Failed to read credentials file {}: {e}",
            path.display()
        ))
    })?;

    iter.map(|item| {
        item.map_err(|e| {
            WatsonError::InvalidConfiguration(format!(
                "Failed to parse credentials file {}: {e}",
                path.display()
            ))
        })
    })
    .collect()
}

/// Locate the credentials file to use, if any.
///
/// An explicit `$IBM_CREDENTIALS_FILE` must exist; the default file in the
/// working directory is optional.
pub(crate) fn credentials_file_path() -> WatsonResult<Option<PathBuf>> {
    if let Ok(explicit) = std::env::var(IBM_CREDENTIALS_FILE_ENV)
        && !explicit.trim().is_empty()
    {
        let path = PathBuf::from(explicit);
        if !path.is_file() {
            return Err(WatsonError::InvalidConfiguration(format!(
                "{IBM_CREDENTIALS_FILE_ENV} points to a missing file: {}",
                path.display()
            )));
        }
        return Ok(Some(path));
    }

    let default = super::default_credentials_path();
    Ok(default.is_file().then_some(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_credentials_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ibm-credentials.env");
        fs::write(
            &path,
            "# downloaded from IBM Cloud\nDISCOVERY_APIKEY=abc123\nDISCOVERY_URL=\"https://api.eu-de.discovery.watson.cloud.ibm.com\"\n",
        )
        .unwrap();

        let entries = read_credentials_file(&path).unwrap();
        assert_eq!(entries.get("DISCOVERY_APIKEY").map(String::as_str), Some("abc123"));
        assert_eq!(
            entries.get("DISCOVERY_URL").map(String::as_str),
            Some("https://api.eu-de.discovery.watson.cloud.ibm.com")
        );
    }

    #[test]
    fn test_read_missing_credentials_file() {
        let result = read_credentials_file(Path::new("/definitely/not/here.env"));
        assert!(matches!(result, Err(WatsonError::InvalidConfiguration(_))));
    }
}
