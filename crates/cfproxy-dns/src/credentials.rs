//! CFProxy credentials and secure loading
//!
//! Credentials are three required values: the account user, its API key and
//! the API endpoint URL. They are validated once, when constructed.
//!
//! Supported sources:
//! - JSON files (`{"user": "...", "api-key": "...", "api-endpoint": "..."}`)
//! - Environment variables holding the same JSON document

use std::fmt;
use std::fs;
use std::path::Path;

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{CfProxyError, CfProxyResult};

/// Validated CFProxy account credentials
#[derive(Clone)]
pub struct Credentials {
    user: String,
    api_key: String,
    api_endpoint: Url,
}

impl Credentials {
    /// Build credentials, failing on any missing field or a malformed endpoint
    pub fn new(
        user: impl Into<String>,
        api_key: impl Into<String>,
        api_endpoint: impl AsRef<str>,
    ) -> CfProxyResult<Self> {
        let user = required("user", user.into())?;
        let api_key = required("api-key", api_key.into())?;
        let endpoint = required("api-endpoint", api_endpoint.as_ref().to_string())?;

        let api_endpoint = Url::parse(&endpoint).map_err(|e| {
            CfProxyError::Configuration(format!("Invalid api-endpoint '{}': {}", endpoint, e))
        })?;

        if !matches!(api_endpoint.scheme(), "http" | "https") {
            return Err(CfProxyError::Configuration(format!(
                "Invalid api-endpoint '{}': scheme must be http or https",
                endpoint
            )));
        }

        Ok(Self {
            user,
            api_key,
            api_endpoint,
        })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_endpoint(&self) -> &Url {
        &self.api_endpoint
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("api_key", &"<redacted>")
            .field("api_endpoint", &self.api_endpoint.as_str())
            .finish()
    }
}

fn required(field: &str, value: String) -> CfProxyResult<String> {
    if value.trim().is_empty() {
        return Err(CfProxyError::Configuration(format!(
            "Missing required credential '{}'",
            field
        )));
    }
    Ok(value)
}

/// Credential loader for CFProxy authentication
#[derive(Debug, Default)]
pub struct CredentialLoader;

impl CredentialLoader {
    /// Load credentials from a JSON file
    ///
    /// # Security
    ///
    /// On Unix, warns when the file is accessible by group or others
    /// (should be 0600 or 0400).
    pub fn load_from_file(path: &Path) -> CfProxyResult<Credentials> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let metadata = fs::metadata(path).map_err(|e| {
                CfProxyError::Credentials(format!(
                    "Failed to read credentials file '{}': {}",
                    path.display(),
                    e
                ))
            })?;

            let file_mode = metadata.permissions().mode() & 0o777;
            if file_mode & 0o077 != 0 {
                warn!(
                    path = %path.display(),
                    mode = format!("{:o}", file_mode),
                    "Credentials file has overly permissive permissions (should be 0600 or 0400)"
                );
            }
        }

        let content = fs::read_to_string(path).map_err(|e| {
            CfProxyError::Credentials(format!(
                "Failed to read credentials file '{}': {}",
                path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Err(CfProxyError::Credentials(format!(
                "Credentials file '{}' is empty",
                path.display()
            )));
        }

        let credentials = Self::parse_json_credentials(&content)?;
        debug!(path = %path.display(), user = %credentials.user(), "Loaded CFProxy credentials");
        Ok(credentials)
    }

    /// Load credentials from an environment variable holding a JSON document
    pub fn load_from_env(var_name: &str) -> CfProxyResult<Credentials> {
        let value = std::env::var(var_name).map_err(|_| {
            CfProxyError::Credentials(format!("Environment variable '{}' not set", var_name))
        })?;

        Self::parse_json_credentials(&value)
    }

    fn parse_json_credentials(json: &str) -> CfProxyResult<Credentials> {
        #[derive(Deserialize)]
        struct CredentialsFile {
            user: Option<String>,
            #[serde(alias = "api_key")]
            #[serde(rename = "api-key")]
            api_key: Option<String>,
            #[serde(alias = "api_endpoint")]
            #[serde(rename = "api-endpoint")]
            api_endpoint: Option<String>,
        }

        let parsed: CredentialsFile = serde_json::from_str(json.trim()).map_err(|e| {
            CfProxyError::Credentials(format!(
                "Invalid JSON credentials format. Expected {{\"user\": \"...\", \"api-key\": \"...\", \"api-endpoint\": \"...\"}}: {}",
                e
            ))
        })?;

        Credentials::new(
            parsed.user.unwrap_or_default(),
            parsed.api_key.unwrap_or_default(),
            parsed.api_endpoint.unwrap_or_default(),
        )
    }
}
