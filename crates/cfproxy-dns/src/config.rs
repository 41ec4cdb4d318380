//! Authenticator configuration types

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::credentials::{CredentialLoader, Credentials};
use crate::error::{CfProxyError, CfProxyResult};

// ============================================================================
// CFProxy Configuration
// ============================================================================

/// Settings for the CFProxy DNS-01 authenticator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CfProxyConfig {
    /// Path to a JSON credentials file
    pub credentials_file: Option<PathBuf>,

    /// Environment variable holding the JSON credentials document
    pub credentials_env: Option<String>,

    /// Per-request timeout for API calls
    #[serde(default = "default_api_timeout")]
    pub api_timeout_secs: u64,

    /// TTL advertised for challenge records
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

impl Default for CfProxyConfig {
    fn default() -> Self {
        Self {
            credentials_file: None,
            credentials_env: None,
            api_timeout_secs: default_api_timeout(),
            ttl: default_ttl(),
        }
    }
}

impl CfProxyConfig {
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    /// Check values that cannot be expressed in the type
    pub fn validate(&self) -> CfProxyResult<()> {
        if self.api_timeout_secs == 0 {
            return Err(CfProxyError::Configuration(
                "api-timeout-secs must be greater than zero".to_string(),
            ));
        }
        if self.ttl == 0 {
            return Err(CfProxyError::Configuration(
                "ttl must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Load credentials from file or environment variable
    ///
    /// The file takes precedence when both are configured.
    pub fn load_credentials(&self) -> CfProxyResult<Credentials> {
        if let Some(ref path) = self.credentials_file {
            return CredentialLoader::load_from_file(path);
        }

        if let Some(ref env_var) = self.credentials_env {
            return CredentialLoader::load_from_env(env_var);
        }

        Err(CfProxyError::Configuration(
            "No credentials configured. Specify either 'credentials-file' or 'credentials-env'"
                .to_string(),
        ))
    }
}

// ============================================================================
// Default Value Functions
// ============================================================================

pub(crate) fn default_api_timeout() -> u64 {
    30
}

pub(crate) fn default_ttl() -> u32 {
    120
}
