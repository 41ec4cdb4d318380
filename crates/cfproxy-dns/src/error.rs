//! Error types for CFProxy DNS operations

use thiserror::Error;

/// Result type for CFProxy operations
pub type CfProxyResult<T> = Result<T, CfProxyError>;

/// Errors that can occur while talking to the CFProxy API
#[derive(Debug, Error)]
pub enum CfProxyError {
    /// Invalid or incomplete configuration, detected before any network activity
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Credential source could not be read or parsed
    #[error("Failed to load credentials: {0}")]
    Credentials(String),

    /// Transport-level failure: connection, timeout, or malformed response
    #[error("Error communicating with the CFProxy API at '{endpoint}': {message}")]
    Communication { endpoint: String, message: String },

    /// Every zone candidate was tried and none reported success
    #[error("No CFProxy zone accepted the request for domain '{domain}'")]
    ZoneNotFound { domain: String },
}

impl CfProxyError {
    /// Returns true for transport failures
    pub fn is_communication(&self) -> bool {
        matches!(self, CfProxyError::Communication { .. })
    }
}
