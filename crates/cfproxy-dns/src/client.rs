//! CFProxy API client
//!
//! Encapsulates all communication with the CFProxy API.
//!
//! # API
//!
//! ## Add Record
//! ```text
//! POST {endpoint}/add
//! Content-Type: application/json
//!
//! {
//!   "rectype": "TXT",
//!   "zone": "example.com",
//!   "rec": "_acme-challenge.example.com",
//!   "value": "challenge-value",
//!   "ttl": 120,
//!   "user": "admin@example.com",
//!   "key": "api-key"
//! }
//!
//! Response:
//! {
//!   "success": true
//! }
//! ```
//!
//! ## Delete Record
//! ```text
//! POST {endpoint}/delete
//! ```
//! Same body without `ttl`, same response.
//!
//! The zone that owns a domain is not known up front. Each request is tried
//! against the candidates from [`base_domain_guesses`], most specific first,
//! and iteration stops at the first `"success": true`.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, error, info, warn, Instrument, Span};

use crate::credentials::Credentials;
use crate::error::{CfProxyError, CfProxyResult};
use crate::zone::base_domain_guesses;

/// Record operations exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Delete,
}

impl Operation {
    fn path(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Client for the CFProxy DNS API
#[derive(Debug)]
pub struct CfProxyClient {
    client: Client,
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    span: Span,
}

impl CfProxyClient {
    /// Create a new CFProxy client
    ///
    /// # Arguments
    ///
    /// * `credentials` - Validated account credentials
    /// * `timeout` - Per-request timeout
    pub fn new(credentials: Credentials, timeout: Duration) -> CfProxyResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            CfProxyError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        // Remove trailing slash from base URL
        let base_url = credentials
            .api_endpoint()
            .as_str()
            .trim_end_matches('/')
            .to_string();

        let span = debug_span!("cfproxy", endpoint = %base_url);

        Ok(Self {
            client,
            credentials,
            base_url,
            timeout,
            span,
        })
    }

    /// Use the given span as the parent of every event this client emits
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Add a TXT record
    ///
    /// # Arguments
    ///
    /// * `domain` - The domain used to look up the CFProxy zone
    /// * `record_name` - The record name (typically beginning with `_acme-challenge.`)
    /// * `record_value` - The record content (typically the challenge validation)
    /// * `ttl` - Seconds the record may be cached
    ///
    /// # Errors
    ///
    /// Returns [`CfProxyError::Communication`] on the first transport failure
    /// without trying further zones, and [`CfProxyError::ZoneNotFound`] if no
    /// zone accepted the record.
    pub async fn add_txt_record(
        &self,
        domain: &str,
        record_name: &str,
        record_value: &str,
        ttl: u32,
    ) -> CfProxyResult<()> {
        self.submit(Operation::Add, domain, record_name, record_value, Some(ttl))
            .instrument(self.span.clone())
            .await
    }

    /// Delete a TXT record
    ///
    /// Both the record's name and content are sent so that similar records
    /// created concurrently by other invocations are left alone.
    pub async fn del_txt_record(
        &self,
        domain: &str,
        record_name: &str,
        record_value: &str,
    ) -> CfProxyResult<()> {
        self.submit(Operation::Delete, domain, record_name, record_value, None)
            .instrument(self.span.clone())
            .await
    }

    async fn submit(
        &self,
        operation: Operation,
        domain: &str,
        record_name: &str,
        record_value: &str,
        ttl: Option<u32>,
    ) -> CfProxyResult<()> {
        let url = format!("{}/{}", self.base_url, operation.path());

        for zone in base_domain_guesses(domain) {
            let request = RecordRequest {
                rectype: "TXT",
                zone: &zone,
                rec: record_name,
                value: record_value,
                ttl,
                user: self.credentials.user(),
                key: self.credentials.api_key(),
            };

            debug!(
                operation = %operation,
                domain = %domain,
                zone = %zone,
                payload = ?request,
                "Attempting TXT record operation"
            );

            match self.post(&url, &request).await {
                Ok(true) => {
                    info!(
                        operation = %operation,
                        zone = %zone,
                        record_name = %record_name,
                        "TXT record operation succeeded"
                    );
                    return Ok(());
                }
                Ok(false) => {
                    debug!(operation = %operation, zone = %zone, "Zone rejected request, trying next");
                }
                Err(e) => {
                    error!(
                        operation = %operation,
                        zone = %zone,
                        error = %e,
                        "Encountered error during TXT record operation"
                    );
                    return Err(e);
                }
            }
        }

        warn!(
            operation = %operation,
            domain = %domain,
            record_name = %record_name,
            "No zone accepted the TXT record operation"
        );
        Err(CfProxyError::ZoneNotFound {
            domain: domain.to_string(),
        })
    }

    /// POST a request and return the API's success flag
    async fn post(&self, url: &str, request: &RecordRequest<'_>) -> CfProxyResult<bool> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.communication_error(url, e))?;

        debug!(status = %response.status(), "CFProxy API responded");

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| self.communication_error(url, e))?;

        Ok(api_response.success)
    }

    fn communication_error(&self, url: &str, e: reqwest::Error) -> CfProxyError {
        let message = if e.is_timeout() {
            format!("Request timed out after {}s", self.timeout.as_secs_f32())
        } else if e.is_decode() {
            format!("Failed to parse response: {}", e)
        } else {
            format!("Request failed: {}", e)
        };

        CfProxyError::Communication {
            endpoint: url.to_string(),
            message,
        }
    }
}

// CFProxy API types

#[derive(Debug, Serialize)]
struct RecordRequest<'a> {
    rectype: &'static str,
    zone: &'a str,
    rec: &'a str,
    value: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ttl: Option<u32>,
    user: &'a str,
    key: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(endpoint: &str) -> Credentials {
        Credentials::new("admin@example.com", "key123", endpoint).unwrap()
    }

    #[test]
    fn test_base_url_normalization() {
        let client =
            CfProxyClient::new(credentials("https://example.com/api/"), Duration::from_secs(30))
                .unwrap();
        assert_eq!(client.base_url(), "https://example.com/api");

        let client =
            CfProxyClient::new(credentials("https://example.com"), Duration::from_secs(30))
                .unwrap();
        assert_eq!(client.base_url(), "https://example.com");
    }

    #[test]
    fn test_add_request_body() {
        let request = RecordRequest {
            rectype: "TXT",
            zone: "example.com",
            rec: "_acme-challenge.example.com",
            value: "abc123",
            ttl: Some(120),
            user: "U",
            key: "K",
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "rectype": "TXT",
                "zone": "example.com",
                "rec": "_acme-challenge.example.com",
                "value": "abc123",
                "ttl": 120,
                "user": "U",
                "key": "K"
            })
        );
    }

    #[test]
    fn test_delete_request_body_omits_ttl() {
        let request = RecordRequest {
            rectype: "TXT",
            zone: "example.com",
            rec: "_acme-challenge.example.com",
            value: "abc123",
            ttl: None,
            user: "U",
            key: "K",
        };

        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("ttl").is_none());
        assert_eq!(body["rec"], "_acme-challenge.example.com");
    }

    #[test]
    fn test_api_response_ignores_extra_fields() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"success": false, "message": "zone not managed"}"#).unwrap();
        assert!(!response.success);

        assert!(serde_json::from_str::<ApiResponse>(r#"{"ok": true}"#).is_err());
        assert!(serde_json::from_str::<ApiResponse>(r#"{"success": "yes"}"#).is_err());
    }

    #[test]
    fn test_operation_paths() {
        assert_eq!(Operation::Add.path(), "add");
        assert_eq!(Operation::Delete.to_string(), "delete");
    }
}
