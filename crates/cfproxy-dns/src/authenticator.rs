//! DNS-01 authenticator
//!
//! Entry point for a host that drives the ACME flow:
//! 1. [`Authenticator::perform`] publishes the validation TXT record
//! 2. The host asks the CA to validate
//! 3. [`Authenticator::cleanup`] removes the record again

use tracing::{info, info_span, warn};

use crate::client::CfProxyClient;
use crate::config::CfProxyConfig;
use crate::credentials::Credentials;
use crate::error::CfProxyResult;
use crate::zone::normalize_domain;

/// DNS-01 authenticator backed by CFProxy
#[derive(Debug)]
pub struct Authenticator {
    client: CfProxyClient,
    ttl: u32,
}

impl Authenticator {
    /// Create an authenticator from already loaded credentials
    pub fn new(credentials: Credentials, config: &CfProxyConfig) -> CfProxyResult<Self> {
        config.validate()?;

        let span = info_span!("cfproxy_dns01", user = %credentials.user());
        let client = CfProxyClient::new(credentials, config.api_timeout())?.with_span(span);

        Ok(Self {
            client,
            ttl: config.ttl,
        })
    }

    /// Create an authenticator, loading credentials from the configured source
    pub fn from_config(config: &CfProxyConfig) -> CfProxyResult<Self> {
        let credentials = config.load_credentials()?;
        Self::new(credentials, config)
    }

    pub fn description(&self) -> &'static str {
        "Obtain certificates using a DNS TXT record (if you are using CFProxy for DNS)."
    }

    pub fn more_info(&self) -> &'static str {
        "This plugin configures a DNS TXT record to respond to a dns-01 challenge using the CFProxy API."
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn client(&self) -> &CfProxyClient {
        &self.client
    }

    /// Publish the validation record for `domain`
    pub async fn perform(
        &self,
        domain: &str,
        validation_name: &str,
        validation: &str,
    ) -> CfProxyResult<()> {
        info!(
            domain = %domain,
            record = %validation_name,
            "Creating DNS-01 challenge record"
        );

        self.client
            .add_txt_record(normalize_domain(domain), validation_name, validation, self.ttl)
            .await
    }

    /// Remove the validation record for `domain`
    ///
    /// Failures are logged and returned; callers treat them as non-fatal since
    /// the certificate has already been issued or refused by now.
    pub async fn cleanup(
        &self,
        domain: &str,
        validation_name: &str,
        validation: &str,
    ) -> CfProxyResult<()> {
        match self
            .client
            .del_txt_record(normalize_domain(domain), validation_name, validation)
            .await
        {
            Ok(()) => {
                info!(domain = %domain, "DNS-01 challenge record cleaned up");
                Ok(())
            }
            Err(e) => {
                warn!(
                    domain = %domain,
                    record = %validation_name,
                    error = %e,
                    "Failed to cleanup DNS-01 challenge record"
                );
                Err(e)
            }
        }
    }
}
