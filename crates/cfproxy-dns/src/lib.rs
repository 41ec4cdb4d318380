//! CFProxy DNS-01 authenticator
//!
//! Completes `dns-01` challenges by creating, and later removing, TXT records
//! through the CFProxy HTTP API.
//!
//! # Architecture
//!
//! - [`Authenticator`] - `perform` / `cleanup` entry points for an ACME host
//! - [`CfProxyClient`] - Add/delete requests against the API
//! - [`base_domain_guesses`] - Zone candidates, most specific first
//! - [`CredentialLoader`] - Secure loading of account credentials
//!
//! # Example
//!
//! ```no_run
//! use cfproxy_dns::{Authenticator, CfProxyConfig};
//!
//! # async fn run() -> cfproxy_dns::CfProxyResult<()> {
//! let config = CfProxyConfig {
//!     credentials_file: Some("/etc/cfproxy/credentials.json".into()),
//!     ..Default::default()
//! };
//! let authenticator = Authenticator::from_config(&config)?;
//!
//! authenticator
//!     .perform("example.com", "_acme-challenge.example.com", "validation-token")
//!     .await?;
//! // ... CA validates ...
//! authenticator
//!     .cleanup("example.com", "_acme-challenge.example.com", "validation-token")
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod authenticator;
mod client;
mod config;
mod credentials;
mod error;
mod zone;

pub use authenticator::Authenticator;
pub use client::CfProxyClient;
pub use config::CfProxyConfig;
pub use credentials::{CredentialLoader, Credentials};
pub use error::{CfProxyError, CfProxyResult};
pub use zone::{base_domain_guesses, normalize_domain};
